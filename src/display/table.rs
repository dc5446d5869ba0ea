//! Schema-driven Markdown table renderer with optional CSV mirror
//!
//! Every report type goes through [`TableRenderer::render`]. Headers come from
//! the record's static schema minus the omitted names; each repository is
//! populated inside a directory guard, derived fields are computed, and the
//! same record feeds both the styled Markdown row and the raw CSV row.

use std::borrow::Cow;
use std::collections::BTreeMap;
use log::{debug, warn};

use super::align::Alignment;
use super::cells::format_cell;
use super::ColourManager;
use crate::error::{ErrorContext, ReportError, ReportResult};
use crate::report::{Field, FieldKind, Record, RepoId};
use crate::workdir::WorkingDirectory;

/// Widths, omissions and alignment overrides for one report table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableLayout {
    /// One width per rendered column, after omission
    pub widths: Vec<usize>,
    pub omit: Vec<String>,
    pub alignments: BTreeMap<String, Alignment>,
}

impl TableLayout {
    pub fn new(widths: Vec<usize>) -> Self {
        Self {
            widths,
            ..Self::default()
        }
    }

    /// Add field names that must not be rendered
    pub fn omit<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.omit.extend(names.into_iter().map(Into::into));
        self
    }

    /// Override the alignment of one field
    pub fn align<S: Into<String>>(mut self, name: S, alignment: Alignment) -> Self {
        self.alignments.insert(name.into(), alignment);
        self
    }

    pub fn omits(&self, name: &str) -> bool {
        self.omit.iter().any(|omitted| omitted == name)
    }
}

/// A rendered column: schema field plus its width and explicit alignment
#[derive(Debug)]
pub struct Column<'s, R> {
    pub field: &'s Field<R>,
    pub width: usize,
    pub alignment: Option<Alignment>,
}

impl<R> Column<'_, R> {
    pub fn name(&self) -> &'static str {
        self.field.name
    }

    pub fn kind(&self) -> FieldKind {
        self.field.kind
    }
}

/// Output of one report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub markdown: String,
    /// Present only when CSV output was requested
    pub csv: Option<String>,
}

pub struct TableRenderer<'a> {
    colours: &'a ColourManager,
    year: i32,
}

impl<'a> TableRenderer<'a> {
    pub fn new(colours: &'a ColourManager, year: i32) -> Self {
        Self { colours, year }
    }

    /// Pair the non-omitted schema fields with their widths.
    ///
    /// Fails when the width count differs from the rendered field count or
    /// when a width is zero.
    pub fn columns<'s, R>(&self, schema: &'s [Field<R>], layout: &TableLayout) -> ReportResult<Vec<Column<'s, R>>> {
        for name in &layout.omit {
            if !schema.iter().any(|field| field.name == name.as_str()) {
                warn!("Omitted field '{}' is not part of this report", name);
            }
        }

        let fields: Vec<&Field<R>> = schema.iter().filter(|field| !layout.omits(field.name)).collect();
        if fields.len() != layout.widths.len() {
            let names: Vec<&str> = fields.iter().map(|field| field.name).collect();
            return Err(ReportError::config(
                "render_columns",
                "column widths do not match the rendered fields",
                ErrorContext::new()
                    .with("widths", layout.widths.len())
                    .with("fields", fields.len())
                    .with("names", names.join(",")),
            ));
        }
        if let Some(position) = layout.widths.iter().position(|&width| width == 0) {
            return Err(ReportError::config(
                "render_columns",
                "column width must be positive",
                ErrorContext::new().with("field", fields[position].name),
            ));
        }

        Ok(fields
            .into_iter()
            .zip(layout.widths.iter().copied())
            .map(|(field, width)| Column {
                field,
                width,
                alignment: layout.alignments.get(field.name).copied(),
            })
            .collect())
    }

    /// Bold header cells, right aligned unless overridden
    pub fn header_row<R>(&self, columns: &[Column<'_, R>]) -> String {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| {
                let alignment = column.alignment.unwrap_or(Alignment::Right);
                alignment.apply(&self.colours.emphasis(column.name()).to_string(), column.width)
            })
            .collect();
        markdown_row(&cells)
    }

    /// One dash run of `width + 2` per column
    pub fn separator_row<R>(&self, columns: &[Column<'_, R>]) -> String {
        let mut row = String::from("|");
        for column in columns {
            row.push_str(&"-".repeat(column.width + 2));
            row.push('|');
        }
        row.push('\n');
        row
    }

    pub fn data_row<R>(&self, columns: &[Column<'_, R>], record: &R) -> String {
        let cells: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let raw = (column.field.value)(record);
                let text = escape_markdown(&raw);
                let styled = format_cell(self.colours, column.kind(), &text, column.width, index);
                let alignment = column.alignment.unwrap_or_else(|| Alignment::positional(index));
                alignment.apply(&styled, column.width)
            })
            .collect();
        markdown_row(&cells)
    }

    /// Render one table over `repos`, calling `populate` once per repository.
    ///
    /// The working directory is switched into each repository while it is
    /// populated (only when there is more than one) and restored on every
    /// path. The first populate or derive failure aborts the whole report.
    pub fn render<R, F>(
        &self,
        repos: &[RepoId],
        layout: &TableLayout,
        emit_csv: bool,
        mut populate: F,
    ) -> ReportResult<RenderedReport>
    where
        R: Record,
        F: FnMut(&RepoId) -> ReportResult<R>,
    {
        let schema = R::schema();
        let columns = self.columns(&schema, layout)?;

        let mut markdown = self.header_row(&columns);
        markdown.push_str(&self.separator_row(&columns));

        let mut csv = if emit_csv {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(columns.iter().map(|column| column.name()))?;
            Some(writer)
        } else {
            None
        };

        let workdir = WorkingDirectory::capture()?;
        let change_directory = repos.len() > 1;

        for repo in repos {
            debug!("Rendering {} ({})", repo.name, repo.path.display());
            let record = workdir
                .within(&repo.path, change_directory, || {
                    let mut record = populate(repo)?;
                    record.derive(self.year)?;
                    Ok(record)
                })
                .map_err(|e| {
                    debug!("Collecting {} failed: {}", repo.name, e);
                    ReportError::for_repository("render", &repo.name, e)
                })?;

            markdown.push_str(&self.data_row(&columns, &record));
            if let Some(writer) = csv.as_mut() {
                writer.write_record(columns.iter().map(|column| (column.field.value)(&record)))?;
            }
        }

        let csv = match csv {
            Some(writer) => Some(finish_csv(writer)?),
            None => None,
        };
        Ok(RenderedReport { markdown, csv })
    }
}

/// A literal `|` would end the cell early
fn escape_markdown(text: &str) -> Cow<'_, str> {
    if text.contains('|') {
        Cow::Owned(text.replace('|', "\\|"))
    } else {
        Cow::Borrowed(text)
    }
}

fn markdown_row(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> ReportResult<String> {
    let bytes = writer.into_inner().map_err(|e| {
        ReportError::io("write_csv", "failed to flush CSV buffer", e.into_error(), ErrorContext::new())
    })?;
    String::from_utf8(bytes).map_err(|e| {
        ReportError::data("write_csv", "CSV output is not valid UTF-8", ErrorContext::new().with("error", e))
    })
}
