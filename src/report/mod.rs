//! Report records and their populators
//!
//! Each report type declares a flat record with an explicit, ordered field
//! schema. The table renderer only ever sees that schema, so every report
//! type goes through the same rendering path.

pub mod describe;
pub mod remember;
pub mod stats;

use std::fmt;
use std::path::PathBuf;
use chrono::NaiveDate;

use crate::display::{Alignment, ColourManager, RenderedReport, TableLayout, TableRenderer};
use crate::error::ReportResult;

pub use describe::DescribeRecord;
pub use remember::RememberRecord;
pub use stats::StatsRecord;

/// Semantic type of a field, which selects its cell formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Count,
    Months,
    Age,
    Language,
    Size,
    Url,
}

/// One named column of a record: name, kind and a raw-value accessor
pub struct Field<R> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub value: fn(&R) -> String,
}

impl<R> Field<R> {
    pub const fn new(name: &'static str, kind: FieldKind, value: fn(&R) -> String) -> Self {
        Self { name, kind, value }
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).field("kind", &self.kind).finish()
    }
}

/// A flat aggregate that can be rendered as one table row
pub trait Record: Sized {
    /// Fields in declaration order
    fn schema() -> Vec<Field<Self>>;

    /// Fill computed fields before the row is formatted
    fn derive(&mut self, _year: i32) -> ReportResult<()> {
        Ok(())
    }
}

/// A repository to report on: display name plus absolute path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub name: String,
    pub path: PathBuf,
}

impl RepoId {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(name: S, path: P) -> Self {
        Self { name: name.into(), path: path.into() }
    }
}

/// Values shared by the renderer and every populator during one run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    /// Year used for commit frequency and quarterly sums
    pub year: i32,
    /// Reference date for repository age
    pub today: NaiveDate,
    /// Maximum characters kept from a README overview
    pub overview_length: usize,
}

pub const DEFAULT_OVERVIEW_LENGTH: usize = 92;

/// Which report to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Stats,
    Describe,
    Remember,
}

impl ReportKind {
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Stats => "stats",
            ReportKind::Describe => "describe",
            ReportKind::Remember => "remember",
        }
    }

    /// Column widths, omitted fields and alignments used unless configured.
    ///
    /// The Describe overview column is as wide as the longest overview kept.
    pub fn default_layout(&self, overview_length: usize) -> TableLayout {
        match self {
            ReportKind::Stats => TableLayout::new(vec![25, 6, 6, 15, 6, 7, 4, 3, 3, 3, 3])
                .omit(["Remote", "Files", "Frequency"])
                .align("Repo", Alignment::Left),
            ReportKind::Describe => TableLayout::new(vec![25, overview_length, 7])
                .omit(["Remote"])
                .align("Repo", Alignment::Left)
                .align("Overview", Alignment::Left)
                .align("License", Alignment::Left),
            ReportKind::Remember => TableLayout::new(vec![25, 95])
                .align("Repo", Alignment::Left)
                .align("Remote", Alignment::Left),
        }
    }

    /// Field names declared by this report's record
    pub fn field_names(&self) -> Vec<&'static str> {
        fn names<R: Record>() -> Vec<&'static str> {
            R::schema().iter().map(|f| f.name).collect()
        }
        match self {
            ReportKind::Stats => names::<StatsRecord>(),
            ReportKind::Describe => names::<DescribeRecord>(),
            ReportKind::Remember => names::<RememberRecord>(),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the report of `kind` over `repos`
pub fn generate(
    kind: ReportKind,
    repos: &[RepoId],
    layout: &TableLayout,
    settings: &ReportSettings,
    colours: &ColourManager,
    emit_csv: bool,
) -> ReportResult<RenderedReport> {
    let renderer = TableRenderer::new(colours, settings.year);
    match kind {
        ReportKind::Stats => renderer.render(repos, layout, emit_csv, |repo| stats::populate(repo, settings)),
        ReportKind::Describe => renderer.render(repos, layout, emit_csv, |repo| describe::populate(repo, settings)),
        ReportKind::Remember => renderer.render(repos, layout, emit_csv, remember::populate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layouts_match_rendered_fields() {
        for kind in [ReportKind::Stats, ReportKind::Describe, ReportKind::Remember] {
            let layout = kind.default_layout(DEFAULT_OVERVIEW_LENGTH);
            let rendered = kind
                .field_names()
                .into_iter()
                .filter(|name| !layout.omits(name))
                .count();
            assert_eq!(layout.widths.len(), rendered, "{} layout", kind);
        }
    }
}
