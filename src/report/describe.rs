//! Describe report: README overview and license

use log::debug;

use super::{Field, FieldKind, Record, RepoId, ReportSettings};
use crate::error::ReportResult;
use crate::{git, readme};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeRecord {
    pub repo: String,
    pub remote: String,
    pub overview: String,
    pub license: String,
}

impl Record for DescribeRecord {
    fn schema() -> Vec<Field<Self>> {
        vec![
            Field::new("Repo", FieldKind::Text, |r: &Self| r.repo.clone()),
            Field::new("Remote", FieldKind::Url, |r: &Self| r.remote.clone()),
            Field::new("Overview", FieldKind::Text, |r: &Self| r.overview.clone()),
            Field::new("License", FieldKind::Text, |r: &Self| r.license.clone()),
        ]
    }
}

pub fn populate(repo: &RepoId, settings: &ReportSettings) -> ReportResult<DescribeRecord> {
    let path = repo.path.as_path();
    debug!("Describing {}", repo.name);

    Ok(DescribeRecord {
        repo: repo.name.clone(),
        remote: git::remote_url(path)?,
        overview: readme::readme_overview(path, settings.overview_length)?,
        license: readme::detect_license(path)?,
    })
}
