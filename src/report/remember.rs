//! Remember report: where each repository lives upstream

use super::{Field, FieldKind, Record, RepoId};
use crate::error::ReportResult;
use crate::git;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RememberRecord {
    pub repo: String,
    /// Origin fetch URL, empty without an origin
    pub remote: String,
}

impl Record for RememberRecord {
    fn schema() -> Vec<Field<Self>> {
        vec![
            Field::new("Repo", FieldKind::Text, |r: &Self| r.repo.clone()),
            Field::new("Remote", FieldKind::Url, |r: &Self| r.remote.clone()),
        ]
    }
}

pub fn populate(repo: &RepoId) -> ReportResult<RememberRecord> {
    Ok(RememberRecord {
        repo: repo.name.clone(),
        remote: git::remote_url(&repo.path)?,
    })
}
