//! Stats report: activity, age, size and dominant language

use log::debug;

use super::{Field, FieldKind, Record, RepoId, ReportSettings};
use crate::error::ReportResult;
use crate::git;
use crate::metrics::{directory_size, format_size, languages, MonthFrequency, RepoAge};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsRecord {
    pub repo: String,
    pub commits: u32,
    /// `"<years>y <months>m"`
    pub age: String,
    /// `"<language> <line share>%"`
    pub language: String,
    pub lines: u64,
    pub files: u64,
    pub size: String,
    pub remote: String,
    pub frequency: MonthFrequency,
    /// Mean commits per month of age, filled by [`Record::derive`]
    pub mean: u32,
    pub q1: u32,
    pub q2: u32,
    pub q3: u32,
    pub q4: u32,
}

impl Record for StatsRecord {
    fn schema() -> Vec<Field<Self>> {
        vec![
            Field::new("Repo", FieldKind::Text, |r: &Self| r.repo.clone()),
            Field::new("Commits", FieldKind::Count, |r: &Self| r.commits.to_string()),
            Field::new("Age", FieldKind::Age, |r: &Self| r.age.clone()),
            Field::new("Language", FieldKind::Language, |r: &Self| r.language.clone()),
            Field::new("Lines", FieldKind::Count, |r: &Self| r.lines.to_string()),
            Field::new("Files", FieldKind::Count, |r: &Self| r.files.to_string()),
            Field::new("Size", FieldKind::Size, |r: &Self| r.size.clone()),
            Field::new("Remote", FieldKind::Url, |r: &Self| r.remote.clone()),
            Field::new("Frequency", FieldKind::Months, |r: &Self| r.frequency.to_string()),
            Field::new("Mean", FieldKind::Count, |r: &Self| r.mean.to_string()),
            Field::new("Q1", FieldKind::Count, |r: &Self| r.q1.to_string()),
            Field::new("Q2", FieldKind::Count, |r: &Self| r.q2.to_string()),
            Field::new("Q3", FieldKind::Count, |r: &Self| r.q3.to_string()),
            Field::new("Q4", FieldKind::Count, |r: &Self| r.q4.to_string()),
        ]
    }

    /// Mean commits per month and the four quarterly totals of `year`.
    ///
    /// The mean truncates; an age of zero months gives a mean of zero.
    fn derive(&mut self, year: i32) -> ReportResult<()> {
        let months = self.age.parse::<RepoAge>()?.total_months();
        self.mean = if months > 0 { self.commits / months } else { 0 };
        let quarters = self.frequency.quarterly(year);
        self.q1 = quarters.q1;
        self.q2 = quarters.q2;
        self.q3 = quarters.q3;
        self.q4 = quarters.q4;
        Ok(())
    }
}

/// Collect stats for one repository
pub fn populate(repo: &RepoId, settings: &ReportSettings) -> ReportResult<StatsRecord> {
    let path = repo.path.as_path();
    debug!("Collecting stats for {}", repo.name);

    let code = languages::code_statistics(path)?;
    let age = git::repository_age(path, settings.today)?;
    let commits = git::commit_count(path)?;
    let remote = git::remote_url(path)?;
    let size = format_size(directory_size(path)?);
    let frequency = git::commit_frequency(path, settings.year)?;

    Ok(StatsRecord {
        repo: repo.name.clone(),
        commits,
        age: age.to_string(),
        language: code.label(),
        lines: code.lines.count,
        files: code.files.count,
        size,
        remote,
        frequency,
        ..StatsRecord::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(commits: u32, first_commit: &str, today: &str) -> StatsRecord {
        let first = NaiveDate::parse_from_str(first_commit, "%Y-%m-%d").unwrap();
        let today = NaiveDate::parse_from_str(today, "%Y-%m-%d").unwrap();
        StatsRecord {
            repo: "repo".to_string(),
            commits,
            age: RepoAge::between(first, today).to_string(),
            frequency: MonthFrequency::for_year(2025),
            ..StatsRecord::default()
        }
    }

    #[test]
    fn test_mean_commits_truncate() {
        let mut older = record(120, "2020-03-01", "2025-06-01");
        older.derive(2025).unwrap();
        assert_eq!(older.age, "5y 3m");
        assert_eq!(older.mean, 1);

        let mut younger = record(40, "2023-11-15", "2025-06-01");
        younger.derive(2025).unwrap();
        assert_eq!(younger.age, "1y 7m");
        assert_eq!(younger.mean, 2);
    }

    #[test]
    fn test_zero_month_age_has_zero_mean() {
        let mut fresh = record(15, "2025-06-10", "2025-06-20");
        fresh.derive(2025).unwrap();
        assert_eq!(fresh.age, "0y 0m");
        assert_eq!(fresh.mean, 0);
    }

    #[test]
    fn test_empty_year_gives_zero_quarters() {
        let mut stats = record(0, "2024-01-01", "2025-06-01");
        stats.frequency = MonthFrequency::from_git_log(2025, "");
        stats.derive(2025).unwrap();
        assert_eq!(stats.frequency.len(), 12);
        assert_eq!((stats.mean, stats.q1, stats.q2, stats.q3, stats.q4), (0, 0, 0, 0, 0));
    }

    #[test]
    fn test_quarters_written_back() {
        let mut stats = record(10, "2020-01-01", "2025-06-01");
        stats.frequency = MonthFrequency::from_git_log(
            2025,
            "2025-02-01 10:00:00 +0000\n2025-05-01 10:00:00 +0000\n2025-05-02 10:00:00 +0000\n2025-11-11 10:00:00 +0000\n",
        );
        stats.derive(2025).unwrap();
        assert_eq!((stats.q1, stats.q2, stats.q3, stats.q4), (1, 2, 0, 1));
    }

    #[test]
    fn test_malformed_age_fails_derive() {
        let mut stats = StatsRecord { age: "ancient".to_string(), ..StatsRecord::default() };
        assert!(stats.derive(2025).is_err());
    }

    #[test]
    fn test_schema_order() {
        let names: Vec<&str> = StatsRecord::schema().iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            ["Repo", "Commits", "Age", "Language", "Lines", "Files", "Size", "Remote", "Frequency", "Mean", "Q1", "Q2", "Q3", "Q4"]
        );
    }
}
