//! Repository age in calendar years and months

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Datelike, NaiveDate};

use crate::error::{ErrorContext, ReportError};

/// Timestamp layout produced by `git log --format=%ci`
pub const GIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Elapsed time since the first commit, rendered as `"<years>y <months>m"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepoAge {
    pub years: u32,
    pub months: u32,
}

impl RepoAge {
    pub fn from_months(total: u32) -> Self {
        Self { years: total / 12, months: total % 12 }
    }

    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }

    /// Calendar difference between two dates, ignoring the day of month.
    ///
    /// A month difference below zero borrows one year. A `first` date after
    /// `today` yields zero.
    pub fn between(first: NaiveDate, today: NaiveDate) -> Self {
        let mut years = today.year() - first.year();
        let mut months = today.month() as i32 - first.month() as i32;
        if months < 0 {
            years -= 1;
            months += 12;
        }
        if years < 0 {
            return Self::default();
        }
        Self { years: years as u32, months: months as u32 }
    }

    /// Age from `git log --reverse --format=%ci` output, oldest commit first
    pub fn from_git_log(reversed_log: &str, today: NaiveDate) -> Result<Self, ReportError> {
        let first = reversed_log.lines().next().map(str::trim).unwrap_or("");
        if first.is_empty() {
            return Err(ReportError::data(
                "repo_age",
                "no commit dates found in the repository",
                ErrorContext::new(),
            ));
        }
        let date = DateTime::parse_from_str(first, GIT_DATE_FORMAT).map_err(|e| {
            ReportError::data(
                "repo_age",
                format!("unparseable first commit date: {}", e),
                ErrorContext::new().with("date", first),
            )
        })?;
        Ok(Self::between(date.date_naive(), today))
    }
}

impl fmt::Display for RepoAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y {}m", self.years, self.months)
    }
}

impl FromStr for RepoAge {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || {
            ReportError::data(
                "parse_age",
                "expected an age of the form '<years>y <months>m'",
                ErrorContext::new().with("age", s),
            )
        };
        let mut tokens = s.split_whitespace();
        let (Some(year_token), Some(month_token), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(malformed());
        };
        let years = year_token
            .strip_suffix('y')
            .and_then(|y| y.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        let months = month_token
            .strip_suffix('m')
            .and_then(|m| m.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        Ok(Self { years, months })
    }
}
