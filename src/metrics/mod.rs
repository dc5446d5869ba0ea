//! Metrics parsers
//!
//! Pure functions that turn raw analyzer output into typed aggregates:
//! commit frequency by month, repository age, dominant language and
//! on-disk size.

pub mod age;
pub mod frequency;
pub mod languages;
pub mod size;

pub use age::{RepoAge, GIT_DATE_FORMAT};
pub use frequency::{MonthFrequency, Quarters};
pub use languages::{dominant_language, LanguageStats, Share};
pub use size::{directory_size, format_size};
