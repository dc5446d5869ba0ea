//! Report Error Types
//!
//! Every failure raised while building a report carries the name of the
//! operation that produced it plus ordered key/value context, so the message
//! printed at the top level is enough to locate the problem.

use std::fmt;
use thiserror::Error;

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Ordered key/value details attached to an error
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext(Vec<(String, String)>);

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a detail, keeping insertion order
    pub fn with<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        let pairs: Vec<String> = self.0.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        write!(f, " [{}]", pairs.join(", "))
    }
}

/// Error taxonomy for report generation
#[derive(Error, Debug)]
pub enum ReportError {
    /// Directory listing, file access or working-directory changes
    #[error("{operation}: {message}{context}")]
    Io {
        operation: &'static str,
        message: String,
        context: ErrorContext,
        #[source]
        source: std::io::Error,
    },

    /// An external command could not run or exited unsuccessfully
    #[error("{operation}: {message}{context}")]
    Process {
        operation: &'static str,
        message: String,
        context: ErrorContext,
    },

    /// Input that cannot be turned into a metric
    #[error("{operation}: {message}{context}")]
    Data {
        operation: &'static str,
        message: String,
        context: ErrorContext,
    },

    /// Report layout or configuration is inconsistent
    #[error("{operation}: configuration error: {message}{context}")]
    Config {
        operation: &'static str,
        message: String,
        context: ErrorContext,
    },

    /// Collecting a single repository failed
    #[error("{operation}: repository '{repository}' failed")]
    Repository {
        operation: &'static str,
        repository: String,
        #[source]
        source: Box<ReportError>,
    },
}

impl ReportError {
    pub fn io<S: Into<String>>(
        operation: &'static str,
        message: S,
        source: std::io::Error,
        context: ErrorContext,
    ) -> Self {
        Self::Io { operation, message: message.into(), context, source }
    }

    pub fn process<S: Into<String>>(operation: &'static str, message: S, context: ErrorContext) -> Self {
        Self::Process { operation, message: message.into(), context }
    }

    pub fn data<S: Into<String>>(operation: &'static str, message: S, context: ErrorContext) -> Self {
        Self::Data { operation, message: message.into(), context }
    }

    pub fn config<S: Into<String>>(operation: &'static str, message: S, context: ErrorContext) -> Self {
        Self::Config { operation, message: message.into(), context }
    }

    /// Attach the repository identifier to an error raised while collecting it
    pub fn for_repository<S: Into<String>>(operation: &'static str, repository: S, source: ReportError) -> Self {
        Self::Repository { operation, repository: repository.into(), source: Box::new(source) }
    }

    /// Name of the operation where the error originated
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Io { operation, .. }
            | Self::Process { operation, .. }
            | Self::Data { operation, .. }
            | Self::Config { operation, .. }
            | Self::Repository { operation, .. } => operation,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

impl From<csv::Error> for ReportError {
    fn from(e: csv::Error) -> Self {
        Self::io("write_csv", "failed to write CSV record", e.into(), ErrorContext::new())
    }
}
