//! Error types for benchmark ingestion and report generation.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while ingesting runs or writing reports.
#[derive(Debug)]
pub enum ReportError {
    /// I/O error opening, reading or writing a file.
    Io {
        /// File the operation was acting on.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// A run file whose name yields no usable series name.
    InvalidFileName(PathBuf),
    /// A row that does not have the `test,param,value` shape or does not
    /// parse under the active mode.
    MalformedRow {
        /// Name of the input (usually the file path).
        input: String,
        /// 1-based line number of the offending row.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },
    /// CSV decoding or encoding error.
    Csv {
        /// File the operation was acting on.
        path: PathBuf,
        /// Underlying error.
        source: csv::Error,
    },
    /// Invalid report configuration.
    Config(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::InvalidFileName(path) => {
                write!(f, "cannot derive a series name from {}", path.display())
            }
            Self::MalformedRow { input, line, reason } => {
                write!(f, "{input}:{line}: malformed row: {reason}")
            }
            Self::Csv { path, source } => write!(f, "{}: CSV error: {source}", path.display()),
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ReportError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Attach a path to an I/O error.
pub(crate) fn io_at(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> ReportError {
    let path = path.into();
    move |source| ReportError::Io { path, source }
}
