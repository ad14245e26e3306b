//! Error types for file loading.

use thiserror::Error;

use super::loader::FileFormat;

/// Errors that can occur while turning a file into a dataset.
///
/// None of these are fatal: the caller reports them and keeps whatever
/// dataset it already had.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Extension is neither `.csv` nor `.json`.
    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),

    /// The file content could not be parsed.
    #[error("Error parsing {format} file: {reason}")]
    ParseFailure { format: FileFormat, reason: String },

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for loading operations
pub type LoadResult<T> = Result<T, LoadError>;

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::ParseFailure {
            format: FileFormat::Json,
            reason: e.to_string(),
        }
    }
}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        LoadError::ParseFailure {
            format: FileFormat::Csv,
            reason: e.to_string(),
        }
    }
}
