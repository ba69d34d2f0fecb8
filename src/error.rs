//! Structured error types for sparefind.

use crate::schema::Field;

/// All errors that can occur while loading stock files or exporting requests.
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    /// A required logical column could not be resolved from the source headers.
    #[error("missing required column `{field}`; accepted headers: {}", .aliases.join(", "))]
    Schema {
        field: Field,
        aliases: Vec<&'static str>,
    },

    /// Unrecognized source file extension.
    #[error("unsupported file type: {0}")]
    Format(String),

    /// XML parsing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StockError>;

impl From<String> for StockError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for StockError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
