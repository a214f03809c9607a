//! Error types for the contact book.

use std::io;

/// Result type alias for contact book operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the contact book.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The database file could not be opened.
    #[error("Database Error: {0}")]
    Connection(String),

    /// Malformed input handed to the store.
    #[error("Invalid contact: {0}")]
    Validation(String),

    /// Listing position outside the current rows.
    #[error("No contact at row {position} (store has {len} rows)")]
    Index { position: usize, len: usize },

    /// Contact id does not exist.
    #[error("Contact #{0} not found")]
    NotFound(i64),

    /// Malformed metadata block in an import file.
    #[error("Parse error: {0}")]
    Parse(String),

    /// File access failure during import or export.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Database error after the connection was established.
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable machine-readable name of the error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Connection(_) => "ConnectionError",
            Error::Validation(_) => "ValidationError",
            Error::Index { .. } => "IndexError",
            Error::NotFound(_) => "NotFound",
            Error::Parse(_) => "ParseError",
            Error::Io(_) => "IOError",
            Error::Db(_) => "DatabaseError",
            Error::Json(_) => "JsonError",
        }
    }
}
