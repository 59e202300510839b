//! Ingestion error types.

use pledge_traits::TraitError;
use thiserror::Error;

/// Errors that abort a whole upload.
///
/// Problems confined to a single row never surface here; they are
/// collected as [`RowError`](crate::RowError)s in the report.
#[derive(Error, Debug)]
pub enum IngestError {
    /// One or more required columns are absent from the header row.
    #[error("Missing required columns: {}", .missing.join(", "))]
    Schema {
        /// Display names of every missing field.
        missing: Vec<String>,
    },

    /// The file could not be decoded or read as CSV.
    #[error("Malformed file: {0}")]
    Malformed(String),

    /// The store rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(#[from] TraitError),
}

impl IngestError {
    /// Creates a malformed file error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;
