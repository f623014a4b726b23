//! Error types for report outputs.

use thiserror::Error;

/// Errors that can occur when writing a report to an output.
///
/// Tracker operations never fail; only emission to an [`Output`](crate::Output)
/// can.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Writing the destination failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
