//! Domain error types
//!
//! This module defines the error hierarchy for cycletime. Errors never expose
//! third-party types; HTTP and decoding failures are flattened into
//! [`FeedError`] messages before they leave the adapter layer.

use thiserror::Error;

/// Main cycletime error type
///
/// This is the primary error type used throughout the application.
/// Only the binary decides whether an error aborts the process.
#[derive(Debug, Error)]
pub enum CycleTimeError {
    /// Configuration-related errors (fatal before any network activity)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// History feed errors (always treated as transient)
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// Export (output file) errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A window kept failing until the attempt ceiling was reached
    #[error("Rows {start}-{end} failed to load after {attempts} attempts")]
    RetriesExhausted {
        start: usize,
        end: usize,
        attempts: u32,
    },

    /// A single item spans every row the feed will return for one request
    #[error("No progress at row {row}: one item spans all {rows} rows returned")]
    Stalled { row: usize, rows: usize },

    /// The run was cancelled by a shutdown signal
    #[error("Export interrupted by shutdown signal")]
    Interrupted,

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// History feed errors
///
/// The feed gives no way to tell a bad request from a server hiccup, so the
/// retry driver treats every variant the same way.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network-level failure (DNS, connect, timeout)
    #[error("Failed to reach history feed: {0}")]
    ConnectionFailed(String),

    /// Non-success HTTP status
    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// Body could not be decoded
    #[error("Invalid response from feed: {0}")]
    InvalidResponse(String),

    /// The feed returned no rows for a window inside its reported total
    #[error("Feed returned no rows at offset {offset} (total {total})")]
    EmptyPage { offset: usize, total: usize },
}

// Conversion from std::io::Error
impl From<std::io::Error> for CycleTimeError {
    fn from(err: std::io::Error) -> Self {
        CycleTimeError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CycleTimeError {
    fn from(err: serde_json::Error) -> Self {
        CycleTimeError::Serialization(err.to_string())
    }
}
