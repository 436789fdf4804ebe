//! Error context extension trait
//!
//! Lets library code attach a short description of what it was doing to an
//! error while staying on [`Result<T, CycleTimeError>`](crate::domain::Result).
//!
//! # Examples
//!
//! ```rust
//! use cycletime::domain::Result;
//! use cycletime::domain::context::ResultExt;
//!
//! fn read_output(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
//! }
//! ```

use crate::domain::errors::CycleTimeError;
use crate::domain::result::Result;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Add context computed only when an error occurs
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<CycleTimeError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| wrap(e.into(), context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

// Io and Export keep their variant so callers can still match on them
fn wrap(error: CycleTimeError, context: impl std::fmt::Display) -> CycleTimeError {
    match error {
        CycleTimeError::Io(message) => CycleTimeError::Io(format!("{context}: {message}")),
        CycleTimeError::Export(message) => CycleTimeError::Export(format!("{context}: {message}")),
        other => CycleTimeError::Other(format!("{context}: {other}")),
    }
}
