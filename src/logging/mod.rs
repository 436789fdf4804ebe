//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output on stderr
//! - Configurable log levels, overridable through `RUST_LOG`
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use cycletime::logging::init_logging;
//! use cycletime::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of an export operation
///
/// # Example
///
/// ```no_run
/// use cycletime::log_export_start;
///
/// log_export_start!("data.csv", "csv");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($output:expr, $format:expr) => {
        tracing::info!(
            output = %$output,
            format = %$format,
            "Starting export"
        );
    };
}

/// Log the completion of an export operation
///
/// # Example
///
/// ```no_run
/// use cycletime::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(42, Duration::from_secs(10));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use cycletime::log_error_with_context;
/// use cycletime::domain::CycleTimeError;
///
/// let error = CycleTimeError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log progress through the feed
///
/// # Example
///
/// ```no_run
/// use cycletime::log_batch_processing;
///
/// log_batch_processing!(100, 1000);
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($current:expr, $total:expr) => {{
        let current = $current;
        let total = $total;
        tracing::debug!(
            current,
            total,
            progress_pct = if total == 0 {
                100.0
            } else {
                current as f64 / total as f64 * 100.0
            },
            "Processing batch"
        );
    }};
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use cycletime::log_retry_attempt;
///
/// log_retry_attempt!(2, 5, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
