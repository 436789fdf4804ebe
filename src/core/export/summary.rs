//! Export summary and reporting
//!
//! This module defines the structure used to report the outcome of a run.

use crate::core::output::OutputFormat;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of an export operation
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Row count reported by the feed
    pub total_rows: usize,

    /// Pages fetched successfully
    pub pages_fetched: usize,

    /// Failed fetch attempts that were retried
    pub retries: usize,

    /// Items assembled from the feed
    pub items_assembled: usize,

    /// Items written to the output file
    pub items_written: usize,

    /// Items without any resolved stage date
    pub items_skipped: usize,

    /// Duration of the export
    pub duration: Duration,

    /// Where the export was written
    pub output_path: PathBuf,

    pub format: OutputFormat,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(output_path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            total_rows: 0,
            pages_fetched: 0,
            retries: 0,
            items_assembled: 0,
            items_written: 0,
            items_skipped: 0,
            duration: Duration::from_secs(0),
            output_path: output_path.into(),
            format,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Share of assembled items that made it into the export
    pub fn written_rate(&self) -> f64 {
        if self.items_assembled == 0 {
            return 100.0;
        }
        (self.items_written as f64 / self.items_assembled as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_rows = self.total_rows,
            pages = self.pages_fetched,
            retries = self.retries,
            items = self.items_assembled,
            written = self.items_written,
            skipped = self.items_skipped,
            duration_secs = self.duration.as_secs(),
            output = %self.output_path.display(),
            format = %self.format,
            "Export completed"
        );

        if self.items_skipped > 0 {
            tracing::debug!(
                skipped = self.items_skipped,
                "Items without any stage date were not exported"
            );
        }
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Export Summary")?;
        writeln!(f, "==============")?;
        writeln!(f, "Feed rows:       {}", self.total_rows)?;
        writeln!(f, "Pages fetched:   {}", self.pages_fetched)?;
        writeln!(f, "Retries:         {}", self.retries)?;
        writeln!(f, "Items assembled: {}", self.items_assembled)?;
        writeln!(f, "Items written:   {}", self.items_written)?;
        writeln!(f, "Items skipped:   {}", self.items_skipped)?;
        writeln!(f, "Duration:        {:.2}s", self.duration.as_secs_f64())?;
        write!(
            f,
            "Output:          {} ({})",
            self.output_path.display(),
            self.format
        )
    }
}
