//! Export coordinator - main orchestrator for the export process
//!
//! Wires the history feed, the retry driver and the file writers together
//! for one run.

use super::driver::RetryDriver;
use super::summary::ExportSummary;
use crate::adapters::feed::{FeedClient, PageSource};
use crate::config::{CycleTimeConfig, FetchConfig};
use crate::core::output::{write_export, OutputFormat};
use crate::domain::Result;
use crate::{log_export_complete, log_export_start};
use std::path::Path;
use std::time::Instant;
use tokio::sync::watch;

/// Export coordinator
pub struct ExportCoordinator<S: PageSource = FeedClient> {
    config: CycleTimeConfig,
    fetch: FetchConfig,
    source: S,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator<FeedClient> {
    /// Create a coordinator that reads from the configured history feed
    pub fn new(
        config: CycleTimeConfig,
        fetch: FetchConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let source = FeedClient::new(&config, &fetch)?;
        Ok(Self::with_source(config, fetch, source, shutdown_signal))
    }
}

impl<S: PageSource> ExportCoordinator<S> {
    /// Create a coordinator over any page source
    pub fn with_source(
        config: CycleTimeConfig,
        fetch: FetchConfig,
        source: S,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            fetch,
            source,
            shutdown_signal,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Execute the export
    ///
    /// 1. Checks the output format, before any network activity
    /// 2. Loads and assembles the whole feed
    /// 3. Writes qualifying items to `output`
    /// 4. Returns the summary
    ///
    /// Nothing is written unless the whole feed loaded.
    pub async fn execute_export(&self, output: &Path) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let format = OutputFormat::from_path(output)?;

        log_export_start!(output.display(), format);

        let driver = RetryDriver::new(
            &self.source,
            &self.config.stages,
            &self.config.attributes,
            &self.fetch,
        );
        let harvest = driver.run(self.shutdown_signal.clone()).await?;

        let report = write_export(output, format, &harvest.items, &self.config)?;

        let mut summary = ExportSummary::new(output, format);
        summary.total_rows = harvest.total_rows;
        summary.pages_fetched = harvest.pages;
        summary.retries = harvest.retries;
        summary.items_assembled = harvest.items.len();
        summary.items_written = report.written;
        summary.items_skipped = report.skipped;

        let summary = summary.with_duration(start_time.elapsed());
        log_export_complete!(summary.items_written, summary.duration);
        summary.log_summary();

        Ok(summary)
    }
}
