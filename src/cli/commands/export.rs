//! Export command implementation
//!
//! This module implements the `export` command, which walks the whole history
//! feed and writes one row of stage dates per item.

use super::exit_code;
use crate::adapters::feed::FeedClient;
use crate::config::schema::{
    default_batch_size, default_max_tries, default_retry_delay_secs, default_timeout_secs,
};
use crate::config::{load_config, FetchConfig};
use crate::core::export::ExportCoordinator;
use crate::core::output::OutputFormat;
use crate::domain::Window;
use clap::Args;
use std::path::PathBuf;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file; the extension (.csv or .json) selects the format
    #[arg(short, long, default_value = "data.csv")]
    pub output: PathBuf,

    /// Rows requested per page
    #[arg(long, env = "CYCLETIME_BATCH_SIZE", default_value_t = default_batch_size())]
    pub batch_size: usize,

    /// Attempts per page before giving up
    #[arg(long, env = "CYCLETIME_MAX_TRIES", default_value_t = default_max_tries())]
    pub max_tries: u32,

    /// Base retry delay in seconds
    #[arg(long, env = "CYCLETIME_RETRY_DELAY", default_value_t = default_retry_delay_secs())]
    pub retry_delay: u64,

    /// HTTP request timeout in seconds
    #[arg(long, env = "CYCLETIME_TIMEOUT", default_value_t = default_timeout_secs())]
    pub timeout: u64,

    /// Print the first-page query before exporting
    #[arg(long)]
    pub show_query: bool,
}

impl ExportArgs {
    /// Fetch settings from the command line
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            batch_size: self.batch_size,
            max_tries: self.max_tries,
            retry_delay_secs: self.retry_delay,
            timeout_secs: self.timeout,
        }
    }

    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting export command");

        let format = match OutputFormat::from_path(&self.output) {
            Ok(format) => format,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let fetch = self.fetch_config();
        if let Err(e) = fetch.validate() {
            tracing::error!(error = %e, "Invalid fetch settings");
            eprintln!("❌ {e}");
            return Ok(2);
        }

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(exit_code(&e));
            }
        };

        let coordinator = match ExportCoordinator::new(config, fetch, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("❌ Failed to initialize export: {e}");
                return Ok(exit_code(&e));
            }
        };

        if self.show_query {
            print_query(coordinator.source(), self.batch_size);
        }

        println!("🚀 Exporting to {} ({format})", self.output.display());

        let summary = match coordinator.execute_export(&self.output).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("❌ Export failed: {e}");
                return Ok(exit_code(&e));
            }
        };

        println!();
        println!("{summary}");
        println!();
        println!("✅ Export completed successfully!");

        Ok(0)
    }
}

fn print_query(client: &FeedClient, batch_size: usize) {
    let query = client.query(Window::new(0, batch_size));
    println!("{}", query.url(client.base_url()));
    println!("{}", query.display_url(client.base_url()));
    println!();
}
