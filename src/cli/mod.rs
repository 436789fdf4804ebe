//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for cycletime using clap.

pub mod commands;

use crate::config::{LogRotation, LoggingConfig};
use clap::{Parser, Subcommand};

/// cycletime - work item stage history extractor
#[derive(Parser, Debug)]
#[command(name = "cycletime")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cycletime.yaml", env = "CYCLETIME_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CYCLETIME_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Also write JSON logs into this directory
    #[arg(long, env = "CYCLETIME_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Log file rotation (daily, hourly, never)
    #[arg(long, default_value = "daily")]
    pub log_rotation: LogRotation,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Logging settings derived from the global flags
    pub fn logging_config(&self) -> LoggingConfig {
        match &self.log_dir {
            Some(dir) => LoggingConfig::with_directory(dir.clone(), self.log_rotation),
            None => LoggingConfig::default(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export stage dates for every matching item to CSV or JSON
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Print the history query for the first page
    Query(commands::query::QueryArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
