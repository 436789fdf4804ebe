// cycletime - Work item stage history extractor
// Copyright (c) 2025 Cycletime Contributors
// Licensed under the MIT License

//! # cycletime - work item cycle-time extraction
//!
//! cycletime reads the status-change history of stories from a
//! VersionOne-style REST feed and reports, for every story, the date it
//! entered each stage of a configured workflow.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Querying** the paged `Hist/Story` feed with scope, timebox and theme filters
//! - **Assembling** rows into items across page boundaries without losing rows
//! - **Reconciling** repeated and out-of-order status changes into one date per stage
//! - **Exporting** the result as CSV or JSON
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Batch assembly, reconciliation, the retry driver and writers
//! - [`adapters`] - The history feed client
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration file parsing
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cycletime::config::{load_config, FetchConfig};
//! use cycletime::core::export::ExportCoordinator;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("cycletime.yaml")?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let coordinator = ExportCoordinator::new(config, FetchConfig::default(), shutdown_rx)?;
//!     let summary = coordinator.execute_export(Path::new("data.csv")).await?;
//!
//!     println!("Exported {} items", summary.items_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Reconciliation
//!
//! Stories move backwards (reopened, sent back for rework), so a stage can be
//! entered several times. For each stage the earliest date that is not older
//! than anything seen in an earlier stage wins:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cycletime::core::reconcile::reconcile;
//!
//! let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
//! let resolved = reconcile(&[vec![d("2024-01-01")], vec![d("2024-01-05"), d("2024-01-03")]]);
//! assert_eq!(resolved, vec![Some(d("2024-01-01")), Some(d("2024-01-03"))]);
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::CycleTimeError`]; only the binary turns
//! errors into exit codes.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
