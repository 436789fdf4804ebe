//! Core business logic for cycletime.
//!
//! # Modules
//!
//! - [`export`] - Batch assembly, the retry driver and export coordination
//! - [`reconcile`] - Per-stage date reconciliation
//! - [`output`] - CSV and JSON writers
//!
//! # Export Workflow
//!
//! 1. **Fetch**: Request a window of history rows from the feed
//! 2. **Assemble**: Group rows by item, holding back an item that may continue
//! 3. **Reconcile**: Pick one date per stage for each finished item
//! 4. **Advance**: Start the next window at the first unconsumed row
//! 5. **Write**: Render qualifying items and move the file into place
//!
//! # Example
//!
//! ```rust,no_run
//! use cycletime::config::{load_config, FetchConfig};
//! use cycletime::core::export::ExportCoordinator;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cycletime.yaml")?;
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let coordinator = ExportCoordinator::new(config, FetchConfig::default(), shutdown_rx)?;
//! let summary = coordinator.execute_export(Path::new("data.csv")).await?;
//!
//! println!("Written: {}", summary.items_written);
//! println!("Skipped: {}", summary.items_skipped);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod output;
pub mod reconcile;
