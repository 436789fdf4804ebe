//! Export orchestration
//!
//! This module provides the core export logic, including:
//! - Assembling pages of history rows into completed items
//! - The retry driver that walks the feed
//! - Export coordination and the run summary

pub mod assembler;
pub mod coordinator;
pub mod driver;
pub mod summary;

pub use assembler::{BatchAssembler, BatchOutcome};
pub use coordinator::ExportCoordinator;
pub use driver::{backoff_delay, Harvest, RetryDriver};
pub use summary::ExportSummary;
