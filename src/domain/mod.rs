//! Domain models and types for cycletime.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ItemId`], [`LinkId`])
//! - **Workflow configuration** ([`StageSchema`], [`AttributeSchema`])
//! - **Records** ([`RawEvent`], [`CompletedItem`], [`Page`], [`Window`])
//! - **Error types** ([`CycleTimeError`], [`FeedError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, CycleTimeError>`]:
//!
//! ```rust
//! use cycletime::domain::{CycleTimeError, Result};
//!
//! fn example() -> Result<()> {
//!     let _config = cycletime::config::load_config("cycletime.yaml")?;
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod errors;
pub mod ids;
pub mod item;
pub mod page;
pub mod result;
pub mod workflow;

// Re-export commonly used types for convenience
pub use errors::{CycleTimeError, FeedError};
pub use ids::{ItemId, LinkId};
pub use item::{CompletedItem, RawEvent};
pub use page::{Page, Window};
pub use result::Result;
pub use workflow::{Attribute, AttributeField, AttributeSchema, StageSchema, StageSchemaBuilder};
