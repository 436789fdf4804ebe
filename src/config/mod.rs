//! Configuration management for cycletime.
//!
//! # Overview
//!
//! cycletime reads a small section/key configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CYCLETIME_DOMAIN`, `CYCLETIME_USERNAME`, `CYCLETIME_PASSWORD` overrides
//! - Fixed vocabularies for sections, keys and attribute kinds, validated on load
//!
//! # Example Configuration
//!
//! ```text
//! ---
//! Connection:
//!     Domain: https://www7.v1host.com/Acme
//!     Username: analyst
//!     Password: ${CYCLETIME_V1_PASSWORD}
//! Criteria:
//!     Scopes: Mobile App, Web Portal
//!     Timeboxes: Sprint 1, Sprint 2
//! Workflow:
//!     Backlog: (None), Future, (Created)
//!     In Progress: In Progress
//!     Done: Done, Accepted
//! Attributes:
//!     Project: Scope
//!     Sprint: Timebox
//!     Feature: Theme
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cycletime::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cycletime.yaml")?;
//! println!("Domain: {}", config.connection.domain);
//! println!("Stages: {:?}", config.stages.names());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ConnectionConfig, CriteriaConfig, CycleTimeConfig, FetchConfig, LogRotation, LoggingConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
