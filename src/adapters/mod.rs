//! External integrations
//!
//! - [`feed`] - the work-item history REST feed

pub mod feed;
