//! Story history feed adapter
//!
//! This module provides the query builder, wire models and HTTP client for the
//! `rest-1.v1/Hist/Story` endpoint, plus the [`PageSource`] seam the export
//! driver is written against.

pub mod client;
pub mod models;
pub mod query;
pub mod source;

pub use client::FeedClient;
pub use models::{Asset, AssetList};
pub use query::FeedQuery;
pub use source::PageSource;
