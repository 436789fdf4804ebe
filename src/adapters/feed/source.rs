//! Page source trait definition
//!
//! `PageSource` abstracts how one window of history rows is obtained, so the
//! retry driver can be run against the HTTP client or an in-memory feed.

use crate::domain::{FeedError, Page, Window};
use async_trait::async_trait;

/// Trait for anything that can serve windows of the history feed
///
/// Implementations perform a single attempt per call. Every error is treated
/// as transient by the caller.
///
/// # Example
///
/// ```no_run
/// use cycletime::adapters::feed::{FeedClient, PageSource};
/// use cycletime::config::{load_config, FetchConfig};
/// use cycletime::domain::Window;
///
/// # async fn example() -> cycletime::domain::Result<()> {
/// let config = load_config("cycletime.yaml")?;
/// let client = FeedClient::new(&config, &FetchConfig::default())?;
///
/// let page = client.fetch_page(Window::new(0, 1000)).await?;
/// println!("{} of {} rows", page.rows.len(), page.total);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the rows in `window` plus the feed's total row count
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError`] for network failures, non-success statuses,
    /// undecodable bodies, or an empty page inside the feed's bounds.
    async fn fetch_page(&self, window: Window) -> Result<Page, FeedError>;
}
