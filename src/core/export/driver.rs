//! Retry driver
//!
//! Walks the history feed window by window. Each window is fetched and
//! assembled; failures are retried with a linear backoff until the attempt
//! ceiling is reached, at which point the whole run fails. The loop is an
//! explicit state machine so every transition is visible in one place.

use super::assembler::{BatchAssembler, BatchOutcome};
use crate::adapters::feed::PageSource;
use crate::config::FetchConfig;
use crate::domain::{AttributeSchema, CompletedItem, CycleTimeError, FeedError, Result, StageSchema, Window};
use crate::{log_batch_processing, log_retry_attempt};
use std::time::Duration;
use tokio::sync::watch;

/// Everything collected by one successful run
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    /// Completed items in feed order
    pub items: Vec<CompletedItem>,

    /// Row count reported by the feed
    pub total_rows: usize,

    /// Pages fetched successfully
    pub pages: usize,

    /// Failed attempts that were retried
    pub retries: usize,
}

#[derive(Debug)]
enum DriverState {
    Fetching {
        window: Window,
        attempt: u32,
    },
    Succeeded {
        window: Window,
        rows: usize,
        outcome: BatchOutcome,
    },
    RetryWait {
        window: Window,
        attempt: u32,
        error: FeedError,
    },
    Failed {
        window: Window,
        attempts: u32,
        error: FeedError,
    },
    Done,
}

/// Delay before retrying after the given 1-based attempt failed
pub fn backoff_delay(attempt: u32, retry_delay_secs: u64) -> Duration {
    Duration::from_secs(u64::from(attempt).saturating_mul(retry_delay_secs.saturating_add(1)))
}

/// Drives a [`PageSource`] through the whole feed
pub struct RetryDriver<'a, S: PageSource + ?Sized> {
    source: &'a S,
    assembler: BatchAssembler<'a>,
    fetch: &'a FetchConfig,
}

impl<'a, S: PageSource + ?Sized> RetryDriver<'a, S> {
    pub fn new(
        source: &'a S,
        stages: &'a StageSchema,
        attributes: &'a AttributeSchema,
        fetch: &'a FetchConfig,
    ) -> Self {
        Self {
            source,
            assembler: BatchAssembler::new(stages, attributes),
            fetch,
        }
    }

    /// Fetch and assemble the whole feed
    ///
    /// # Errors
    ///
    /// - [`CycleTimeError::RetriesExhausted`] when a window fails `max_tries` times
    /// - [`CycleTimeError::Stalled`] when one item spans every row the feed returns
    /// - [`CycleTimeError::Interrupted`] when `shutdown` flips to `true`
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<Harvest> {
        let mut harvest = Harvest::default();
        let mut state = DriverState::Fetching {
            window: Window::new(0, self.fetch.batch_size),
            attempt: 1,
        };

        loop {
            state = match state {
                DriverState::Fetching { window, attempt } => {
                    if *shutdown.borrow() {
                        return Err(CycleTimeError::Interrupted);
                    }

                    tracing::info!(rows = %window, attempt, "Loading rows");

                    let result = tokio::select! {
                        result = self.source.fetch_page(window) => result,
                        _ = shutdown_requested(&mut shutdown) => {
                            return Err(CycleTimeError::Interrupted);
                        }
                    };

                    match result {
                        Ok(page) => {
                            harvest.pages += 1;
                            harvest.total_rows = page.total;
                            let outcome =
                                self.assembler.assemble(&page.rows, page.total, window.offset);
                            DriverState::Succeeded {
                                window,
                                rows: page.rows.len(),
                                outcome,
                            }
                        }
                        Err(error) if attempt < self.fetch.max_tries => DriverState::RetryWait {
                            window,
                            attempt,
                            error,
                        },
                        Err(error) => DriverState::Failed {
                            window,
                            attempts: attempt,
                            error,
                        },
                    }
                }

                DriverState::Succeeded {
                    window,
                    rows,
                    outcome,
                } => {
                    let next = self.next_window(window, rows, &outcome)?;

                    log_batch_processing!(window.offset + outcome.consumed, harvest.total_rows);
                    tracing::debug!(
                        items = outcome.items.len(),
                        consumed = outcome.consumed,
                        remaining = outcome.remaining,
                        "Assembled page"
                    );

                    harvest.items.extend(outcome.items);

                    match next {
                        Some(window) => DriverState::Fetching { window, attempt: 1 },
                        None => DriverState::Done,
                    }
                }

                DriverState::RetryWait {
                    window,
                    attempt,
                    error,
                } => {
                    let delay = backoff_delay(attempt, self.fetch.retry_delay_secs);
                    log_retry_attempt!(attempt, self.fetch.max_tries, error.to_string());
                    tracing::warn!(
                        rows = %window,
                        delay_secs = delay.as_secs(),
                        "Waiting before retry"
                    );
                    harvest.retries += 1;

                    tokio::select! {
                        _ = tokio::time::sleep(delay) => {}
                        _ = shutdown_requested(&mut shutdown) => {
                            return Err(CycleTimeError::Interrupted);
                        }
                    }

                    DriverState::Fetching {
                        window,
                        attempt: attempt + 1,
                    }
                }

                DriverState::Failed {
                    window,
                    attempts,
                    error,
                } => {
                    tracing::error!(rows = %window, attempts, error = %error, "Giving up on rows");
                    return Err(CycleTimeError::RetriesExhausted {
                        start: window.offset + 1,
                        end: window.end(),
                        attempts,
                    });
                }

                DriverState::Done => {
                    tracing::info!(
                        items = harvest.items.len(),
                        rows = harvest.total_rows,
                        pages = harvest.pages,
                        "Finished loading feed"
                    );
                    return Ok(harvest);
                }
            };
        }
    }

    /// Window to fetch after `window` returned `rows` rows, or `None` at the end
    fn next_window(
        &self,
        window: Window,
        rows: usize,
        outcome: &BatchOutcome,
    ) -> Result<Option<Window>> {
        if outcome.is_final() {
            return Ok(None);
        }

        let offset = window.offset + outcome.consumed;

        if outcome.consumed > 0 {
            let size = self.fetch.batch_size.min(outcome.remaining);
            return Ok(Some(Window::new(offset, size)));
        }

        // One item filled the whole page; widen until it fits
        let size = window.size.saturating_mul(2).min(outcome.remaining);
        if rows < window.size || size <= window.size {
            return Err(CycleTimeError::Stalled {
                row: window.offset + 1,
                rows,
            });
        }

        tracing::warn!(
            rows = %window,
            next_size = size,
            "Page holds a single unfinished item, widening window"
        );

        Ok(Some(Window::new(offset, size)))
    }
}

/// Resolves once shutdown is requested; never resolves if the sender is gone
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
