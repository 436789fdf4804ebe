//! HTTP client for the story history feed

use super::models::AssetList;
use super::query::FeedQuery;
use super::source::PageSource;
use crate::config::{CriteriaConfig, CycleTimeConfig, FetchConfig};
use crate::domain::{AttributeSchema, CycleTimeError, FeedError, Page, Result, Window};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// History feed client
///
/// Holds the connection settings and the parts of the configuration needed
/// to build queries and decode rows. One request per [`PageSource::fetch_page`]
/// call; retrying is left to the caller.
pub struct FeedClient {
    /// Instance URL, without a trailing slash
    domain: String,

    client: Client,

    /// Precomputed `Basic ...` header value
    authorization: String,

    criteria: CriteriaConfig,
    attributes: AttributeSchema,
}

impl FeedClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no password is available or the HTTP
    /// client cannot be built.
    pub fn new(config: &CycleTimeConfig, fetch: &FetchConfig) -> Result<Self> {
        let authorization = config.connection.authorization()?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(fetch.timeout_secs))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                CycleTimeError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            domain: config.connection.domain.trim_end_matches('/').to_string(),
            client,
            authorization,
            criteria: config.criteria.clone(),
            attributes: config.attributes.clone(),
        })
    }

    /// Query used for `window`
    pub fn query(&self, window: Window) -> FeedQuery {
        FeedQuery::build(&self.criteria, &self.attributes, window)
    }

    pub fn base_url(&self) -> &str {
        &self.domain
    }
}

#[async_trait]
impl PageSource for FeedClient {
    async fn fetch_page(&self, window: Window) -> std::result::Result<Page, FeedError> {
        let url = self.query(window).url(&self.domain);

        tracing::debug!(url = %url, window = %window, "Requesting history page");

        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("Authorization", &self.authorization)
            .send()
            .await
            .map_err(|e| FeedError::ConnectionFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(FeedError::RequestFailed {
                status: status.as_u16(),
                message: body,
            });
        }

        let list = resp
            .json::<AssetList>()
            .await
            .map_err(|e| FeedError::InvalidResponse(e.to_string()))?;

        if list.assets.is_empty() && window.size > 0 && window.offset < list.total {
            return Err(FeedError::EmptyPage {
                offset: window.offset,
                total: list.total,
            });
        }

        let rows = list
            .assets
            .into_iter()
            .map(|asset| asset.into_event(&self.attributes))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(
            rows = rows.len(),
            total = list.total,
            "Decoded history page"
        );

        Ok(Page::new(rows, list.total))
    }
}
