//! Hacker News item source implementation.

use async_trait::async_trait;
use hn_core::{Item, ItemId, ItemSource, SourceError};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::HackerNewsConfig;
use crate::retry::RetryPolicy;
use crate::wire::HackerNewsItem;

/// An item source backed by the Hacker News Firebase API.
///
/// Lists come from `/v0/newstories.json`, items from `/v0/item/{id}.json`.
/// Items that do not exist, are not stories, or are dead or deleted resolve
/// to `None`; only transport and protocol failures are errors.
pub struct HackerNewsClient {
    /// Underlying HTTP client (connection pool, timeout, user agent).
    http: reqwest::Client,
    /// The client configuration.
    config: HackerNewsConfig,
    /// Retry policy for transient failures.
    retry: RetryPolicy,
}

impl HackerNewsClient {
    /// Creates a new client.
    pub fn new(config: HackerNewsConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| SourceError::unavailable(format!("failed to build HTTP client: {}", e)))?;

        let retry = RetryPolicy::new(
            config.max_retries(),
            config.retry_base_delay(),
            config.retry_jitter(),
        );

        debug!(
            base_url = %config.base_url(),
            timeout_secs = config.timeout().as_secs(),
            "Hacker News client configured"
        );

        Ok(Self {
            http,
            config,
            retry,
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &HackerNewsConfig {
        &self.config
    }

    /// GETs `url` and decodes the JSON body. A JSON `null` body decodes to `None`.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, SourceError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, self.config.timeout()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::status(status.as_u16(), url));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(e, self.config.timeout()))?;

        serde_json::from_slice::<Option<T>>(&body)
            .map_err(|e| SourceError::decode(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl ItemSource for HackerNewsClient {
    async fn list_newest_ids(&self) -> Result<Vec<ItemId>, SourceError> {
        let url = self.config.endpoint("newstories.json");
        let url = url.as_str();

        info!("Fetching newest story IDs from {}", url);

        let ids = self
            .retry
            .run("list_newest_ids", move || self.fetch_json::<Vec<ItemId>>(url))
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch newest story IDs"))?
            .unwrap_or_default();

        info!(count = ids.len(), "Retrieved newest story IDs");
        Ok(ids)
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<Item>, SourceError> {
        let url = self.config.endpoint(&format!("item/{}.json", id));
        let url = url.as_str();

        let fetched = self
            .retry
            .run("get_item", move || self.fetch_json::<HackerNewsItem>(url))
            .await;

        let wire = match fetched {
            Ok(Some(wire)) => wire,
            Ok(None) => {
                debug!(item_id = id, "Item body was null");
                return Ok(None);
            },
            Err(SourceError::Status { status: 404, .. }) => {
                debug!(item_id = id, "Item not found (404)");
                return Ok(None);
            },
            Err(e) => {
                error!(item_id = id, error = %e, "Failed to fetch item");
                return Err(e);
            },
        };

        if let Some(reason) = wire.rejection() {
            debug!(item_id = id, reason = reason, "Item filtered out");
            return Ok(None);
        }

        Ok(wire.into_story())
    }

    fn name(&self) -> &str {
        "hacker-news"
    }
}

/// Classifies a reqwest error into a [`SourceError`] kind.
pub fn map_reqwest_error(error: reqwest::Error, timeout: Duration) -> SourceError {
    if error.is_timeout() {
        SourceError::Timeout {
            seconds: timeout.as_secs(),
        }
    } else if error.is_decode() {
        SourceError::decode(error.to_string())
    } else if let Some(status) = error.status() {
        SourceError::status(
            status.as_u16(),
            error.url().map(|u| u.to_string()).unwrap_or_default(),
        )
    } else {
        SourceError::http(error.to_string())
    }
}
