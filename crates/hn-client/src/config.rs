//! Hacker News client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the Hacker News client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HackerNewsConfig {
    /// API base URL, always ending in `/v0/`.
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout", with = "secs_serde")]
    timeout: Duration,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    user_agent: String,

    /// Retries after the first attempt for transient failures.
    #[serde(default = "default_max_retries")]
    max_retries: u32,

    /// Delay before the first retry; doubles on each further retry.
    #[serde(default = "default_retry_base_delay", with = "millis_serde")]
    retry_base_delay: Duration,

    /// Upper bound of the random delay added to each backoff.
    #[serde(default = "default_retry_jitter", with = "millis_serde")]
    retry_jitter: Duration,
}

fn default_base_url() -> String {
    normalize_base_url("https://hacker-news.firebaseio.com/v0/")
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    format!("hn-feed/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_base_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_retry_jitter() -> Duration {
    Duration::from_millis(100)
}

/// Normalizes a base URL so that it ends with `/v0/`.
///
/// `https://host`, `https://host/` and `https://host/v0` all become
/// `https://host/v0/`.
pub fn normalize_base_url(url: &str) -> String {
    let mut base = url.trim().trim_end_matches('/').to_string();
    if !base.ends_with("/v0") {
        base.push_str("/v0");
    }
    base.push('/');
    base
}

impl HackerNewsConfig {
    /// Creates a new builder for HackerNewsConfig.
    pub fn builder() -> HackerNewsConfigBuilder {
        HackerNewsConfigBuilder::default()
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the User-Agent header value.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the number of retries for transient failures.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the delay before the first retry.
    pub fn retry_base_delay(&self) -> Duration {
        self.retry_base_delay
    }

    /// Returns the maximum random jitter added to each retry delay.
    pub fn retry_jitter(&self) -> Duration {
        self.retry_jitter
    }

    /// Returns the URL of an endpoint relative to the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for HackerNewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            max_retries: default_max_retries(),
            retry_base_delay: default_retry_base_delay(),
            retry_jitter: default_retry_jitter(),
        }
    }
}

/// Builder for HackerNewsConfig.
#[derive(Debug, Default)]
pub struct HackerNewsConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    max_retries: Option<u32>,
    retry_base_delay: Option<Duration>,
    retry_jitter: Option<Duration>,
}

impl HackerNewsConfigBuilder {
    /// Sets the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the number of retries for transient failures.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets the delay before the first retry.
    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = Some(delay);
        self
    }

    /// Sets the maximum random jitter added to retry delays.
    pub fn retry_jitter(mut self, jitter: Duration) -> Self {
        self.retry_jitter = Some(jitter);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an http(s) URL or the timeout is zero.
    pub fn build(self) -> Result<HackerNewsConfig, &'static str> {
        let base_url = match self.base_url {
            Some(url) => {
                let trimmed = url.trim();
                if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                    return Err("base_url must be an http(s) URL");
                }
                normalize_base_url(trimmed)
            },
            None => default_base_url(),
        };

        let timeout = self.timeout.unwrap_or_else(default_timeout);
        if timeout.is_zero() {
            return Err("timeout must be greater than zero");
        }

        Ok(HackerNewsConfig {
            base_url,
            timeout,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
            max_retries: self.max_retries.unwrap_or_else(default_max_retries),
            retry_base_delay: self
                .retry_base_delay
                .unwrap_or_else(default_retry_base_delay),
            retry_jitter: self.retry_jitter.unwrap_or_else(default_retry_jitter),
        })
    }
}

mod secs_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

mod millis_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
