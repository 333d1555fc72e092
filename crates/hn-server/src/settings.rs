//! Server settings loaded with the `config` crate.
//!
//! Sources, later ones winning:
//! 1. Built-in defaults
//! 2. An optional file, `hn-feed.{toml,yaml,json}` or the path in `HN_FEED_CONFIG`
//! 3. Environment variables such as `HN_FEED__SERVER__PORT=9000`
//!
//! `cors.allowed_origins` accepts a comma-separated list from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use hn_client::HackerNewsConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::cache::{TtlPolicy, TtlRange};
use crate::feed::{DEFAULT_MAX_CONCURRENCY, DEFAULT_SEARCH_WINDOW, EngineConfig};

/// Environment variable holding the settings file path.
pub const CONFIG_PATH_ENV: &str = "HN_FEED_CONFIG";

const DEFAULT_CONFIG_NAME: &str = "hn-feed";
const ENV_PREFIX: &str = "HN_FEED";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

impl SettingsError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub hacker_news: HackerNewsSettings,
    pub cache: CacheSettings,
    pub fetch: FetchSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Deadline for one `/api/stories/new` request.
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HackerNewsSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Defaults to `hn-feed/<version>`.
    pub user_agent: Option<String>,
    pub max_retries: u32,
}

impl Default for HackerNewsSettings {
    fn default() -> Self {
        let defaults = HackerNewsConfig::default();
        Self {
            base_url: defaults.base_url().to_string(),
            timeout_secs: defaults.timeout().as_secs(),
            user_agent: None,
            max_retries: defaults.max_retries(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheSettings {
    /// Must hold at least `fetch.search_window` items or searches evict their own window.
    pub max_items: u64,
    pub ids_ttl_min_secs: u64,
    pub ids_ttl_max_secs: u64,
    pub item_ttl_min_secs: u64,
    pub item_ttl_max_secs: u64,
    pub tombstone_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        let ttl = TtlPolicy::default();
        Self {
            max_items: EngineConfig::default().max_cached_items,
            ids_ttl_min_secs: ttl.ids.min.as_secs(),
            ids_ttl_max_secs: ttl.ids.max.as_secs(),
            item_ttl_min_secs: ttl.item.min.as_secs(),
            item_ttl_max_secs: ttl.item.max.as_secs(),
            tombstone_ttl_secs: ttl.tombstone.min.as_secs(),
        }
    }
}

impl CacheSettings {
    pub fn ttl_policy(&self) -> TtlPolicy {
        TtlPolicy {
            ids: secs_range(self.ids_ttl_min_secs, self.ids_ttl_max_secs),
            item: secs_range(self.item_ttl_min_secs, self.item_ttl_max_secs),
            tombstone: TtlRange::fixed(Duration::from_secs(self.tombstone_ttl_secs)),
        }
    }
}

fn secs_range(min: u64, max: u64) -> TtlRange {
    TtlRange::new(Duration::from_secs(min), Duration::from_secs(max))
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetchSettings {
    pub max_concurrency: usize,
    pub search_window: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            search_window: DEFAULT_SEARCH_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:4200".to_string()],
        }
    }
}

impl Settings {
    /// Loads from `$HN_FEED_CONFIG` (or `hn-feed.*`) and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_NAME.to_string());
        Self::load_from(&path)
    }

    /// Loads from the given file (optional) and the environment.
    pub fn load_from(path: &str) -> Result<Self, SettingsError> {
        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            );
        Self::from_builder(builder)
    }

    /// Deserializes and validates whatever sources `builder` holds.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.fetch.max_concurrency == 0 {
            return Err(SettingsError::invalid(
                "fetch.max_concurrency",
                "must be at least 1",
            ));
        }
        if self.fetch.search_window == 0 {
            return Err(SettingsError::invalid(
                "fetch.search_window",
                "must be at least 1",
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(SettingsError::invalid(
                "server.request_timeout_secs",
                "must be at least 1",
            ));
        }
        if self.cache.max_items == 0 {
            return Err(SettingsError::invalid("cache.max_items", "must be at least 1"));
        }
        if self.cache.max_items < self.fetch.search_window as u64 {
            return Err(SettingsError::invalid(
                "cache.max_items",
                format!(
                    "must be at least fetch.search_window ({})",
                    self.fetch.search_window
                ),
            ));
        }

        let ttl = self.cache.ttl_policy();
        for (field, range) in [
            ("cache.ids_ttl", ttl.ids),
            ("cache.item_ttl", ttl.item),
            ("cache.tombstone_ttl_secs", ttl.tombstone),
        ] {
            if !range.is_valid() {
                return Err(SettingsError::invalid(
                    field,
                    format!("invalid range {:?}..={:?}", range.min, range.max),
                ));
            }
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| SettingsError::invalid("server.host", format!("{}", e)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_concurrency: self.fetch.max_concurrency,
            search_window: self.fetch.search_window,
            ttl: self.cache.ttl_policy(),
            max_cached_items: self.cache.max_items,
        }
    }

    pub fn hacker_news_config(&self) -> Result<HackerNewsConfig, SettingsError> {
        let mut builder = HackerNewsConfig::builder()
            .base_url(&self.hacker_news.base_url)
            .timeout(Duration::from_secs(self.hacker_news.timeout_secs))
            .max_retries(self.hacker_news.max_retries);

        if let Some(user_agent) = &self.hacker_news.user_agent {
            builder = builder.user_agent(user_agent);
        }

        builder
            .build()
            .map_err(|message| SettingsError::invalid("hacker_news", message))
    }
}
