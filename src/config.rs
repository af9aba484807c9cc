use crate::error::{FeedError, FeedResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Backend used for `ByDate` queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// `/api/media?date=..&cursor=..&limit=..`
    Cursor,
    /// `<stories_path>/<DD.MM.YY>.json`
    Bucket,
}

/// Backend used for `ByProfile` queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    /// `<stories_path>/<profileId>.json`
    FlatList,
    /// `/api/profile-media?instagramId=..&cursor=..&limit=..`
    Cursor,
}

/// Configuration of the feed engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// Base URL of the JSON API (`/api/media`, `/api/profiles`)
    pub api_base_url: String,
    /// Base URL of the static per-key JSON files
    pub stories_path: String,
    pub date_source: DateSource,
    pub profile_source: ProfileSource,
    /// Page size of every "load more"
    pub page_size: usize,
    /// Size of the first page of a query, `page_size` if unset
    pub initial_page_size: Option<usize>,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Distance in px at which the scroll boundary counts as visible
    pub boundary_margin_px: f64,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            stories_path: "/storiesJson".to_string(),
            date_source: DateSource::Cursor,
            profile_source: ProfileSource::FlatList,
            page_size: 30,
            initial_page_size: None,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            boundary_margin_px: 20.0,
            user_agent: "StoryFeed/0.1.0".to_string(),
        }
    }
}

impl FeedConfig {
    /// Converts to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Parses and validates a TOML document; missing keys keep their defaults
    pub fn from_toml(s: &str) -> FeedResult<Self> {
        let config: FeedConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML config file
    pub fn load(path: impl AsRef<Path>) -> FeedResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FeedError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> FeedResult<()> {
        if self.page_size == 0 {
            return Err(FeedError::ConfigError("page_size must be positive".into()));
        }
        if self.initial_page_size == Some(0) {
            return Err(FeedError::ConfigError(
                "initial_page_size must be positive".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(FeedError::ConfigError(
                "request_timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Page size of the first page or of a follow-up page
    pub fn page_size_for(&self, first_page: bool) -> usize {
        if first_page {
            self.initial_page_size.unwrap_or(self.page_size)
        } else {
            self.page_size
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the shared HTTP client. Only the connect phase is bounded here;
    /// the whole request is bounded by the coordinator's `request_timeout`.
    pub fn http_client(&self) -> FeedResult<reqwest::Client> {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .tcp_keepalive(Duration::from_secs(30))
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| FeedError::ConfigError(format!("Client build failed: {}", e)))
    }
}
