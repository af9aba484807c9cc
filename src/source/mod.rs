//! Backend adapters
//!
//! Every backend shape (cursor API, flat file list, per-date file list) is
//! reduced to one contract: [`FeedSource::fetch_page`] returns the next
//! [`Page`] for a query and a cursor.

pub mod cursor;
pub mod date_bucket;
pub mod flat_list;

pub use cursor::CursorApiSource;
pub use date_bucket::DateBucketSource;
pub use flat_list::FlatListSource;

use crate::config::{DateSource, FeedConfig, ProfileSource};
use crate::error::{FeedError, FeedResult};
use crate::models::{Cursor, Page};
use crate::query::FeedQuery;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Everything a source needs to produce one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// Generation the request was issued for; list caches are scoped to it
    pub generation: u64,
    pub query: FeedQuery,
    /// `None` asks for the first page
    pub cursor: Option<Cursor>,
    pub page_size: usize,
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> FeedResult<Page>;
}

/// Dispatches date queries and profile queries to their own sources
pub struct SourceRouter {
    by_date: Arc<dyn FeedSource>,
    by_profile: Arc<dyn FeedSource>,
}

impl SourceRouter {
    pub fn new(by_date: Arc<dyn FeedSource>, by_profile: Arc<dyn FeedSource>) -> Self {
        Self {
            by_date,
            by_profile,
        }
    }

    /// Wires the HTTP sources selected in the config
    pub fn from_config(config: &FeedConfig) -> FeedResult<Self> {
        config.validate()?;
        let client = config.http_client()?;

        let by_date: Arc<dyn FeedSource> = match config.date_source {
            DateSource::Cursor => Arc::new(CursorApiSource::new(
                client.clone(),
                config.api_base_url.clone(),
            )),
            DateSource::Bucket => Arc::new(DateBucketSource::new(
                client.clone(),
                config.stories_path.clone(),
            )),
        };
        let by_profile: Arc<dyn FeedSource> = match config.profile_source {
            ProfileSource::FlatList => Arc::new(FlatListSource::new(
                client.clone(),
                config.stories_path.clone(),
            )),
            ProfileSource::Cursor => {
                Arc::new(CursorApiSource::new(client, config.api_base_url.clone()))
            }
        };

        Ok(Self::new(by_date, by_profile))
    }
}

#[async_trait]
impl FeedSource for SourceRouter {
    async fn fetch_page(&self, request: &PageRequest) -> FeedResult<Page> {
        match request.query {
            FeedQuery::ByDate(_) => self.by_date.fetch_page(request).await,
            FeedQuery::ByProfile(_) => self.by_profile.fetch_page(request).await,
        }
    }
}

/// GETs a URL and decodes the JSON body, keeping transport and shape errors apart
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> FeedResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| FeedError::FetchError(format!("Request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(FeedError::FetchError(format!(
            "Server returned status: {}",
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FeedError::FetchError(format!("Failed to read response: {}", e)))?;

    serde_json::from_str(&body)
        .map_err(|e| FeedError::ParseError(format!("Failed to parse response: {}", e)))
}

/// Joins a base URL and a path segment with exactly one slash
pub(crate) fn join_url(base: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaItem, MediaKind};
    use chrono::NaiveDate;

    struct Fixed(&'static str);

    #[async_trait]
    impl FeedSource for Fixed {
        async fn fetch_page(&self, _request: &PageRequest) -> FeedResult<Page> {
            Ok(Page {
                items: vec![MediaItem::from_key(self.0, self.0)],
                cursor: None,
            })
        }
    }

    fn request(query: FeedQuery) -> PageRequest {
        PageRequest {
            generation: 1,
            query,
            cursor: None,
            page_size: 10,
        }
    }

    #[tokio::test]
    async fn test_router_dispatches_on_query_kind() {
        let router = SourceRouter::new(Arc::new(Fixed("date")), Arc::new(Fixed("profile")));

        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let page = router
            .fetch_page(&request(FeedQuery::ByDate(date)))
            .await
            .unwrap();
        assert_eq!(page.items[0].id, "date");

        let page = router
            .fetch_page(&request(FeedQuery::ByProfile("acme".into())))
            .await
            .unwrap();
        assert_eq!(page.items[0].id, "profile");
        assert_eq!(page.items[0].kind, MediaKind::Photo);
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h/", "/a.json"), "http://h/a.json");
        assert_eq!(join_url("/storiesJson", "acme.json"), "/storiesJson/acme.json");
    }

    #[test]
    fn test_router_from_default_config() {
        assert!(SourceRouter::from_config(&FeedConfig::default()).is_ok());
    }
}
