//! Per-day story lists stored as `<base>/<DD.MM.YY>.json`

use super::flat_list::{fetch_story_files, slice_page, ListCache};
use super::{FeedSource, PageRequest};
use crate::error::{FeedError, FeedResult};
use crate::models::{MediaItem, Page};
use crate::query::{date_key, FeedQuery};
use async_trait::async_trait;
use regex_lite::Regex;
use std::sync::LazyLock;

static OWNER_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^/]+)/([^/]+)/").expect("owner segment pattern is valid")
});

/// Owner of a bucket file: the second directory of `<root>/<owner>/<file>`
pub fn owner_from_key(key: &str) -> Option<&str> {
    OWNER_SEGMENT
        .captures(key)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

/// Date feed backed by one static JSON file per day
pub struct DateBucketSource {
    client: reqwest::Client,
    base_url: String,
    cache: ListCache,
}

impl DateBucketSource {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url,
            cache: ListCache::new(),
        }
    }
}

#[async_trait]
impl FeedSource for DateBucketSource {
    async fn fetch_page(&self, request: &PageRequest) -> FeedResult<Page> {
        let key = match &request.query {
            FeedQuery::ByDate(date) => date_key(*date),
            FeedQuery::ByProfile(_) => {
                return Err(FeedError::ConfigError(
                    "Date-bucket source only serves date queries".to_string(),
                ))
            }
        };
        let key = key.as_str();

        let items = self
            .cache
            .get_or_fetch(request.generation, key, move || async move {
                let files = fetch_story_files(&self.client, &self.base_url, key).await?;
                Ok(files
                    .iter()
                    .map(|file| {
                        MediaItem::from_key(file, owner_from_key(file).unwrap_or_default())
                    })
                    .collect())
            })
            .await?;

        slice_page(&items, request.cursor.as_ref(), request.page_size)
    }
}
