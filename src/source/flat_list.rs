//! Sources that return the whole list of story files in one response
//!
//! The list is fetched once per generation, reversed once so the most recent
//! file comes first, cached, and then sliced page by page.

use super::{get_json, join_url, FeedSource, PageRequest};
use crate::error::{FeedError, FeedResult};
use crate::models::{Cursor, MediaItem, Page, StoryFiles};
use crate::query::FeedQuery;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

struct CachedList {
    generation: u64,
    key: String,
    items: Arc<Vec<MediaItem>>,
}

/// Holds the list of exactly one generation
#[derive(Default)]
pub(crate) struct ListCache {
    inner: Mutex<Option<CachedList>>,
}

impl ListCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the cached list for `(generation, key)` or fetches a fresh one.
    ///
    /// The lock is not held while fetching. A fetch for an older generation
    /// never replaces the list of a newer one.
    pub(crate) async fn get_or_fetch<F, Fut>(
        &self,
        generation: u64,
        key: &str,
        fetch: F,
    ) -> FeedResult<Arc<Vec<MediaItem>>>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = FeedResult<Vec<MediaItem>>>,
    {
        {
            let cached = self.inner.lock().await;
            if let Some(list) = cached.as_ref() {
                if list.generation == generation && list.key == key {
                    log::debug!("List cache hit for {} (generation {})", key, generation);
                    return Ok(Arc::clone(&list.items));
                }
            }
        }

        let mut items = fetch().await?;
        items.reverse();
        let items = Arc::new(items);

        let mut cached = self.inner.lock().await;
        let newer_cached = cached
            .as_ref()
            .map_or(false, |list| list.generation > generation);
        if !newer_cached {
            *cached = Some(CachedList {
                generation,
                key: key.to_string(),
                items: Arc::clone(&items),
            });
        }
        Ok(items)
    }
}

/// Cuts `[offset, offset + page_size)` out of a cached list
pub(crate) fn slice_page(
    items: &[MediaItem],
    cursor: Option<&Cursor>,
    page_size: usize,
) -> FeedResult<Page> {
    let offset = match cursor {
        None => 0,
        Some(Cursor::Offset(offset)) => *offset,
        Some(Cursor::Token(token)) => {
            return Err(FeedError::ConfigError(format!(
                "List source cannot resume from token cursor {:?}",
                token
            )))
        }
    };

    let start = offset.min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    let cursor = (end < items.len()).then_some(Cursor::Offset(end));

    Ok(Page {
        items: items[start..end].to_vec(),
        cursor,
    })
}

/// Downloads `<base>/<key>.json` and returns its file list
pub(crate) async fn fetch_story_files(
    client: &reqwest::Client,
    base_url: &str,
    key: &str,
) -> FeedResult<Vec<String>> {
    let url = join_url(base_url, &format!("{}.json", key));
    log::info!("Fetching story list {}", url);
    let data: StoryFiles = get_json(client.get(&url)).await?;
    Ok(data.files)
}

/// Profile feed backed by `<base>/<profileId>.json`
pub struct FlatListSource {
    client: reqwest::Client,
    base_url: String,
    cache: ListCache,
}

impl FlatListSource {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url,
            cache: ListCache::new(),
        }
    }
}

#[async_trait]
impl FeedSource for FlatListSource {
    async fn fetch_page(&self, request: &PageRequest) -> FeedResult<Page> {
        let profile_id = match &request.query {
            FeedQuery::ByProfile(profile_id) => profile_id.as_str(),
            FeedQuery::ByDate(_) => {
                return Err(FeedError::ConfigError(
                    "Flat-list source only serves profile queries".to_string(),
                ))
            }
        };

        let items = self
            .cache
            .get_or_fetch(request.generation, profile_id, move || async move {
                let files = fetch_story_files(&self.client, &self.base_url, profile_id).await?;
                Ok(files
                    .iter()
                    .map(|file| MediaItem::from_key(file, profile_id))
                    .collect())
            })
            .await?;

        slice_page(&items, request.cursor.as_ref(), request.page_size)
    }
}
