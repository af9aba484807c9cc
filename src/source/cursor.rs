//! Cursor-paginated JSON API
//!
//! `GET /api/media?date=<DD.MM.YY>&cursor=<token>&limit=<n>` and
//! `GET /api/profile-media?instagramId=<id>&cursor=<token>&limit=<n>`,
//! both answering `{ items, nextCursor }`.

use super::{get_json, join_url, FeedSource, PageRequest};
use crate::error::{FeedError, FeedResult};
use crate::models::{ApiMediaPage, Cursor, MediaItem, Page};
use crate::query::{date_key, FeedQuery};
use async_trait::async_trait;

pub struct CursorApiSource {
    client: reqwest::Client,
    api_base_url: String,
}

impl CursorApiSource {
    pub fn new(client: reqwest::Client, api_base_url: String) -> Self {
        Self {
            client,
            api_base_url,
        }
    }

    fn endpoint(&self, query: &FeedQuery) -> (String, (&'static str, String)) {
        match query {
            FeedQuery::ByDate(date) => (
                join_url(&self.api_base_url, "api/media"),
                ("date", date_key(*date)),
            ),
            FeedQuery::ByProfile(profile_id) => (
                join_url(&self.api_base_url, "api/profile-media"),
                ("instagramId", profile_id.clone()),
            ),
        }
    }
}

#[async_trait]
impl FeedSource for CursorApiSource {
    async fn fetch_page(&self, request: &PageRequest) -> FeedResult<Page> {
        let token = match &request.cursor {
            None => String::new(),
            Some(Cursor::Token(token)) => token.clone(),
            Some(Cursor::Offset(offset)) => {
                return Err(FeedError::ConfigError(format!(
                    "Cursor API cannot resume from offset {}",
                    offset
                )))
            }
        };

        let (url, (key_name, key_value)) = self.endpoint(&request.query);
        log::debug!(
            "GET {} {}={} cursor={:?} limit={}",
            url,
            key_name,
            key_value,
            token,
            request.page_size
        );

        let limit = request.page_size.to_string();
        let data: ApiMediaPage = get_json(self.client.get(&url).query(&[
            (key_name, key_value.as_str()),
            ("cursor", token.as_str()),
            ("limit", limit.as_str()),
        ]))
        .await?;

        Ok(Page {
            items: data.items.into_iter().map(MediaItem::from).collect(),
            cursor: data
                .next_cursor
                .filter(|next| !next.is_empty())
                .map(Cursor::Token),
        })
    }
}
