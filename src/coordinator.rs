//! Decides which fetch results still matter
//!
//! Every fetch is tagged with the generation that was current when it was
//! started. Switching the query bumps the generation first, so anything still
//! in flight for the old query commits as [`LoadOutcome::Stale`] and is
//! dropped. Nothing is physically aborted.

use crate::config::FeedConfig;
use crate::error::{FeedError, FeedResult};
use crate::models::{MediaItem, Page};
use crate::pagination::{LoadOutcome, LoadTicket, PaginationState};
use crate::query::FeedQuery;
use crate::source::{FeedSource, PageRequest, SourceRouter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Clone)]
pub struct RequestCoordinator {
    state: Arc<Mutex<PaginationState>>,
    source: Arc<dyn FeedSource>,
    page_size: usize,
    initial_page_size: usize,
    request_timeout: Duration,
}

impl RequestCoordinator {
    pub fn new(source: Arc<dyn FeedSource>, config: &FeedConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(PaginationState::new())),
            source,
            page_size: config.page_size_for(false),
            initial_page_size: config.page_size_for(true),
            request_timeout: config.request_timeout(),
        }
    }

    /// Coordinator over the HTTP sources selected in the config
    pub fn from_config(config: &FeedConfig) -> FeedResult<Self> {
        let router = SourceRouter::from_config(config)?;
        Ok(Self::new(Arc::new(router), config))
    }

    /// Overrides the caller-level timeout applied around every fetch
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn state(&self) -> MutexGuard<'_, PaginationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read access to the pagination state
    pub fn with_state<R>(&self, f: impl FnOnce(&PaginationState) -> R) -> R {
        f(&self.state())
    }

    /// Starts a new generation for `query`; in-flight results become stale
    pub fn set_query(&self, query: FeedQuery) -> u64 {
        self.state().reset(query)
    }

    pub fn begin_load(&self) -> Option<LoadTicket> {
        self.state().begin_load()
    }

    /// Runs the fetch for a ticket under the caller-level timeout.
    /// Does not touch the pagination state.
    pub async fn fetch(&self, ticket: &LoadTicket) -> FeedResult<Page> {
        let request = PageRequest {
            generation: ticket.generation,
            query: ticket.query.clone(),
            cursor: ticket.cursor.clone(),
            page_size: if ticket.first_page {
                self.initial_page_size
            } else {
                self.page_size
            },
        };

        match tokio::time::timeout(self.request_timeout, self.source.fetch_page(&request)).await {
            Ok(result) => result,
            Err(_) => Err(FeedError::TimeoutError(self.request_timeout)),
        }
    }

    /// Commits a fetch result for the generation it was started in
    pub fn commit(&self, generation: u64, result: FeedResult<Page>) -> FeedResult<LoadOutcome> {
        let mut state = self.state();
        match result {
            Ok(page) => Ok(state.commit_page(generation, page)),
            Err(error) => state.commit_error(generation, error),
        }
    }

    /// One full `begin_load -> fetch -> commit` cycle
    pub async fn load_more(&self) -> FeedResult<LoadOutcome> {
        let Some(ticket) = self.begin_load() else {
            return Ok(LoadOutcome::Skipped);
        };
        let result = self.fetch(&ticket).await;
        self.commit(ticket.generation, result)
    }

    /// Resets to `query` and loads its first page
    pub async fn switch_query(&self, query: FeedQuery) -> FeedResult<LoadOutcome> {
        self.set_query(query);
        self.load_more().await
    }

    /// Like `load_more`, retrying retryable failures with jittered backoff.
    /// Gives up silently once the query changes.
    pub async fn load_more_with_retry(&self, max_retries: u32) -> FeedResult<LoadOutcome> {
        let generation = self.generation();
        let mut retries = 0;

        loop {
            match self.load_more().await {
                Err(e) if e.is_retryable() && retries < max_retries => {
                    retries += 1;
                    let backoff = calculate_backoff(retries);
                    log::warn!(
                        "Feed load failed (attempt {}/{}): {}. Retrying in {}ms...",
                        retries,
                        max_retries + 1,
                        e,
                        backoff.as_millis()
                    );
                    tokio::time::sleep(backoff).await;
                    if self.generation() != generation {
                        return Ok(LoadOutcome::Stale);
                    }
                }
                other => return other,
            }
        }
    }

    pub fn generation(&self) -> u64 {
        self.state().generation()
    }

    pub fn query(&self) -> Option<FeedQuery> {
        self.state().query().cloned()
    }

    /// Copy of the loaded items of the current generation
    pub fn loaded_items(&self) -> Vec<MediaItem> {
        self.state().loaded_items().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    pub fn is_exhausted(&self) -> bool {
        self.state().is_exhausted()
    }

    pub fn last_error(&self) -> Option<FeedError> {
        self.state().last_error().cloned()
    }
}

/// Exponential backoff with full jitter: up to 250ms, 500ms, 1s, 2s, 4s
fn calculate_backoff(retry: u32) -> Duration {
    use rand::Rng;

    let base_ms = 250u64 * (1 << retry.saturating_sub(1).min(4));
    Duration::from_millis(rand::rng().random_range(0..=base_ms))
}
