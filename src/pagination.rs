//! Pagination state machine of one feed query
//!
//! Transitions: [`PaginationState::reset`] starts a new generation,
//! [`PaginationState::begin_load`] claims the single fetch slot,
//! [`PaginationState::commit_page`] / [`PaginationState::commit_error`]
//! release it. Commits tagged with an older generation are ignored.

use crate::error::FeedError;
use crate::models::{Cursor, MediaItem, Page};
use crate::query::FeedQuery;
use crate::window::WindowStore;

/// Handed out by `begin_load`; carries everything the fetch needs
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    pub generation: u64,
    pub query: FeedQuery,
    /// `None` asks for the first page
    pub cursor: Option<Cursor>,
    pub first_page: bool,
}

/// Result of a load attempt
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A page was committed
    Appended { added: usize, exhausted: bool },
    /// Valid response, but the query has no items at all
    EmptyResult,
    /// The response belonged to a superseded generation and was dropped
    Stale,
    /// Nothing was started: a load is running or the feed is exhausted
    Skipped,
}

#[derive(Debug, Default)]
pub struct PaginationState {
    generation: u64,
    query: Option<FeedQuery>,
    window: WindowStore,
    cursor: Option<Cursor>,
    exhausted: bool,
    loading: bool,
    pages_committed: usize,
    last_error: Option<FeedError>,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation for `query` and drops everything loaded so far
    pub fn reset(&mut self, query: FeedQuery) -> u64 {
        self.generation += 1;
        log::info!("Feed reset to {} (generation {})", query, self.generation);
        self.query = Some(query);
        self.window.clear();
        self.cursor = None;
        self.exhausted = false;
        self.loading = false;
        self.pages_committed = 0;
        self.last_error = None;
        self.generation
    }

    /// Claims the fetch slot. Returns `None` while loading, once exhausted,
    /// or before any query was set.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.loading || self.exhausted {
            return None;
        }
        let query = self.query.clone()?;
        self.loading = true;
        self.last_error = None;
        Some(LoadTicket {
            generation: self.generation,
            query,
            cursor: self.cursor.clone(),
            first_page: self.pages_committed == 0,
        })
    }

    pub fn commit_page(&mut self, generation: u64, page: Page) -> LoadOutcome {
        if generation != self.generation {
            log::debug!(
                "Dropping stale page of generation {} (current {})",
                generation,
                self.generation
            );
            return LoadOutcome::Stale;
        }

        let first_page = self.pages_committed == 0;
        let added = self.window.append(page.items);
        self.exhausted = page.cursor.is_none();
        self.cursor = page.cursor;
        self.loading = false;
        self.pages_committed += 1;

        log::debug!(
            "Committed page {} of generation {}: +{} items, {} total, exhausted={}",
            self.pages_committed,
            generation,
            added,
            self.window.len(),
            self.exhausted
        );

        if first_page && self.exhausted && self.window.is_empty() {
            LoadOutcome::EmptyResult
        } else {
            LoadOutcome::Appended {
                added,
                exhausted: self.exhausted,
            }
        }
    }

    /// Releases the fetch slot after a failure. The error comes back for the
    /// current generation; stale errors are swallowed.
    pub fn commit_error(
        &mut self,
        generation: u64,
        error: FeedError,
    ) -> Result<LoadOutcome, FeedError> {
        if generation != self.generation {
            log::debug!(
                "Dropping stale error of generation {}: {}",
                generation,
                error
            );
            return Ok(LoadOutcome::Stale);
        }
        log::warn!("Load failed for generation {}: {}", generation, error);
        self.loading = false;
        self.last_error = Some(error.clone());
        Err(error)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> Option<&FeedQuery> {
        self.query.as_ref()
    }

    pub fn loaded_items(&self) -> &[MediaItem] {
        self.window.items()
    }

    pub fn window(&self) -> &WindowStore {
        &self.window
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error of the last failed load of this generation, if not retried yet
    pub fn last_error(&self) -> Option<&FeedError> {
        self.last_error.as_ref()
    }

    pub fn pages_committed(&self) -> usize {
        self.pages_committed
    }
}
