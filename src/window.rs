use crate::filter::FilterState;
use crate::models::MediaItem;
use std::collections::HashSet;

/// Append-only list of the items loaded for one generation, unique by id
#[derive(Debug, Clone, Default)]
pub struct WindowStore {
    items: Vec<MediaItem>,
    seen: HashSet<String>,
}

impl WindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends items in order, skipping ids that are already present.
    /// Returns how many items were actually added.
    pub fn append(&mut self, items: Vec<MediaItem>) -> usize {
        let before = self.items.len();
        for item in items {
            if self.seen.insert(item.id.clone()) {
                self.items.push(item);
            } else {
                log::debug!("Skipping duplicate item {}", item.id);
            }
        }
        self.items.len() - before
    }

    /// Drops everything; only used when the generation changes
    pub fn clear(&mut self) {
        self.items.clear();
        self.seen.clear();
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Loaded items passing the filter, in load order
    pub fn visible(&self, filter: &FilterState) -> Vec<MediaItem> {
        crate::filter::visible_window(&self.items, filter)
    }
}
