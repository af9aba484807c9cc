use crate::models::{MediaItem, MediaKind};
use serde::{Deserialize, Serialize};

/// Which media kinds are shown; a view predicate, never touches loading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterState {
    pub show_photos: bool,
    pub show_videos: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            show_photos: true,
            show_videos: true,
        }
    }
}

impl FilterState {
    pub fn allows(&self, kind: MediaKind) -> bool {
        match kind {
            MediaKind::Photo => self.show_photos,
            MediaKind::Video => self.show_videos,
        }
    }

    pub fn toggle_photos(&mut self) {
        self.show_photos = !self.show_photos;
    }

    pub fn toggle_videos(&mut self) {
        self.show_videos = !self.show_videos;
    }
}

/// The visible window: loaded items passing the filter, in load order
pub fn visible_window(items: &[MediaItem], filter: &FilterState) -> Vec<MediaItem> {
    items
        .iter()
        .filter(|item| filter.allows(item.kind))
        .cloned()
        .collect()
}
