use serde::{Deserialize, Serialize};

/// Photo or video, decided once when the item is created
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// Classifies a storage key by its file extension
    pub fn from_path(path: &str) -> Self {
        if path.to_ascii_lowercase().ends_with(".mp4") {
            MediaKind::Video
        } else {
            MediaKind::Photo
        }
    }
}

/// A single photo or video of a feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    /// Unique within one feed generation
    pub id: String,
    /// Storage key, relative to the media base URL
    pub url: String,
    pub kind: MediaKind,
    /// ISO timestamp for API items, the storage key for file-list items
    pub timestamp_or_filename: String,
    pub owner_label: String,
}

impl MediaItem {
    /// Builds an item from a flat-list storage key; the key doubles as id
    pub fn from_key(key: &str, owner_label: impl Into<String>) -> Self {
        Self {
            id: key.to_string(),
            url: key.to_string(),
            kind: MediaKind::from_path(key),
            timestamp_or_filename: key.to_string(),
            owner_label: owner_label.into(),
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// Position of the next page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Opaque token handed out by a cursor API
    Token(String),
    /// Offset into a list fetched up front
    Offset(usize),
}

/// One page of a feed; `cursor == None` means the feed is exhausted
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<MediaItem>,
    pub cursor: Option<Cursor>,
}

impl Page {
    pub fn is_last(&self) -> bool {
        self.cursor.is_none()
    }
}

/// Entry of `GET /api/profiles`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub instagram_id: String,
    #[serde(default)]
    pub id_profile: Option<String>,
}

/// Body of the flat-list endpoints (`<path>/<key>.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryFiles {
    pub files: Vec<String>,
}

/// Item as delivered by the cursor API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMediaItem {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: Option<MediaKind>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub profile_name: String,
}

impl From<ApiMediaItem> for MediaItem {
    fn from(item: ApiMediaItem) -> Self {
        let kind = item.kind.unwrap_or_else(|| MediaKind::from_path(&item.url));
        MediaItem {
            id: item.id,
            url: item.url,
            kind,
            timestamp_or_filename: item.timestamp,
            owner_label: item.profile_name,
        }
    }
}

/// Body of the cursor API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMediaPage {
    pub items: Vec<ApiMediaItem>,
    pub next_cursor: Option<String>,
}
