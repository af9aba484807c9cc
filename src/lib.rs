//! # Story Feed
//!
//! Incremental media feed engine for story galleries.
//!
//! A feed is the ordered list of photos and videos of one day or of one
//! profile. The engine loads it page by page while the user scrolls and
//! keeps the shown list consistent when the user switches feeds mid-load:
//! - Backend adapters for a cursor API and for per-key JSON file lists
//! - Generation-tagged loads; results of an abandoned query are dropped
//! - Append-only window deduplicated by item id
//! - Local photo/video filter and thumbnail zoom that never refetch
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use story_feed::{FeedConfig, FeedSession, ViewportMetrics};
//!
//! let config = FeedConfig::load("feed.toml")?;
//! let session = FeedSession::from_config(&config)?;
//!
//! session.open().await?;
//! session.select_profile("acme").await?;
//! session
//!     .on_viewport(ViewportMetrics::new(9_200.0, 800.0, 10_000.0))
//!     .await?;
//!
//! for item in session.visible_window() {
//!     println!("{}", session.label(&item));
//! }
//! ```

pub mod caption;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod filter;
pub mod models;
pub mod pagination;
pub mod profiles;
pub mod query;
pub mod session;
pub mod source;
pub mod trigger;
pub mod window;
pub mod zoom;

pub use config::{DateSource, FeedConfig, ProfileSource};
pub use coordinator::RequestCoordinator;
pub use error::{FeedError, FeedResult};
pub use filter::FilterState;
pub use models::{Cursor, MediaItem, MediaKind, Page, Profile};
pub use pagination::{LoadOutcome, LoadTicket, PaginationState};
pub use profiles::{search_profiles, ProfileDirectory};
pub use query::FeedQuery;
pub use session::{FeedSession, FeedStatus};
pub use source::{FeedSource, PageRequest, SourceRouter};
pub use trigger::{ScrollTrigger, ViewportMetrics};
pub use window::WindowStore;
pub use zoom::ThumbnailZoom;
