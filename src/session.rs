//! UI-independent gallery session
//!
//! Bundles the request coordinator with the purely local view state (media
//! filter, thumbnail zoom, scroll trigger). A UI layer forwards its events
//! here and renders [`FeedSession::visible_window`].

use crate::caption;
use crate::config::FeedConfig;
use crate::coordinator::RequestCoordinator;
use crate::error::{FeedError, FeedResult};
use crate::filter::FilterState;
use crate::models::MediaItem;
use crate::pagination::LoadOutcome;
use crate::query::{self, FeedQuery};
use crate::trigger::{ScrollTrigger, ViewportMetrics};
use crate::zoom::ThumbnailZoom;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct ViewState {
    filter: FilterState,
    zoom: ThumbnailZoom,
    trigger: ScrollTrigger,
}

/// Snapshot of everything a gallery screen needs to draw its chrome
#[derive(Debug, Clone, PartialEq)]
pub struct FeedStatus {
    pub query: Option<FeedQuery>,
    pub generation: u64,
    pub loading: bool,
    pub exhausted: bool,
    pub loaded: usize,
    pub visible: usize,
    pub last_error: Option<FeedError>,
}

#[derive(Clone)]
pub struct FeedSession {
    coordinator: RequestCoordinator,
    view: Arc<Mutex<ViewState>>,
}

/// Two handles are equal when they drive the same session
impl PartialEq for FeedSession {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.view, &other.view)
    }
}

impl FeedSession {
    pub fn new(coordinator: RequestCoordinator, config: &FeedConfig) -> Self {
        Self {
            coordinator,
            view: Arc::new(Mutex::new(ViewState {
                filter: FilterState::default(),
                zoom: ThumbnailZoom::default(),
                trigger: ScrollTrigger::new(config.boundary_margin_px),
            })),
        }
    }

    pub fn from_config(config: &FeedConfig) -> FeedResult<Self> {
        Ok(Self::new(RequestCoordinator::from_config(config)?, config))
    }

    fn view(&self) -> MutexGuard<'_, ViewState> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn coordinator(&self) -> &RequestCoordinator {
        &self.coordinator
    }

    /// Initial mount: shows yesterday's stories
    pub async fn open(&self) -> FeedResult<LoadOutcome> {
        self.set_query(FeedQuery::ByDate(query::yesterday())).await
    }

    pub async fn select_date(&self, date: NaiveDate) -> FeedResult<LoadOutcome> {
        self.set_query(FeedQuery::ByDate(date)).await
    }

    pub async fn select_profile(&self, profile_id: impl Into<String>) -> FeedResult<LoadOutcome> {
        self.set_query(FeedQuery::ByProfile(profile_id.into())).await
    }

    /// Replaces the feed with `query` and loads its first page
    pub async fn set_query(&self, query: FeedQuery) -> FeedResult<LoadOutcome> {
        self.view().trigger.reset();
        let outcome = self.coordinator.switch_query(query).await;
        self.view().trigger.rearm();
        outcome
    }

    /// Scroll, resize and layout reports from the UI. Loads the next page
    /// when the boundary enters view.
    pub async fn on_viewport(&self, metrics: ViewportMetrics) -> FeedResult<LoadOutcome> {
        let fired = self.view().trigger.observe(metrics);
        if !fired {
            return Ok(LoadOutcome::Skipped);
        }

        let outcome = self.coordinator.load_more().await;
        if !matches!(outcome, Ok(LoadOutcome::Skipped)) {
            self.view().trigger.rearm();
        }
        outcome
    }

    /// Explicit "load more" or retry affordance, bypassing the trigger
    pub async fn load_more(&self) -> FeedResult<LoadOutcome> {
        let outcome = self.coordinator.load_more().await;
        self.view().trigger.rearm();
        outcome
    }

    pub async fn retry(&self, max_retries: u32) -> FeedResult<LoadOutcome> {
        let outcome = self.coordinator.load_more_with_retry(max_retries).await;
        self.view().trigger.rearm();
        outcome
    }

    /// Loaded items passing the current filter, in load order
    pub fn visible_window(&self) -> Vec<MediaItem> {
        let filter = self.filter();
        self.coordinator
            .with_state(|state| state.window().visible(&filter))
    }

    pub fn filter(&self) -> FilterState {
        self.view().filter
    }

    pub fn set_filter(&self, filter: FilterState) {
        self.view().filter = filter;
    }

    pub fn toggle_photos(&self) -> FilterState {
        let mut view = self.view();
        view.filter.toggle_photos();
        view.filter
    }

    pub fn toggle_videos(&self) -> FilterState {
        let mut view = self.view();
        view.filter.toggle_videos();
        view.filter
    }

    pub fn thumbnail_width(&self) -> u32 {
        self.view().zoom.width()
    }

    pub fn zoom(&self) -> ThumbnailZoom {
        self.view().zoom
    }

    pub fn zoom_in(&self) -> u32 {
        self.view().zoom.zoom_in()
    }

    pub fn zoom_out(&self) -> u32 {
        self.view().zoom.zoom_out()
    }

    /// Caption of an item in the context of the current query
    pub fn label(&self, item: &MediaItem) -> String {
        let query = self.coordinator.query();
        caption::item_label(item, query.as_ref().and_then(FeedQuery::profile))
    }

    pub fn status(&self) -> FeedStatus {
        let filter = self.filter();
        self.coordinator.with_state(|state| FeedStatus {
            query: state.query().cloned(),
            generation: state.generation(),
            loading: state.is_loading(),
            exhausted: state.is_exhausted(),
            loaded: state.loaded_items().len(),
            visible: state
                .loaded_items()
                .iter()
                .filter(|item| filter.allows(item.kind))
                .count(),
            last_error: state.last_error().cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfileSource;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FAR: ViewportMetrics = ViewportMetrics {
        scroll_top: 0.0,
        client_height: 800.0,
        scroll_height: 10_000.0,
    };
    const NEAR: ViewportMetrics = ViewportMetrics {
        scroll_top: 9_200.0,
        client_height: 800.0,
        scroll_height: 10_000.0,
    };

    async fn session_with(files: Vec<String>) -> (MockServer, FeedSession) {
        let _ = env_logger::builder().is_test(true).try_init();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/storiesJson/acme.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": files })))
            .mount(&server)
            .await;

        let config = FeedConfig {
            api_base_url: server.uri(),
            stories_path: format!("{}/storiesJson", server.uri()),
            profile_source: ProfileSource::FlatList,
            ..FeedConfig::default()
        };
        let session = FeedSession::from_config(&config).unwrap();
        (server, session)
    }

    fn mixed(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| {
                let ext = if i % 3 == 0 { "mp4" } else { "jpg" };
                format!("stories/acme/2024-03-05 at 10.{:02}.00 PM-{}.{}", i % 60, i, ext)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_scroll_loads_until_exhausted() {
        let (_server, session) = session_with(mixed(75)).await;
        session.select_profile("acme").await.unwrap();
        assert_eq!(session.status().loaded, 30);

        assert_eq!(session.on_viewport(FAR).await.unwrap(), LoadOutcome::Skipped);

        session.on_viewport(NEAR).await.unwrap();
        assert_eq!(session.status().loaded, 60);

        // boundary stays in view after the commit: re-armed, fires again
        session.on_viewport(NEAR).await.unwrap();
        let status = session.status();
        assert_eq!(status.loaded, 75);
        assert!(status.exhausted);

        assert_eq!(session.on_viewport(NEAR).await.unwrap(), LoadOutcome::Skipped);
        assert_eq!(session.status().loaded, 75);
    }

    #[tokio::test]
    async fn test_filter_never_touches_loaded_items() {
        let (_server, session) = session_with(mixed(30)).await;
        session.select_profile("acme").await.unwrap();
        let original = session.visible_window();
        assert_eq!(original.len(), 30);

        session.toggle_videos();
        let photos = session.visible_window();
        assert_eq!(photos.len(), 20);
        assert!(photos.iter().all(|item| !item.is_video()));
        assert_eq!(session.status().loaded, 30);

        session.toggle_videos();
        assert_eq!(session.visible_window(), original);
    }

    #[tokio::test]
    async fn test_filter_shrinking_window_can_trigger_load() {
        let (_server, session) = session_with(mixed(75)).await;
        session.select_profile("acme").await.unwrap();
        session.on_viewport(FAR).await.unwrap();
        assert_eq!(session.status().loaded, 30);

        session.set_filter(FilterState {
            show_photos: false,
            show_videos: true,
        });
        let short = ViewportMetrics::new(0.0, 800.0, 400.0);
        let outcome = session.on_viewport(short).await.unwrap();
        assert!(matches!(outcome, LoadOutcome::Appended { .. }));
        assert_eq!(session.status().loaded, 60);
    }

    #[tokio::test]
    async fn test_layout_reports_fill_short_window() {
        let (_server, session) = session_with(mixed(75)).await;
        session.select_profile("acme").await.unwrap();

        // grid shorter than the viewport: the container cannot scroll
        let short = ViewportMetrics::new(0.0, 2_000.0, 1_200.0);
        let outcome = session.on_viewport(short).await.unwrap();
        assert!(matches!(outcome, LoadOutcome::Appended { added: 30, .. }));

        let outcome = session.on_viewport(short).await.unwrap();
        assert_eq!(
            outcome,
            LoadOutcome::Appended {
                added: 15,
                exhausted: true
            }
        );

        assert_eq!(session.on_viewport(short).await.unwrap(), LoadOutcome::Skipped);
        assert_eq!(session.status().loaded, 75);
    }

    #[tokio::test]
    async fn test_labels_follow_query() {
        let (_server, session) = session_with(mixed(1)).await;
        session.select_profile("acme").await.unwrap();
        let item = &session.visible_window()[0];
        assert_eq!(session.label(item), "acme\n05/03 - 10:00");
    }

    #[tokio::test]
    async fn test_zoom_is_local() {
        let (_server, session) = session_with(mixed(5)).await;
        session.select_profile("acme").await.unwrap();
        let generation = session.status().generation;
        assert_eq!(session.zoom_in(), 220);
        assert_eq!(session.zoom_out(), 200);
        assert_eq!(session.zoom_out(), 180);
        assert_eq!(session.thumbnail_width(), 180);
        assert_eq!(session.status().generation, generation);
    }
}
