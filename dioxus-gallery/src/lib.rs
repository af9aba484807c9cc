use dioxus::prelude::*;
use std::rc::Rc;
use story_feed::{FeedResult, FeedSession, LoadOutcome, MediaItem, ViewportMetrics};

/// Turns storage keys into fetchable URLs
#[derive(Clone, PartialEq, Debug)]
pub struct MediaUrls {
    /// Prefix of every relative storage key
    pub base_url: String,
}

impl MediaUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Public S3 bucket holding the story files
    pub fn s3(bucket: &str, region: &str) -> Self {
        Self::new(format!("https://{}.s3.{}.amazonaws.com/", bucket, region))
    }

    fn join(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }

    /// Full URL of the item; absolute URLs pass through
    pub fn resolve(&self, item: &MediaItem) -> String {
        if is_absolute(&item.url) {
            item.url.clone()
        } else {
            self.join(&item.url)
        }
    }

    /// Poster frame of a video, stored next to the media as `thumbnails/<key>.jpg`
    pub fn poster(&self, item: &MediaItem) -> Option<String> {
        if !item.is_video() || is_absolute(&item.url) {
            return None;
        }
        Some(self.join(&format!(
            "thumbnails/{}.jpg",
            item.url.trim_start_matches('/')
        )))
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Whether a load changed what the gallery shows. Failures count: they
/// surface as the retry footer.
fn changes_view(outcome: &FeedResult<LoadOutcome>, action: &str) -> bool {
    match outcome {
        Ok(LoadOutcome::Skipped) => false,
        Ok(_) => true,
        Err(e) => {
            log::warn!("Gallery {} failed: {}", action, e);
            true
        }
    }
}

/// Reads the scroll geometry of a mounted container
async fn measure(container: Rc<MountedData>) -> Option<ViewportMetrics> {
    let offset = container.get_scroll_offset().await.ok()?;
    let size = container.get_scroll_size().await.ok()?;
    let rect = container.get_client_rect().await.ok()?;
    Some(ViewportMetrics::new(offset.y, rect.height(), size.height))
}

/// Infinite-scroll gallery over a [`FeedSession`]
///
/// The component only renders and forwards events. Loading, filtering and
/// zoom live in the session, so the parent can switch the feed at any time
/// with `select_date`/`select_profile`.
///
/// # Example
/// ```rust,ignore
/// FeedGallery {
///     session: session.clone(),
///     urls: MediaUrls::s3("my-bucket", "us-east-2"),
///     on_open: move |item: MediaItem| {
///         // Show the item in a viewer
///     },
/// }
/// ```
#[component]
pub fn FeedGallery(
    /// Session that owns the feed state
    session: FeedSession,
    /// Resolver for media and poster URLs
    urls: MediaUrls,
    /// Callback when the user clicks an item
    #[props(default)]
    on_open: Option<EventHandler<MediaItem>>,
) -> Element {
    // bumped after every state change the session made on our behalf
    let mut revision = use_signal(|| 0u64);
    let _ = revision();
    let mut container = use_signal(|| None::<Rc<MountedData>>);

    use_hook({
        let session = session.clone();
        move || {
            if session.coordinator().query().is_none() {
                spawn(async move {
                    if changes_view(&session.open().await, "open") {
                        revision += 1;
                    }
                });
            }
        }
    });

    // Re-measure after every re-layout (page appended, filter, zoom), so a
    // grid shorter than its container still reaches the scroll trigger.
    use_effect({
        let session = session.clone();
        move || {
            let _ = revision();
            let Some(node) = container() else {
                return;
            };
            let session = session.clone();
            spawn(async move {
                if let Some(metrics) = measure(node).await {
                    if changes_view(&session.on_viewport(metrics).await, "layout load") {
                        revision += 1;
                    }
                }
            });
        }
    });

    let status = session.status();
    let items = session.visible_window();
    let zoom = session.zoom();
    let filter = session.filter();
    let error_message = status.last_error.as_ref().map(|e| e.user_message());

    let grid_style = format!(
        "display: grid; grid-template-columns: repeat(auto-fill, minmax({}px, 1fr)); gap: 12px; padding: 12px;",
        zoom.width()
    );
    let photo_toggle_style = toggle_style(filter.show_photos);
    let video_toggle_style = toggle_style(filter.show_videos);
    let zoom_label = format!("{}px", zoom.width());

    rsx! {
        div {
            style: "display: flex; flex-direction: column; height: 100%;",
            // Toolbar
            div {
                style: "display: flex; align-items: center; gap: 8px; padding: 8px 12px; border-bottom: 1px solid #e0e0e0;",
                button {
                    style: "{photo_toggle_style}",
                    onclick: {
                        let session = session.clone();
                        move |_| {
                            session.toggle_photos();
                            revision += 1;
                        }
                    },
                    "Photos"
                }
                button {
                    style: "{video_toggle_style}",
                    onclick: {
                        let session = session.clone();
                        move |_| {
                            session.toggle_videos();
                            revision += 1;
                        }
                    },
                    "Videos"
                }
                div { style: "flex: 1;" }
                button {
                    style: "width: 32px; height: 32px; border-radius: 50%; border: 1px solid #ccc; background: white; cursor: pointer;",
                    disabled: !zoom.can_zoom_out(),
                    onclick: {
                        let session = session.clone();
                        move |_| {
                            session.zoom_out();
                            revision += 1;
                        }
                    },
                    "−"
                }
                span { style: "min-width: 48px; text-align: center; color: #666;", "{zoom_label}" }
                button {
                    style: "width: 32px; height: 32px; border-radius: 50%; border: 1px solid #ccc; background: white; cursor: pointer;",
                    disabled: !zoom.can_zoom_in(),
                    onclick: {
                        let session = session.clone();
                        move |_| {
                            session.zoom_in();
                            revision += 1;
                        }
                    },
                    "+"
                }
            }
            // Scrolling grid
            div {
                style: "flex: 1; overflow-y: auto;",
                onmounted: move |evt: MountedEvent| container.set(Some(evt.data())),
                onscroll: {
                    let session = session.clone();
                    move |evt: Event<ScrollData>| {
                        let metrics = ViewportMetrics::new(
                            evt.scroll_top() as f64,
                            evt.client_height() as f64,
                            evt.scroll_height() as f64,
                        );
                        let session = session.clone();
                        spawn(async move {
                            if changes_view(&session.on_viewport(metrics).await, "scroll load") {
                                revision += 1;
                            }
                        });
                    }
                },
                if status.exhausted && status.loaded == 0 {
                    div {
                        style: "padding: 24px; text-align: center; background: #f5f5f5; border-radius: 8px; color: #999; margin: 12px;",
                        "No media for this feed"
                    }
                } else if status.loaded > 0 && items.is_empty() {
                    div {
                        style: "padding: 24px; text-align: center; color: #999;",
                        "Nothing matches the current filter"
                    }
                }
                div {
                    style: "{grid_style}",
                    for item in items {
                        MediaTile {
                            key: "{item.id}",
                            src: urls.resolve(&item),
                            poster: urls.poster(&item),
                            label: session.label(&item),
                            item: item.clone(),
                            on_open: on_open,
                        }
                    }
                }
                // Footer: error with retry, spinner, or manual load
                if let Some(message) = error_message {
                    div {
                        style: "display: flex; flex-direction: column; align-items: center; gap: 8px; padding: 16px; color: #cc0000;",
                        "{message}"
                        button {
                            style: "padding: 8px 16px; background: #0066cc; color: white; border-radius: 8px; border: none; cursor: pointer;",
                            onclick: {
                                let session = session.clone();
                                move |_| {
                                    let session = session.clone();
                                    spawn(async move {
                                        changes_view(&session.retry(2).await, "retry");
                                        revision += 1;
                                    });
                                }
                            },
                            "Retry"
                        }
                    }
                } else if status.loading {
                    div { style: "padding: 16px; text-align: center; color: #666;", "Loading…" }
                } else if status.query.is_some() && !status.exhausted {
                    div {
                        style: "display: flex; justify-content: center; padding: 16px;",
                        button {
                            style: "padding: 8px 16px; background: #f5f5f5; border: 1px solid #ccc; border-radius: 8px; cursor: pointer;",
                            onclick: {
                                let session = session.clone();
                                move |_| {
                                    let session = session.clone();
                                    spawn(async move {
                                        changes_view(&session.load_more().await, "load more");
                                        revision += 1;
                                    });
                                }
                            },
                            "Load more"
                        }
                    }
                }
            }
        }
    }
}

fn toggle_style(active: bool) -> String {
    let (background, color) = if active {
        ("#0066cc", "white")
    } else {
        ("#f5f5f5", "#666")
    };
    format!(
        "padding: 6px 12px; border-radius: 16px; border: none; cursor: pointer; background: {}; color: {};",
        background, color
    )
}

/// Internal component for rendering a single photo or video
#[component]
fn MediaTile(
    item: MediaItem,
    src: String,
    poster: Option<String>,
    label: String,
    on_open: Option<EventHandler<MediaItem>>,
) -> Element {
    let open = {
        let item = item.clone();
        move |_: MouseEvent| {
            if let Some(handler) = &on_open {
                handler.call(item.clone());
            }
        }
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px;",
            if item.is_video() {
                video {
                    src: "{src}",
                    poster: poster.unwrap_or_default(),
                    controls: true,
                    preload: "none",
                    style: "width: 100%; aspect-ratio: 9/16; object-fit: cover; border-radius: 8px; background: #000; cursor: pointer;",
                    onclick: open.clone(),
                }
            } else {
                img {
                    src: "{src}",
                    style: "width: 100%; aspect-ratio: 9/16; object-fit: cover; border-radius: 8px; cursor: pointer;",
                    onclick: open,
                }
            }
            if !label.is_empty() {
                div {
                    style: "font-size: 12px; color: #666; white-space: pre-line;",
                    "{label}"
                }
            }
        }
    }
}
