//! Scroll proximity trigger
//!
//! The UI layer reports the geometry of its scroll container whenever it
//! scrolls, resizes or re-lays out. The trigger fires when the load boundary
//! at the end of the list comes within `margin_px` of the viewport, and is
//! re-armed after every commit so a boundary that stays in view fires again
//! on the next report.

use serde::{Deserialize, Serialize};

/// Geometry of the scroll container, in px
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ViewportMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ViewportMetrics {
    pub fn new(scroll_top: f64, client_height: f64, scroll_height: f64) -> Self {
        Self {
            scroll_top,
            client_height,
            scroll_height,
        }
    }

    /// Distance between the bottom of the viewport and the end of the content
    pub fn distance_to_end(&self) -> f64 {
        (self.scroll_height - (self.scroll_top + self.client_height)).max(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    margin_px: f64,
    last: Option<ViewportMetrics>,
    in_view: bool,
}

impl ScrollTrigger {
    pub fn new(margin_px: f64) -> Self {
        Self {
            margin_px,
            last: None,
            in_view: false,
        }
    }

    pub fn last_metrics(&self) -> Option<ViewportMetrics> {
        self.last
    }

    fn boundary_in_view(&self, metrics: &ViewportMetrics) -> bool {
        metrics.distance_to_end() <= self.margin_px
    }

    /// Records new geometry. Returns true when the boundary just entered view.
    pub fn observe(&mut self, metrics: ViewportMetrics) -> bool {
        let was_in_view = self.in_view;
        self.in_view = self.boundary_in_view(&metrics);
        self.last = Some(metrics);
        self.in_view && !was_in_view
    }

    /// Re-arms after a commit: the next observation with the boundary in
    /// view fires, even if the boundary never left the view.
    pub fn rearm(&mut self) {
        self.in_view = false;
    }

    /// Forgets the geometry, e.g. when the list is replaced by a new query
    pub fn reset(&mut self) {
        self.last = None;
        self.in_view = false;
    }

    pub fn is_in_view(&self) -> bool {
        self.in_view
    }

    pub fn margin_px(&self) -> f64 {
        self.margin_px
    }
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(20.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on_entering_view_only() {
        let mut trigger = ScrollTrigger::new(20.0);
        assert!(!trigger.observe(ViewportMetrics::new(0.0, 800.0, 3000.0)));
        assert!(trigger.observe(ViewportMetrics::new(2190.0, 800.0, 3000.0)));
        // still in view, no new edge
        assert!(!trigger.observe(ViewportMetrics::new(2200.0, 800.0, 3000.0)));
        assert!(!trigger.observe(ViewportMetrics::new(1000.0, 800.0, 3000.0)));
        assert!(trigger.observe(ViewportMetrics::new(2200.0, 800.0, 3000.0)));
    }

    #[test]
    fn test_short_content_is_in_view() {
        let mut trigger = ScrollTrigger::default();
        assert!(trigger.observe(ViewportMetrics::new(0.0, 800.0, 300.0)));
    }

    #[test]
    fn test_rearm_lets_a_visible_boundary_fire_again() {
        let mut trigger = ScrollTrigger::new(20.0);
        let short = ViewportMetrics::new(0.0, 800.0, 500.0);
        assert!(trigger.observe(short));
        assert!(!trigger.observe(short));

        trigger.rearm();
        assert!(trigger.observe(short));
    }

    #[test]
    fn test_rearm_does_not_fire_out_of_view() {
        let mut trigger = ScrollTrigger::new(20.0);
        trigger.observe(ViewportMetrics::new(0.0, 800.0, 500.0));
        trigger.rearm();
        assert!(!trigger.observe(ViewportMetrics::new(0.0, 800.0, 5000.0)));
    }

    #[test]
    fn test_reset_forgets_geometry() {
        let mut trigger = ScrollTrigger::default();
        trigger.observe(ViewportMetrics::new(0.0, 800.0, 500.0));
        trigger.reset();
        assert!(!trigger.is_in_view());
        assert!(trigger.last_metrics().is_none());
    }
}
