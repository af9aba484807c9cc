/// Thumbnail width control of the gallery grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailZoom {
    width: u32,
}

pub const MIN_THUMBNAIL_WIDTH: u32 = 100;
pub const MAX_THUMBNAIL_WIDTH: u32 = 300;
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 200;
pub const ZOOM_STEP: u32 = 20;

impl Default for ThumbnailZoom {
    fn default() -> Self {
        Self {
            width: DEFAULT_THUMBNAIL_WIDTH,
        }
    }
}

impl ThumbnailZoom {
    /// Starts at `width`, clamped into the allowed range
    pub fn new(width: u32) -> Self {
        Self {
            width: width.clamp(MIN_THUMBNAIL_WIDTH, MAX_THUMBNAIL_WIDTH),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn zoom_in(&mut self) -> u32 {
        self.width = (self.width + ZOOM_STEP).min(MAX_THUMBNAIL_WIDTH);
        self.width
    }

    pub fn zoom_out(&mut self) -> u32 {
        self.width = self
            .width
            .saturating_sub(ZOOM_STEP)
            .max(MIN_THUMBNAIL_WIDTH);
        self.width
    }

    pub fn can_zoom_in(&self) -> bool {
        self.width < MAX_THUMBNAIL_WIDTH
    }

    pub fn can_zoom_out(&self) -> bool {
        self.width > MIN_THUMBNAIL_WIDTH
    }
}
