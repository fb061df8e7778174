pub use glam::DVec3 as Vec3;

use crate::config::SCENE_HALF_EXTENT;

/// An element's bounding box in viewport (client) coordinates, as reported
/// by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Zero-sized boxes come from elements that have not been laid out yet.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Snapshot of the browser viewport taken at the start of a computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64, scroll_y: f64) -> Self {
        Self { width, height, scroll_y }
    }

    /// Hidden tabs and collapsed frames report a zero-sized viewport.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Maps a screen position onto the scene plane. Screen Y grows downward,
    /// scene Y grows upward, hence the sign flip.
    pub fn to_scene(&self, screen_x: f64, screen_y: f64) -> Vec3 {
        let span = SCENE_HALF_EXTENT * 2.0;
        Vec3::new(
            (screen_x / self.width) * span - SCENE_HALF_EXTENT,
            -((screen_y / self.height) * span - SCENE_HALF_EXTENT),
            0.0,
        )
    }

    /// Scroll offset at which a box's center lines up with the viewport center.
    pub fn centering_offset(&self, rect: &Rect) -> f64 {
        let absolute_center = rect.center_y() + self.scroll_y;
        absolute_center - self.height / 2.0
    }
}
