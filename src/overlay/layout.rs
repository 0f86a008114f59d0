use serde::{Deserialize, Serialize};

/// A displayed box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    pub fn strictly_contains(self, point: (f64, f64)) -> bool {
        point.0 > self.left && point.0 < self.right() && point.1 > self.top && point.1 < self.bottom()
    }
}

/// Position and size of the video image relative to its container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportFrame {
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
}

impl ViewportFrame {
    /// The page box this frame occupies when anchored at `container`'s origin.
    pub fn placed_in(self, container: LayoutRect) -> LayoutRect {
        LayoutRect::new(
            container.left + self.left,
            container.top + self.top,
            self.width,
            self.height,
        )
    }
}

/// Backing pixel resolution of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    /// Pixel buffer size for a displayed size; fractional pixels are truncated.
    pub fn from_displayed(width: f64, height: f64) -> Self {
        Self {
            width: whole_pixels(width),
            height: whole_pixels(height),
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn whole_pixels(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.trunc().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Read/write access to the live layout of the video, its container and the
/// drawing surface stacked on top of it.
///
/// `surface_rect` must reflect the surface's current displayed box every time
/// it is called; callers never cache it.
pub trait LayoutSource {
    fn video_rect(&self) -> LayoutRect;

    fn container_rect(&self) -> LayoutRect;

    fn surface_rect(&self) -> LayoutRect;

    fn apply_surface(&mut self, frame: ViewportFrame, resolution: PixelSize);
}

/// Layout held in memory. Used by the replay driver and by tests that need a
/// synthetic page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticLayout {
    video: LayoutRect,
    container: LayoutRect,
    surface_frame: ViewportFrame,
    surface_resolution: PixelSize,
}

impl StaticLayout {
    pub fn new(video: LayoutRect, container: LayoutRect) -> Self {
        Self {
            video,
            container,
            ..Self::default()
        }
    }

    pub fn set_video_rect(&mut self, video: LayoutRect) {
        self.video = video;
    }

    pub fn set_container_rect(&mut self, container: LayoutRect) {
        self.container = container;
    }

    pub fn surface_frame(&self) -> ViewportFrame {
        self.surface_frame
    }

    pub fn surface_resolution(&self) -> PixelSize {
        self.surface_resolution
    }
}

impl LayoutSource for StaticLayout {
    fn video_rect(&self) -> LayoutRect {
        self.video
    }

    fn container_rect(&self) -> LayoutRect {
        self.container
    }

    fn surface_rect(&self) -> LayoutRect {
        self.surface_frame.placed_in(self.container)
    }

    fn apply_surface(&mut self, frame: ViewportFrame, resolution: PixelSize) {
        self.surface_frame = frame;
        self.surface_resolution = resolution;
    }
}
