//! Keeps the drawing surface congruent with the displayed video and maps page
//! coordinates into the surface's normalized space.

use crate::overlay::layout::{LayoutRect, LayoutSource, PixelSize, ViewportFrame};
use serde::{Deserialize, Serialize};

/// A point expressed as a fraction of the drawing surface's width and height.
///
/// Values outside `[0, 1]` are representable; only in-range points may be
/// transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// NaN and infinities are never in range.
    pub fn is_in_range(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    pub fn in_range(self) -> Option<Self> {
        self.is_in_range().then_some(self)
    }
}

/// Frame of `video` relative to the origin of `container`.
pub fn frame_for(video: LayoutRect, container: LayoutRect) -> ViewportFrame {
    ViewportFrame {
        width: video.width,
        height: video.height,
        top: video.top - container.top,
        left: video.left - container.left,
    }
}

/// Resizes and repositions the drawing surface to cover exactly the displayed
/// video, with one backing pixel per displayed pixel.
pub fn resync<L>(layout: &mut L) -> ViewportFrame
where
    L: LayoutSource + ?Sized,
{
    let frame = frame_for(layout.video_rect(), layout.container_rect());
    let resolution = PixelSize::from_displayed(frame.width, frame.height);
    layout.apply_surface(frame, resolution);
    tracing::debug!(
        width = frame.width,
        height = frame.height,
        top = frame.top,
        left = frame.left,
        "drawing surface resynced to video"
    );
    frame
}

/// Maps a page point into the normalized space of `surface`.
pub fn to_normalized(surface: LayoutRect, screen: (f64, f64)) -> NormalizedPoint {
    NormalizedPoint {
        x: (screen.0 - surface.left) / surface.width,
        y: (screen.1 - surface.top) / surface.height,
    }
}
