//! A draggable vertical line marking an absolute x position.

use serde::{Deserialize, Serialize};
use tracing::warn;
use zoomview_core::{CursorHint, Modifiers, Point2D, Rgba, Status, Transform};

use crate::artwork::{HandleHit, OverlayArtwork};
use crate::surface::RenderSurface;

/// The only handle index a cursor reports.
pub const VCURSOR_HANDLE: usize = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VCursorArtwork {
    /// Absolute x coordinate.
    pub position: f64,
    pub color: Rgba,
    /// Horizontal screen distance that still grabs the line (exclusive).
    pub hit_tolerance_px: f64,
    pub status: Status,
}

impl VCursorArtwork {
    pub fn new(position: f64) -> Self {
        Self {
            position,
            color: Rgba::YELLOW,
            hit_tolerance_px: 10.0,
            status: Status::ENABLED | Status::VISIBLE,
        }
    }
}

impl OverlayArtwork for VCursorArtwork {
    fn paint(&self, surface: &mut dyn RenderSurface, transform: &dyn Transform) {
        let x = transform.apply(Point2D::new(self.position, 0.0)).x;
        let (_, height) = surface.clip_size();
        surface.stroke_line(
            Point2D::new(x, 0.0),
            Point2D::new(x, height),
            self.color,
            1.0,
        );
    }

    fn find_handle(&self, point: Point2D, transform: &dyn Transform) -> Option<HandleHit> {
        let p = transform.apply(point);
        let line = transform.apply(Point2D::new(self.position, 0.0));
        ((p.x - line.x).abs() < self.hit_tolerance_px).then(|| HandleHit {
            index: VCURSOR_HANDLE,
            click_offset: line - p,
        })
    }

    fn handle_count(&self) -> usize {
        VCURSOR_HANDLE + 1
    }

    fn cursor(&self, index: usize) -> CursorHint {
        if index == VCURSOR_HANDLE {
            CursorHint::ResizeEw
        } else {
            CursorHint::Default
        }
    }

    fn move_handle(&mut self, index: usize, location: Point2D, _modifiers: Modifiers) {
        if index != VCURSOR_HANDLE || !location.x.is_finite() {
            warn!(index, %location, "Ignoring invalid cursor move");
            return;
        }
        self.position = location.x;
    }

    fn status(&self) -> Status {
        self.status
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
    }
}
