//! Square hit targets bound to a control point of an artwork.

use crate::surface::RenderSurface;
use zoomview_core::{CursorHint, Point2D, Rgba, Transform};

/// Default side length of a handle in screen pixels.
pub const DEFAULT_HANDLE_SIZE: f64 = 13.0;

/// A small filled square at an absolute position.
///
/// The handle keeps a constant screen size regardless of zoom. Hit testing
/// happens in screen space with a square tolerance region of half the side
/// on each axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DragHandle {
    /// Position in absolute space.
    pub location: Point2D,
    /// Side length in screen pixels.
    pub size: f64,
    pub visible: bool,
    pub color: Rgba,
    pub cursor: CursorHint,
}

impl DragHandle {
    pub fn new(location: Point2D, color: Rgba) -> Self {
        Self {
            location,
            size: DEFAULT_HANDLE_SIZE,
            visible: true,
            color,
            cursor: CursorHint::Hand,
        }
    }

    pub fn with_cursor(mut self, cursor: CursorHint) -> Self {
        self.cursor = cursor;
        self
    }

    /// Draws the handle at its transformed location; no-op when hidden.
    pub fn draw(&self, surface: &mut dyn RenderSurface, transform: &dyn Transform) {
        if self.visible {
            self.draw_at_screen_position(surface, transform.apply(self.location));
        }
    }

    /// Draws the handle centered on a precomputed screen point.
    pub fn draw_at_screen_position(&self, surface: &mut dyn RenderSurface, screen: Point2D) {
        surface.fill_square(screen, self.size, self.color);
    }

    /// True when `candidate` (absolute) lands on the handle once both are
    /// mapped to screen space.
    pub fn test(&self, candidate: Point2D, transform: &dyn Transform) -> bool {
        hit_square(
            transform.apply(self.location),
            transform.apply(candidate),
            self.size,
        )
    }
}

/// Square (per-axis) tolerance test between two screen points.
pub(crate) fn hit_square(handle: Point2D, point: Point2D, size: f64) -> bool {
    let half = size / 2.0;
    (handle.x - point.x).abs() <= half && (handle.y - point.y).abs() <= half
}
