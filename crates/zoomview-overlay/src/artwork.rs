//! The overlay artwork contract and the closed set of artwork kinds.

use zoomview_core::{CursorHint, Modifiers, Point2D, Status, Transform};

use crate::rectangle::RectangleArtwork;
use crate::scale_bar::ScaleBar;
use crate::surface::RenderSurface;
use crate::vcursor::VCursorArtwork;

/// Result of a successful handle hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleHit {
    pub index: usize,
    /// `handle_screen - point_screen`. Adding it to later pointer positions
    /// keeps the handle from snapping to the pointer when a drag starts.
    pub click_offset: Point2D,
}

/// Operations every overlay artwork supports.
///
/// The host checks `status().visible` before calling [`paint`] and
/// `status().is_interactive()` before calling [`find_handle`].
///
/// [`paint`]: OverlayArtwork::paint
/// [`find_handle`]: OverlayArtwork::find_handle
pub trait OverlayArtwork {
    fn paint(&self, surface: &mut dyn RenderSurface, transform: &dyn Transform);

    /// Finds the handle under `point` (absolute space), or `None`.
    fn find_handle(&self, point: Point2D, transform: &dyn Transform) -> Option<HandleHit>;

    /// Size of the handle index space; valid indices are `0..handle_count()`.
    fn handle_count(&self) -> usize;

    /// Cursor to show over handle `index`; `Default` for unknown indices.
    fn cursor(&self, index: usize) -> CursorHint;

    /// Moves handle `index` to `location` (absolute space) and updates the
    /// artwork geometry. Unknown indices and non-finite locations are
    /// ignored.
    fn move_handle(&mut self, index: usize, location: Point2D, modifiers: Modifiers);

    fn status(&self) -> Status;

    fn set_status(&mut self, status: Status);
}

/// Any artwork the viewer can hold.
#[derive(Debug, Clone)]
pub enum Overlay {
    Rectangle(RectangleArtwork),
    ScaleBar(ScaleBar),
    VCursor(VCursorArtwork),
}

impl Overlay {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Overlay::Rectangle(_) => "rectangle",
            Overlay::ScaleBar(_) => "scale bar",
            Overlay::VCursor(_) => "vertical cursor",
        }
    }

    pub fn as_rectangle(&self) -> Option<&RectangleArtwork> {
        match self {
            Overlay::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_rectangle_mut(&mut self) -> Option<&mut RectangleArtwork> {
        match self {
            Overlay::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_vcursor(&self) -> Option<&VCursorArtwork> {
        match self {
            Overlay::VCursor(c) => Some(c),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn OverlayArtwork {
        match self {
            Overlay::Rectangle(a) => a,
            Overlay::ScaleBar(a) => a,
            Overlay::VCursor(a) => a,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn OverlayArtwork {
        match self {
            Overlay::Rectangle(a) => a,
            Overlay::ScaleBar(a) => a,
            Overlay::VCursor(a) => a,
        }
    }
}

impl OverlayArtwork for Overlay {
    fn paint(&self, surface: &mut dyn RenderSurface, transform: &dyn Transform) {
        self.inner().paint(surface, transform)
    }

    fn find_handle(&self, point: Point2D, transform: &dyn Transform) -> Option<HandleHit> {
        self.inner().find_handle(point, transform)
    }

    fn handle_count(&self) -> usize {
        self.inner().handle_count()
    }

    fn cursor(&self, index: usize) -> CursorHint {
        self.inner().cursor(index)
    }

    fn move_handle(&mut self, index: usize, location: Point2D, modifiers: Modifiers) {
        self.inner_mut().move_handle(index, location, modifiers)
    }

    fn status(&self) -> Status {
        self.inner().status()
    }

    fn set_status(&mut self, status: Status) {
        self.inner_mut().set_status(status)
    }
}

impl From<RectangleArtwork> for Overlay {
    fn from(a: RectangleArtwork) -> Self {
        Overlay::Rectangle(a)
    }
}

impl From<ScaleBar> for Overlay {
    fn from(a: ScaleBar) -> Self {
        Overlay::ScaleBar(a)
    }
}

impl From<VCursorArtwork> for Overlay {
    fn from(a: VCursorArtwork) -> Self {
        Overlay::VCursor(a)
    }
}
