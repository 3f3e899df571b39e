//! # ZoomView Overlay
//!
//! Interactive annotations drawn over a zoomable image: drag handles,
//! rotatable rectangles with a resize/rotate solver, scale bars, and a
//! vertical cursor, plus the [`OverlayViewer`] that turns pointer events
//! into handle drags.
//!
//! Artwork geometry lives in absolute (image) space. Painting and hit
//! testing receive a [`Transform`](zoomview_core::Transform) to screen
//! space, usually the viewer's [`Viewport`].

pub mod artwork;
pub mod drag_handle;
pub mod fonts;
pub mod layout;
pub mod listener;
pub mod rectangle;
pub mod render;
pub mod resize;
pub mod scale_bar;
pub mod surface;
pub mod vcursor;
pub mod viewer;
pub mod viewport;

pub use artwork::{HandleHit, Overlay, OverlayArtwork};
pub use drag_handle::{DragHandle, DEFAULT_HANDLE_SIZE};
pub use layout::{HandleIndex, HandleLayout, RectGeometry, HANDLE_COUNT};
pub use listener::{ListenerHandle, OverlayListener};
pub use rectangle::{RectangleArtwork, RectangleSnapshot, DEFAULT_ROTATION_HANDLE_LENGTH};
pub use render::PixmapSurface;
pub use resize::{adjust_size, ResizeRequest, Restriction};
pub use scale_bar::{add_prefix, Orientation, ScaleBar, DEFAULT_SCALE_BAR_TEXT};
pub use surface::{DisplayList, DrawCommand, FontSpec, RenderSurface, TextAlign, TextStyle};
pub use vcursor::{VCursorArtwork, VCURSOR_HANDLE};
pub use viewer::{ArtworkCreator, DragSession, OverlayViewer, PointerFeedback};
pub use viewport::{Viewport, DEFAULT_ZOOM_STEP};
