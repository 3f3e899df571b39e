//! # ZoomView
//!
//! Pan/zoom raster viewer core with interactive overlay artwork:
//! - Rotatable, resizable rectangles with ten drag handles
//! - Self-sizing horizontal and vertical scale bars
//! - Draggable vertical cursor lines
//!
//! ## Architecture
//!
//! ZoomView is organized as a workspace with multiple crates:
//!
//! 1. **zoomview-core** - Geometry, transform contract, status flags, errors
//! 2. **zoomview-overlay** - Artworks, handle solver, viewport, viewer, rendering
//! 3. **zoomview-settings** - Viewer defaults loaded from JSON or TOML
//! 4. **zoomview** - This crate: logging setup and a headless demo session

pub mod demo;

pub use zoomview_core::{
    CursorHint, Error, Modifiers, OverlayError, Point2D, PointerButton, Result, Rgba, Status,
    SwapAxes, Transform, ViewportError,
};

pub use zoomview_overlay::{
    add_prefix, DragHandle, DragSession, HandleIndex, HandleLayout, ListenerHandle,
    Orientation, Overlay, OverlayArtwork, OverlayListener, OverlayViewer, PixmapSurface,
    PointerFeedback, RectGeometry, RectangleArtwork, RenderSurface, ScaleBar, VCursorArtwork,
    Viewport,
};

pub use zoomview_settings::{SettingsError, ViewerConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support, `info` when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
