//! Headless demo session.
//!
//! Builds a viewer with one of each artwork, replays a short scripted
//! pointer session against it and renders the result to a pixmap. Used by
//! the `zoomview` binary and as an end-to-end smoke test of the workspace.

use std::rc::Rc;

use anyhow::{bail, Context};
use tracing::info;
use zoomview_core::{Modifiers, Point2D, PointerButton, Rgba};
use zoomview_overlay::{
    DragSession, HandleIndex, Orientation, Overlay, OverlayArtwork, OverlayListener,
    OverlayViewer, PixmapSurface,
};
use zoomview_settings::ViewerConfig;

const BACKGROUND: Rgba = Rgba::rgb(40, 40, 48);
const DRAG_STEPS: u32 = 4;

/// Logs every committed edit.
#[derive(Debug, Default)]
pub struct LoggingListener;

impl OverlayListener for LoggingListener {
    fn on_artwork_changed(&self, index: usize, overlay: &Overlay) {
        match overlay {
            Overlay::Rectangle(r) => info!(
                index,
                center = %r.center(),
                width = r.width(),
                height = r.height(),
                angle = r.rotation(),
                "Rectangle changed"
            ),
            Overlay::VCursor(c) => info!(index, position = c.position, "Cursor moved"),
            other => info!(index, kind = other.kind_name(), "Artwork changed"),
        }
    }

    fn on_selection_changed(&self, index: usize, overlay: &Overlay) {
        info!(index, kind = overlay.kind_name(), "Selection changed");
    }
}

/// A viewer populated with the demo artworks.
#[derive(Debug)]
pub struct DemoScene {
    pub viewer: OverlayViewer,
    pub rectangle: usize,
    pub cursor: usize,
    width: u32,
    height: u32,
}

impl DemoScene {
    /// Lays out a rectangle, both scale bars and a cursor on a
    /// `width` x `height` image shown at 1:1.
    pub fn build(config: &ViewerConfig, width: u32, height: u32) -> anyhow::Result<Self> {
        if width == 0 || height == 0 {
            bail!("Demo image must not be empty ({width}x{height})");
        }
        let (w, h) = (f64::from(width), f64::from(height));

        let mut viewport = config
            .build_viewport(w, h)
            .context("Invalid viewport settings")?;
        viewport.set_image_size(w, h);

        let mut viewer = OverlayViewer::new(viewport);
        viewer.set_creator(config.rectangle_creator());
        viewer.add_listener(Rc::new(LoggingListener));

        let mut rect = config.rectangle(w * 0.25, h * 0.3, w * 0.35, h * 0.25, 0.3);
        rect.set_caption(Some("ROI".to_string()));
        let rectangle = viewer.add(rect);
        viewer.add(config.scale_bar(Orientation::Horizontal));
        viewer.add(config.scale_bar(Orientation::Vertical));
        let cursor = viewer.add(config.vcursor(w * 0.8));

        Ok(Self {
            viewer,
            rectangle,
            cursor,
            width,
            height,
        })
    }

    /// Screen position of `handle` on the artwork at `overlay`, if it has one.
    pub fn handle_screen_position(&self, overlay: usize, handle: usize) -> Option<Point2D> {
        let viewport = self.viewer.viewport();
        match self.viewer.get(overlay)? {
            Overlay::Rectangle(r) => match HandleIndex::from_index(handle)? {
                HandleIndex::Rotate => r.rotate_handle_screen_position(viewport),
                h => Some(viewport.abs_to_scr(r.handle_location(h))),
            },
            Overlay::VCursor(c) => {
                let x = viewport.abs_to_scr(Point2D::new(c.position, 0.0)).x;
                Some(Point2D::new(x, f64::from(self.height) / 2.0))
            }
            Overlay::ScaleBar(_) => None,
        }
    }

    /// Presses on a handle, drags it by `delta` screen pixels in a few
    /// steps, and releases.
    pub fn drag(
        &mut self,
        overlay: usize,
        handle: usize,
        delta: Point2D,
        modifiers: Modifiers,
    ) -> anyhow::Result<()> {
        let start = self
            .handle_screen_position(overlay, handle)
            .with_context(|| format!("Overlay {overlay} has no handle {handle} on screen"))?;

        self.viewer.pointer_down(start, PointerButton::Primary);
        match self.viewer.session() {
            DragSession::Handle {
                overlay: o,
                handle: h,
                ..
            } if o == overlay && h == handle => {}
            other => {
                self.viewer.cancel_drag();
                bail!("Press at {start} did not grab handle {handle} of overlay {overlay} ({other:?})");
            }
        }

        for step in 1..=DRAG_STEPS {
            let t = f64::from(step) / f64::from(DRAG_STEPS);
            self.viewer.pointer_move(start + delta * t, modifiers);
        }
        self.viewer.pointer_up(start + delta);
        Ok(())
    }

    /// Resizes, rotates and moves the demo artworks.
    pub fn run_script(&mut self) -> anyhow::Result<()> {
        let rect = self.rectangle;
        self.drag(
            rect,
            HandleIndex::BottomRight.index(),
            Point2D::new(60.0, 40.0),
            Modifiers::NONE,
        )?;
        self.drag(
            rect,
            HandleIndex::Right.index(),
            Point2D::new(30.0, 0.0),
            Modifiers {
                ctrl: true,
                shift: false,
            },
        )?;
        self.drag(
            rect,
            HandleIndex::Rotate.index(),
            Point2D::new(0.0, 60.0),
            Modifiers::NONE,
        )?;
        self.drag(
            self.cursor,
            zoomview_overlay::VCURSOR_HANDLE,
            Point2D::new(-40.0, 0.0),
            Modifiers::NONE,
        )?;
        self.viewer.select(Some(rect));
        Ok(())
    }

    pub fn render(&self) -> anyhow::Result<PixmapSurface> {
        let mut surface = PixmapSurface::new(self.width, self.height)?;
        surface.fill(BACKGROUND);
        self.viewer.paint(&mut surface);
        Ok(surface)
    }

    pub fn rectangle_artwork(&self) -> Option<&zoomview_overlay::RectangleArtwork> {
        self.viewer.get(self.rectangle).and_then(Overlay::as_rectangle)
    }

    pub fn handle_count(&self, overlay: usize) -> usize {
        self.viewer.get(overlay).map_or(0, |o| o.handle_count())
    }
}
