//! The overlay collection and its pointer-driven drag sessions.
//!
//! [`OverlayViewer`] is what a host widget talks to. It owns the
//! [`Viewport`], keeps artworks in insertion order, translates pointer
//! events from screen to absolute space and runs at most one drag session at
//! a time:
//!
//! ```text
//! Idle --down(primary, hit)--------> Handle ---up---> Idle  (on_artwork_changed)
//! Idle --down(primary, empty)------> Handle (new artwork from the creator)
//! Idle --down(primary, zoom window)> WindowZoom --up--> Idle (zoom_to_window)
//! Idle --down(middle)--------------> Pan --up--> Idle
//! any  --cancel_drag---------------> Idle (no notification)
//! ```

use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};
use zoomview_core::{CursorHint, Modifiers, OverlayError, Point2D, PointerButton, Rgba, Status};

use crate::artwork::{HandleHit, Overlay, OverlayArtwork};
use crate::listener::{ListenerHandle, OverlayListener};
use crate::surface::RenderSurface;
use crate::viewport::Viewport;

/// Factory invoked with the absolute start point of a drag on empty canvas.
/// Returns the new artwork and the handle index the drag continues with.
pub type ArtworkCreator = Box<dyn FnMut(Point2D) -> Option<(Overlay, usize)>>;

/// The viewer's current pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Handle {
        overlay: usize,
        handle: usize,
        /// Screen offset from the pointer to the handle at grab time.
        click_offset: Point2D,
    },
    Pan {
        start: Point2D,
        start_scroll: Point2D,
    },
    WindowZoom {
        start: Point2D,
        current: Point2D,
    },
}

/// What the host should do after a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerFeedback {
    pub cursor: CursorHint,
    pub needs_redraw: bool,
}

impl PointerFeedback {
    fn redraw(cursor: CursorHint) -> Self {
        Self {
            cursor,
            needs_redraw: true,
        }
    }

    fn hover(cursor: CursorHint) -> Self {
        Self {
            cursor,
            needs_redraw: false,
        }
    }
}

pub struct OverlayViewer {
    viewport: Viewport,
    overlays: Vec<Overlay>,
    session: DragSession,
    creator: Option<ArtworkCreator>,
    listeners: Vec<(ListenerHandle, Rc<dyn OverlayListener>)>,
    next_listener_id: u64,
    zoom_window_enabled: bool,
}

impl OverlayViewer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            overlays: Vec::new(),
            session: DragSession::Idle,
            creator: None,
            listeners: Vec::new(),
            next_listener_id: 0,
            zoom_window_enabled: false,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    // ----- collection -----

    /// Appends an artwork and returns its index.
    pub fn add(&mut self, overlay: impl Into<Overlay>) -> usize {
        self.overlays.push(overlay.into());
        self.overlays.len() - 1
    }

    /// Removes the artwork at `index`. An active drag session is abandoned
    /// since indices after `index` shift down.
    pub fn remove(&mut self, index: usize) -> Option<Overlay> {
        if index >= self.overlays.len() {
            return None;
        }
        if matches!(self.session, DragSession::Handle { .. }) {
            self.cancel_drag();
        }
        Some(self.overlays.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Overlay> {
        self.overlays.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Overlay> {
        self.overlays.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    // ----- creation, listeners, modes -----

    pub fn set_creator<F>(&mut self, creator: F)
    where
        F: FnMut(Point2D) -> Option<(Overlay, usize)> + 'static,
    {
        self.creator = Some(Box::new(creator));
    }

    pub fn clear_creator(&mut self) {
        self.creator = None;
    }

    pub fn has_creator(&self) -> bool {
        self.creator.is_some()
    }

    pub fn add_listener(&mut self, listener: Rc<dyn OverlayListener>) -> ListenerHandle {
        let handle = ListenerHandle(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((handle, listener));
        handle
    }

    /// Returns `false` if the handle was not registered.
    pub fn remove_listener(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn zoom_window_enabled(&self) -> bool {
        self.zoom_window_enabled
    }

    pub fn set_zoom_window_enabled(&mut self, enabled: bool) {
        self.zoom_window_enabled = enabled;
    }

    pub fn session(&self) -> DragSession {
        self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session != DragSession::Idle
    }

    /// The rubber-band rectangle of an active window zoom, in screen space.
    pub fn zoom_window(&self) -> Option<(Point2D, Point2D)> {
        match self.session {
            DragSession::WindowZoom { start, current } => Some((start, current)),
            _ => None,
        }
    }

    // ----- hit testing and selection -----

    /// First interactive artwork, in insertion order, with a handle under
    /// `abs`.
    pub fn find_handle(&self, abs: Point2D) -> Option<(usize, HandleHit)> {
        self.overlays
            .iter()
            .enumerate()
            .filter(|(_, o)| o.status().is_interactive())
            .find_map(|(i, o)| o.find_handle(abs, &self.viewport).map(|hit| (i, hit)))
    }

    /// Index of the first selected artwork.
    pub fn selected(&self) -> Option<usize> {
        self.overlays.iter().position(|o| o.status().selected)
    }

    /// Deselects every artwork, then selects `index` if it exists.
    pub fn select(&mut self, index: Option<usize>) {
        for overlay in &mut self.overlays {
            let status = overlay.status();
            overlay.set_status(Status {
                selected: false,
                ..status
            });
        }
        let Some(index) = index else {
            return;
        };
        let Some(overlay) = self.overlays.get_mut(index) else {
            warn!(index, "Cannot select unknown overlay");
            return;
        };
        let status = overlay.status();
        overlay.set_status(status | Status::SELECTED);
        debug!(index, kind = overlay.kind_name(), "Overlay selected");
        for (_, listener) in &self.listeners {
            listener.on_selection_changed(index, &self.overlays[index]);
        }
    }

    /// Moves a handle programmatically and notifies listeners.
    pub fn move_handle(
        &mut self,
        overlay: usize,
        handle: usize,
        location: Point2D,
        modifiers: Modifiers,
    ) -> Result<(), OverlayError> {
        let count = self.overlays.len();
        let target = self
            .overlays
            .get_mut(overlay)
            .ok_or(OverlayError::UnknownOverlay {
                index: overlay,
                count,
            })?;
        let handles = target.handle_count();
        if handle >= handles {
            return Err(OverlayError::InvalidHandle {
                index: handle,
                count: handles,
            });
        }
        if !location.is_finite() {
            return Err(OverlayError::NonFiniteInput {
                x: location.x,
                y: location.y,
            });
        }
        target.move_handle(handle, location, modifiers);
        self.notify_changed(overlay);
        Ok(())
    }

    // ----- pointer protocol -----

    pub fn pointer_down(&mut self, screen: Point2D, button: PointerButton) -> PointerFeedback {
        let abs = self.viewport.scr_to_abs(screen);
        if !self.viewport.contains_abs(abs) {
            return PointerFeedback::default();
        }

        match button {
            PointerButton::Primary if self.zoom_window_enabled => {
                self.session = DragSession::WindowZoom {
                    start: screen,
                    current: screen,
                };
                PointerFeedback::hover(CursorHint::Default)
            }
            PointerButton::Primary => {
                if let Some((overlay, hit)) = self.find_handle(abs) {
                    self.begin_handle_drag(overlay, hit.index, hit.click_offset)
                } else {
                    self.create_at(abs)
                }
            }
            PointerButton::Middle => {
                self.session = DragSession::Pan {
                    start: screen,
                    start_scroll: self.viewport.scroll(),
                };
                PointerFeedback::hover(CursorHint::Move)
            }
            PointerButton::Secondary => PointerFeedback::default(),
        }
    }

    pub fn pointer_move(&mut self, screen: Point2D, modifiers: Modifiers) -> PointerFeedback {
        match self.session {
            DragSession::Handle {
                overlay,
                handle,
                click_offset,
            } => {
                let Some(target) = self.overlays.get_mut(overlay) else {
                    return PointerFeedback::default();
                };
                let cursor = target.cursor(handle);
                if !self.viewport.contains_abs(self.viewport.scr_to_abs(screen)) {
                    return PointerFeedback::hover(cursor);
                }
                let location = self.viewport.scr_to_abs(screen + click_offset);
                target.move_handle(handle, location, modifiers);
                PointerFeedback::redraw(cursor)
            }
            DragSession::Pan {
                start,
                start_scroll,
            } => {
                self.viewport.set_scroll(start_scroll + (screen - start));
                PointerFeedback::redraw(CursorHint::Move)
            }
            DragSession::WindowZoom { start, .. } => {
                self.session = DragSession::WindowZoom {
                    start,
                    current: screen,
                };
                PointerFeedback::redraw(CursorHint::Default)
            }
            DragSession::Idle => {
                let abs = self.viewport.scr_to_abs(screen);
                if self.zoom_window_enabled || !self.viewport.contains_abs(abs) {
                    return PointerFeedback::default();
                }
                let cursor = self
                    .find_handle(abs)
                    .map(|(i, hit)| self.overlays[i].cursor(hit.index))
                    .unwrap_or_default();
                PointerFeedback::hover(cursor)
            }
        }
    }

    pub fn pointer_up(&mut self, screen: Point2D) -> PointerFeedback {
        match std::mem::take(&mut self.session) {
            DragSession::Handle {
                overlay, handle, ..
            } => {
                debug!(overlay, handle, "Handle drag finished");
                self.notify_changed(overlay);
                PointerFeedback::redraw(CursorHint::Default)
            }
            DragSession::WindowZoom { start, .. } => {
                if let Err(e) = self.viewport.zoom_to_window(start, screen) {
                    debug!("Window zoom ignored: {}", e);
                }
                PointerFeedback::redraw(CursorHint::Default)
            }
            DragSession::Pan { .. } | DragSession::Idle => PointerFeedback::default(),
        }
    }

    /// Abandons the current session without notifying listeners.
    pub fn cancel_drag(&mut self) {
        if self.session != DragSession::Idle {
            debug!(session = ?self.session, "Drag cancelled");
        }
        self.session = DragSession::Idle;
    }

    /// Mouse wheel: `steps` notches, positive zooms in.
    pub fn wheel(&mut self, screen: Point2D, steps: i32) -> PointerFeedback {
        self.viewport.zoom_at(screen, steps);
        PointerFeedback::redraw(CursorHint::Default)
    }

    /// Paints every visible artwork in insertion order, then the zoom window
    /// rubber band if one is being dragged.
    pub fn paint(&self, surface: &mut dyn RenderSurface) {
        for overlay in self.overlays.iter().filter(|o| o.status().visible) {
            overlay.paint(surface, &self.viewport);
        }
        if let Some((a, b)) = self.zoom_window() {
            let corners = [
                a,
                Point2D::new(b.x, a.y),
                b,
                Point2D::new(a.x, b.y),
            ];
            for (i, from) in corners.iter().enumerate() {
                surface.stroke_line(*from, corners[(i + 1) % 4], Rgba::BLACK, 1.0);
            }
        }
    }

    fn begin_handle_drag(
        &mut self,
        overlay: usize,
        handle: usize,
        click_offset: Point2D,
    ) -> PointerFeedback {
        self.session = DragSession::Handle {
            overlay,
            handle,
            click_offset,
        };
        debug!(overlay, handle, "Handle drag started");
        self.select(Some(overlay));
        PointerFeedback::redraw(self.overlays[overlay].cursor(handle))
    }

    fn create_at(&mut self, abs: Point2D) -> PointerFeedback {
        let Some(creator) = self.creator.as_mut() else {
            return PointerFeedback::default();
        };
        let Some((overlay, handle)) = creator(abs) else {
            return PointerFeedback::default();
        };
        let kind = overlay.kind_name();
        let index = self.add(overlay);
        debug!(index, kind, %abs, "Artwork created");
        self.begin_handle_drag(index, handle, Point2D::ZERO)
    }

    fn notify_changed(&self, index: usize) {
        let Some(overlay) = self.overlays.get(index) else {
            return;
        };
        for (_, listener) in &self.listeners {
            listener.on_artwork_changed(index, overlay);
        }
    }
}

impl fmt::Debug for OverlayViewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayViewer")
            .field("viewport", &self.viewport)
            .field("overlays", &self.overlays)
            .field("session", &self.session)
            .field("has_creator", &self.creator.is_some())
            .field("listeners", &self.listeners.len())
            .field("zoom_window_enabled", &self.zoom_window_enabled)
            .finish()
    }
}
