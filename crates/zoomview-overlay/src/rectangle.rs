//! Rotatable rectangle artwork with resize, move, and rotate handles.
//!
//! The ten handle positions are always derived from the rectangle's
//! [`RectGeometry`]. During a drag the grabbed handle's raw location is the
//! solver input; right after the solve every handle, the grabbed one
//! included, is snapped back onto the new layout. Each move is computed from
//! the raw location alone, so replaying the same move is idempotent.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};
use zoomview_core::{CursorHint, Modifiers, Point2D, Rgba, Status, Transform};

use crate::artwork::{HandleHit, Overlay, OverlayArtwork};
use crate::drag_handle::{hit_square, DragHandle};
use crate::layout::{HandleIndex, HandleLayout, RectGeometry, HANDLE_COUNT};
use crate::resize::{adjust_size, ResizeRequest};
use crate::surface::{FontSpec, RenderSurface, TextAlign, TextStyle};

/// Screen distance between the right handle and the rotate handle.
pub const DEFAULT_ROTATION_HANDLE_LENGTH: f64 = 50.0;

const CORNERS: [HandleIndex; 4] = [
    HandleIndex::TopLeft,
    HandleIndex::TopRight,
    HandleIndex::BottomRight,
    HandleIndex::BottomLeft,
];

const SIDES: [HandleIndex; 4] = [
    HandleIndex::Top,
    HandleIndex::Right,
    HandleIndex::Bottom,
    HandleIndex::Left,
];

/// Serializable state of a [`RectangleArtwork`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleSnapshot {
    pub geometry: RectGeometry,
    pub color: Rgba,
    pub handle_size: f64,
    pub allow_resize: bool,
    pub square: bool,
    pub show_rotate_handle: bool,
    pub show_center_handle: bool,
    pub show_side_handles: bool,
    pub status: Status,
    pub caption: Option<String>,
    pub font: FontSpec,
    pub rotation_handle_length: f64,
}

#[derive(Debug, Clone)]
pub struct RectangleArtwork {
    geometry: RectGeometry,
    color: Rgba,
    handles: [DragHandle; HANDLE_COUNT],
    allow_resize: bool,
    square: bool,
    show_rotate_handle: bool,
    show_center_handle: bool,
    show_side_handles: bool,
    status: Status,
    caption: Option<String>,
    font: FontSpec,
    rotation_handle_length: f64,
    stroke_width: f64,
    selected_stroke_width: f64,
}

impl RectangleArtwork {
    /// Creates a rectangle from its unrotated top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64, angle: f64, color: Rgba) -> Self {
        let center = Point2D::new(x + width / 2.0, y + height / 2.0);
        Self::from_geometry(
            RectGeometry::new(center, width.abs(), height.abs(), angle),
            color,
        )
    }

    /// Sizes are taken as absolute values. Non-finite geometry is replaced
    /// by an empty rectangle at the origin.
    pub fn from_geometry(geometry: RectGeometry, color: Rgba) -> Self {
        let geometry = RectGeometry {
            width: geometry.width.abs(),
            height: geometry.height.abs(),
            ..geometry
        };
        let geometry = if geometry.is_finite() {
            geometry
        } else {
            warn!(?geometry, "Replacing non-finite rectangle geometry");
            RectGeometry::default()
        };
        let handles = HandleIndex::ALL
            .map(|h| DragHandle::new(geometry.center, color).with_cursor(h.cursor()));
        let mut artwork = Self {
            geometry,
            color,
            handles,
            allow_resize: true,
            square: false,
            show_rotate_handle: true,
            show_center_handle: true,
            show_side_handles: true,
            status: Status::ENABLED | Status::VISIBLE,
            caption: None,
            font: FontSpec::default(),
            rotation_handle_length: DEFAULT_ROTATION_HANDLE_LENGTH,
            stroke_width: 1.0,
            selected_stroke_width: 3.0,
        };
        artwork.update_handle_visibility();
        artwork.relayout();
        artwork
    }

    /// A zero-size rectangle at `start`, to be grown by dragging the returned
    /// handle.
    pub fn create_at(start: Point2D, color: Rgba) -> (Self, HandleIndex) {
        (
            Self::new(start.x, start.y, 0.0, 0.0, 0.0, color),
            HandleIndex::BottomRight,
        )
    }

    /// Default artwork factory for [`OverlayViewer`](crate::OverlayViewer).
    pub fn creator() -> impl FnMut(Point2D) -> Option<(Overlay, usize)> {
        |start| {
            let (artwork, handle) = Self::create_at(start, Rgba::RED);
            Some((Overlay::Rectangle(artwork), handle.index()))
        }
    }

    pub fn snapshot(&self) -> RectangleSnapshot {
        RectangleSnapshot {
            geometry: self.geometry,
            color: self.color,
            handle_size: self.handle_size(),
            allow_resize: self.allow_resize,
            square: self.square,
            show_rotate_handle: self.show_rotate_handle,
            show_center_handle: self.show_center_handle,
            show_side_handles: self.show_side_handles,
            status: self.status,
            caption: self.caption.clone(),
            font: self.font.clone(),
            rotation_handle_length: self.rotation_handle_length,
        }
    }

    pub fn from_snapshot(snapshot: &RectangleSnapshot) -> Self {
        let mut artwork = Self::from_geometry(snapshot.geometry, snapshot.color);
        artwork.set_handle_size(snapshot.handle_size);
        artwork.allow_resize = snapshot.allow_resize;
        artwork.show_rotate_handle = snapshot.show_rotate_handle;
        artwork.show_center_handle = snapshot.show_center_handle;
        artwork.show_side_handles = snapshot.show_side_handles;
        artwork.status = snapshot.status;
        artwork.caption = snapshot.caption.clone();
        artwork.font = snapshot.font.clone();
        artwork.rotation_handle_length = snapshot.rotation_handle_length;
        artwork.update_handle_visibility();
        artwork.set_square(snapshot.square);
        artwork.relayout();
        artwork
    }

    // ----- geometry -----

    pub fn geometry(&self) -> RectGeometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: RectGeometry) {
        let mut geometry = RectGeometry {
            width: geometry.width.abs(),
            height: geometry.height.abs(),
            ..geometry
        };
        if self.square {
            geometry.height = geometry.width;
        }
        self.commit(geometry);
    }

    pub fn center(&self) -> Point2D {
        self.geometry.center
    }

    pub fn center_x(&self) -> f64 {
        self.geometry.center.x
    }

    pub fn set_center_x(&mut self, x: f64) {
        self.commit(RectGeometry {
            center: Point2D::new(x, self.geometry.center.y),
            ..self.geometry
        });
    }

    pub fn center_y(&self) -> f64 {
        self.geometry.center.y
    }

    pub fn set_center_y(&mut self, y: f64) {
        self.commit(RectGeometry {
            center: Point2D::new(self.geometry.center.x, y),
            ..self.geometry
        });
    }

    pub fn width(&self) -> f64 {
        self.geometry.width
    }

    pub fn set_width(&mut self, width: f64) {
        let width = width.abs();
        let height = if self.square { width } else { self.geometry.height };
        self.commit(RectGeometry {
            width,
            height,
            ..self.geometry
        });
    }

    pub fn height(&self) -> f64 {
        self.geometry.height
    }

    pub fn set_height(&mut self, height: f64) {
        let height = height.abs();
        let width = if self.square { height } else { self.geometry.width };
        self.commit(RectGeometry {
            width,
            height,
            ..self.geometry
        });
    }

    /// Rotation in radians.
    pub fn rotation(&self) -> f64 {
        self.geometry.angle
    }

    pub fn set_rotation(&mut self, angle: f64) {
        self.commit(RectGeometry {
            angle,
            ..self.geometry
        });
    }

    /// Unrotated bounds as `(x, y, width, height)` with `(x, y)` the
    /// top-left corner.
    pub fn rect(&self) -> (f64, f64, f64, f64) {
        let g = &self.geometry;
        (
            g.center.x - g.width / 2.0,
            g.center.y - g.height / 2.0,
            g.width,
            g.height,
        )
    }

    pub fn set_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.set_geometry(RectGeometry {
            center: Point2D::new(x + width / 2.0, y + height / 2.0),
            width,
            height,
            ..self.geometry
        });
    }

    // ----- handles -----

    pub fn handle(&self, handle: HandleIndex) -> &DragHandle {
        &self.handles[handle.index()]
    }

    pub fn handle_location(&self, handle: HandleIndex) -> Point2D {
        self.handles[handle.index()].location
    }

    pub fn handle_locations(&self) -> [Point2D; HANDLE_COUNT] {
        self.handles.each_ref().map(|h| h.location)
    }

    pub fn handle_size(&self) -> f64 {
        self.handles[0].size
    }

    pub fn set_handle_size(&mut self, size: f64) {
        for handle in &mut self.handles {
            handle.size = size;
        }
    }

    pub fn rotation_handle_length(&self) -> f64 {
        self.rotation_handle_length
    }

    pub fn set_rotation_handle_length(&mut self, length: f64) {
        self.rotation_handle_length = length;
    }

    /// Screen position of the rotate handle: the right handle pushed outward
    /// along the center→right direction by the rotation handle length.
    ///
    /// `None` when the rectangle has no width on screen, since the direction
    /// is undefined then.
    pub fn rotate_handle_screen_position(&self, transform: &dyn Transform) -> Option<Point2D> {
        let pr = transform.apply(self.handle_location(HandleIndex::Right));
        let pc = transform.apply(self.handle_location(HandleIndex::Center));
        let rad = pr.distance_to(&pc);
        if !(rad > 0.0) {
            return None;
        }
        let p = pr + (pr - pc) * (self.rotation_handle_length / rad);
        p.is_finite().then_some(p)
    }

    // ----- flags -----

    pub fn allow_resize(&self) -> bool {
        self.allow_resize
    }

    pub fn set_allow_resize(&mut self, allow: bool) {
        self.allow_resize = allow;
        self.update_handle_visibility();
    }

    pub fn square(&self) -> bool {
        self.square
    }

    /// Turning square on forces `height = width` immediately; from then on
    /// every resize is aspect locked.
    pub fn set_square(&mut self, square: bool) {
        self.square = square;
        if square {
            self.commit(RectGeometry {
                height: self.geometry.width,
                ..self.geometry
            });
        }
    }

    pub fn show_rotate_handle(&self) -> bool {
        self.show_rotate_handle
    }

    pub fn set_show_rotate_handle(&mut self, show: bool) {
        self.show_rotate_handle = show;
        self.update_handle_visibility();
    }

    pub fn show_center_handle(&self) -> bool {
        self.show_center_handle
    }

    pub fn set_show_center_handle(&mut self, show: bool) {
        self.show_center_handle = show;
        self.update_handle_visibility();
    }

    pub fn show_side_handles(&self) -> bool {
        self.show_side_handles
    }

    pub fn set_show_side_handles(&mut self, show: bool) {
        self.show_side_handles = show;
        self.update_handle_visibility();
    }

    // ----- appearance -----

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
        for handle in &mut self.handles {
            handle.color = color;
        }
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn set_caption(&mut self, caption: Option<String>) {
        self.caption = caption;
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    /// Outline widths for the normal and the selected state.
    pub fn set_stroke_widths(&mut self, normal: f64, selected: f64) {
        self.stroke_width = normal;
        self.selected_stroke_width = selected;
    }

    // ----- internals -----

    fn update_handle_visibility(&mut self) {
        for handle in HandleIndex::ALL {
            let visible = match handle {
                HandleIndex::Center => self.show_center_handle,
                HandleIndex::Rotate => self.show_rotate_handle,
                h if h.is_side() => self.allow_resize && self.show_side_handles,
                _ => self.allow_resize,
            };
            self.handles[handle.index()].visible = visible;
        }
    }

    fn relayout(&mut self) {
        let layout = HandleLayout::from_geometry(&self.geometry);
        for handle in HandleIndex::ALL {
            self.handles[handle.index()].location = layout.get(handle);
        }
    }

    /// Applies `geometry` if it is finite, then re-derives every handle.
    fn commit(&mut self, geometry: RectGeometry) {
        if geometry.is_finite() {
            self.geometry = geometry;
        } else {
            warn!(?geometry, "Discarding non-finite rectangle geometry");
        }
        self.relayout();
    }

    fn solve(&self, dragged: HandleIndex, modifiers: Modifiers) -> RectGeometry {
        let location = self.handle_location(dragged);
        match dragged {
            HandleIndex::Rotate => {
                let (dx, dy) = (location.x - self.geometry.center.x, location.y - self.geometry.center.y);
                // No direction when the handle sits on the center.
                if dx == 0.0 && dy == 0.0 {
                    return self.geometry;
                }
                RectGeometry {
                    angle: dy.atan2(dx),
                    ..self.geometry
                }
            }
            HandleIndex::Center => RectGeometry {
                center: location,
                ..self.geometry
            },
            perimeter => {
                let Some(opposite) = perimeter.opposite() else {
                    return self.geometry;
                };
                let (w_sign, h_sign) = perimeter.signs();
                let request = ResizeRequest {
                    moving: location,
                    fixed: self.handle_location(opposite),
                    restriction: perimeter.restriction(),
                    force_aspect: self.square,
                    w_sign,
                    h_sign,
                };
                adjust_size(&request, &self.geometry, modifiers)
            }
        }
    }
}

impl OverlayArtwork for RectangleArtwork {
    fn paint(&self, surface: &mut dyn RenderSurface, transform: &dyn Transform) {
        let stroke = if self.status.selected {
            self.selected_stroke_width
        } else {
            self.stroke_width
        };

        let corners = CORNERS.map(|h| transform.apply(self.handle_location(h)));
        for (i, from) in corners.iter().enumerate() {
            surface.stroke_line(*from, corners[(i + 1) % corners.len()], self.color, stroke);
        }

        if let Some(caption) = self.caption.as_deref().filter(|c| !c.is_empty()) {
            let lift = self.font.size_px + self.handle_size() / 2.0 + 1.0;
            let anchor =
                corners[0] + Point2D::new(0.0, -lift).rotate_about(Point2D::ZERO, self.geometry.angle);
            let style = TextStyle {
                font: self.font.clone(),
                color: self.color,
                rotation: self.geometry.angle,
                align: TextAlign::TopLeft,
            };
            surface.draw_text(anchor, caption, &style);
        }

        // Disabled artworks show their outline but no handles.
        if !self.status.enabled {
            return;
        }

        for h in CORNERS {
            self.handle(h).draw(surface, transform);
        }
        if self.show_side_handles {
            for h in SIDES {
                self.handle(h).draw(surface, transform);
            }
        }
        if self.show_center_handle {
            self.handle(HandleIndex::Center).draw(surface, transform);
        }
        if self.show_rotate_handle {
            match self.rotate_handle_screen_position(transform) {
                Some(p_rot) => {
                    let pr = transform.apply(self.handle_location(HandleIndex::Right));
                    surface.stroke_line(pr, p_rot, self.color, stroke);
                    self.handle(HandleIndex::Rotate)
                        .draw_at_screen_position(surface, p_rot);
                }
                None => trace!("Rotate handle skipped for degenerate rectangle"),
            }
        }
    }

    fn find_handle(&self, point: Point2D, transform: &dyn Transform) -> Option<HandleHit> {
        let p = transform.apply(point);

        if self.show_rotate_handle {
            if let Some(p_rot) = self.rotate_handle_screen_position(transform) {
                if hit_square(p_rot, p, self.handle(HandleIndex::Rotate).size) {
                    return Some(HandleHit {
                        index: HandleIndex::Rotate.index(),
                        click_offset: p_rot - p,
                    });
                }
            }
        }

        HandleIndex::ALL
            .iter()
            .filter(|h| **h != HandleIndex::Rotate)
            .map(|h| (h.index(), self.handle(*h)))
            .find(|(_, handle)| handle.visible && handle.test(point, transform))
            .map(|(index, handle)| HandleHit {
                index,
                click_offset: transform.apply(handle.location) - p,
            })
    }

    fn handle_count(&self) -> usize {
        HANDLE_COUNT
    }

    fn cursor(&self, index: usize) -> CursorHint {
        HandleIndex::from_index(index)
            .map(|h| self.handle(h).cursor)
            .unwrap_or_default()
    }

    fn move_handle(&mut self, index: usize, location: Point2D, modifiers: Modifiers) {
        let Some(dragged) = HandleIndex::from_index(index) else {
            warn!(index, "Ignoring move of unknown rectangle handle");
            return;
        };
        if !location.is_finite() {
            warn!(index, %location, "Ignoring non-finite handle location");
            return;
        }

        self.handles[index].location = location;
        let solved = self.solve(dragged, modifiers);
        self.commit(solved);
        trace!(
            handle = ?dragged,
            center = %self.geometry.center,
            width = self.geometry.width,
            height = self.geometry.height,
            angle = self.geometry.angle,
            "Rectangle rearranged"
        );
    }

    fn status(&self) -> Status {
        self.status
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
    }
}
