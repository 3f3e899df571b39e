//! Handle slots of a rotated rectangle and their derived positions.

use serde::{Deserialize, Serialize};
use zoomview_core::{CursorHint, Point2D};

use crate::resize::Restriction;

/// Number of handles a rectangle owns.
pub const HANDLE_COUNT: usize = 10;

/// Fixed handle slots of a rectangle artwork, in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleIndex {
    TopLeft = 0,
    Top = 1,
    TopRight = 2,
    Right = 3,
    BottomRight = 4,
    Bottom = 5,
    BottomLeft = 6,
    Left = 7,
    Center = 8,
    Rotate = 9,
}

impl HandleIndex {
    pub const ALL: [HandleIndex; HANDLE_COUNT] = [
        HandleIndex::TopLeft,
        HandleIndex::Top,
        HandleIndex::TopRight,
        HandleIndex::Right,
        HandleIndex::BottomRight,
        HandleIndex::Bottom,
        HandleIndex::BottomLeft,
        HandleIndex::Left,
        HandleIndex::Center,
        HandleIndex::Rotate,
    ];

    pub fn from_index(index: usize) -> Option<HandleIndex> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            HandleIndex::TopLeft
                | HandleIndex::TopRight
                | HandleIndex::BottomRight
                | HandleIndex::BottomLeft
        )
    }

    pub fn is_side(self) -> bool {
        matches!(
            self,
            HandleIndex::Top | HandleIndex::Right | HandleIndex::Bottom | HandleIndex::Left
        )
    }

    /// The diametrically opposite perimeter handle.
    pub fn opposite(self) -> Option<HandleIndex> {
        use HandleIndex::*;
        match self {
            TopLeft => Some(BottomRight),
            Top => Some(Bottom),
            TopRight => Some(BottomLeft),
            Right => Some(Left),
            BottomRight => Some(TopLeft),
            Bottom => Some(Top),
            BottomLeft => Some(TopRight),
            Left => Some(Right),
            Center | Rotate => None,
        }
    }

    /// Axis a resize from this handle is restricted to.
    pub fn restriction(self) -> Restriction {
        use HandleIndex::*;
        match self {
            Top | Bottom => Restriction::Height,
            Left | Right => Restriction::Width,
            _ => Restriction::None,
        }
    }

    /// Quadrant of the handle relative to the center in the rectangle's own
    /// frame, as `(width sign, height sign)`.
    pub fn signs(self) -> (f64, f64) {
        use HandleIndex::*;
        match self {
            TopLeft => (-1.0, -1.0),
            Top => (0.0, -1.0),
            TopRight => (1.0, -1.0),
            Right => (1.0, 0.0),
            BottomRight => (1.0, 1.0),
            Bottom => (0.0, 1.0),
            BottomLeft => (-1.0, 1.0),
            Left => (-1.0, 0.0),
            Center | Rotate => (0.0, 0.0),
        }
    }

    pub fn cursor(self) -> CursorHint {
        use HandleIndex::*;
        match self {
            TopLeft | BottomRight => CursorHint::ResizeNwse,
            TopRight | BottomLeft => CursorHint::ResizeNesw,
            Top | Bottom => CursorHint::ResizeNs,
            Left | Right => CursorHint::ResizeEw,
            Center => CursorHint::Move,
            Rotate => CursorHint::Rotate,
        }
    }
}

/// Center, size, and rotation of a rectangle in absolute space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectGeometry {
    pub center: Point2D,
    pub width: f64,
    pub height: f64,
    /// Rotation in radians.
    pub angle: f64,
}

impl RectGeometry {
    pub fn new(center: Point2D, width: f64, height: f64, angle: f64) -> Self {
        Self {
            center,
            width,
            height,
            angle,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.center.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.angle.is_finite()
    }
}

/// Absolute positions of all ten handles, derived from a [`RectGeometry`].
///
/// The perimeter handles sit on the rotated corners and edge midpoints. The
/// rotate handle's canonical absolute position is the right edge midpoint;
/// its on-screen position is extrapolated outward from there at paint time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLayout {
    positions: [Point2D; HANDLE_COUNT],
}

impl HandleLayout {
    pub fn from_geometry(geometry: &RectGeometry) -> Self {
        let c = geometry.center;
        let hw = geometry.width / 2.0;
        let hh = geometry.height / 2.0;
        let place = |dx: f64, dy: f64| Point2D::new(c.x + dx, c.y + dy).rotate_about(c, geometry.angle);

        let mut positions = [c; HANDLE_COUNT];
        for handle in HandleIndex::ALL {
            let (ws, hs) = handle.signs();
            positions[handle.index()] = match handle {
                HandleIndex::Center => c,
                HandleIndex::Rotate => place(hw, 0.0),
                _ => place(ws * hw, hs * hh),
            };
        }
        Self { positions }
    }

    pub fn get(&self, handle: HandleIndex) -> Point2D {
        self.positions[handle.index()]
    }

    pub fn positions(&self) -> &[Point2D; HANDLE_COUNT] {
        &self.positions
    }
}
