//! The absolute→screen transform contract.
//!
//! The viewer owns the current pan/zoom state and hands a fresh transform to
//! every paint and hit-test call. Artworks only ever map absolute points to
//! screen points; the inverse mapping belongs to the viewer.

use crate::geometry::Point2D;

/// Maps an absolute-space point to a screen-space point.
pub trait Transform {
    fn apply(&self, p: Point2D) -> Point2D;
}

impl<F> Transform for F
where
    F: Fn(Point2D) -> Point2D,
{
    fn apply(&self, p: Point2D) -> Point2D {
        self(p)
    }
}

/// Wraps a transform so that x and y are exchanged on the way in and on the
/// way out.
///
/// Lets an algorithm written for the horizontal axis measure the vertical
/// axis unchanged.
#[derive(Debug, Clone, Copy)]
pub struct SwapAxes<'a, T: Transform + ?Sized>(pub &'a T);

impl<T: Transform + ?Sized> Transform for SwapAxes<'_, T> {
    fn apply(&self, p: Point2D) -> Point2D {
        self.0.apply(p.swapped()).swapped()
    }
}
