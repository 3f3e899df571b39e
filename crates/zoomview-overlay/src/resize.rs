//! Constrained resize of a rotated rectangle.
//!
//! A drag on a perimeter handle is reconciled with the rectangle's rotation,
//! an axis restriction (side handles change one dimension only), aspect lock,
//! and two modifier-driven modes:
//!
//! - **pivot** (default): the opposite handle stays fixed and the center is
//!   re-derived from it.
//! - **symmetric** (Ctrl): the rectangle grows or shrinks about its current
//!   center.
//!
//! Shift (or a forced aspect lock) collapses the result to a square.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use zoomview_core::{Modifiers, Point2D};

use crate::layout::RectGeometry;

/// Which dimension a resize may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Restriction {
    /// Corner handle: both dimensions.
    #[default]
    None,
    /// Left/right handle: width only.
    Width,
    /// Top/bottom handle: height only.
    Height,
}

/// Input of one resize solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeRequest {
    /// Raw location of the dragged handle.
    pub moving: Point2D,
    /// Location of the handle opposite the dragged one. Unused in symmetric
    /// mode.
    pub fixed: Point2D,
    pub restriction: Restriction,
    /// Aspect lock independent of Shift (the artwork's `square` flag).
    pub force_aspect: bool,
    /// Width sign of the dragged handle's quadrant (-1, 0 or 1).
    pub w_sign: f64,
    /// Height sign of the dragged handle's quadrant (-1, 0 or 1).
    pub h_sign: f64,
}

/// Solves the new geometry for a handle drag.
///
/// `current` supplies the center, rotation, and the dimensions kept when an
/// axis restriction forbids changing them. The rotation is never changed.
/// Width and height of the result are non-negative. The result may be
/// non-finite if the inputs were; callers decide whether to commit it.
pub fn adjust_size(request: &ResizeRequest, current: &RectGeometry, modifiers: Modifiers) -> RectGeometry {
    let keep_symmetry = modifiers.ctrl;
    let keep_aspect = request.force_aspect || modifiers.shift;
    let angle = current.angle;

    // Symmetric mode measures against the mirror of the dragged point through
    // the center, which stays put, so repeating a move is a no-op.
    let anchor = if keep_symmetry {
        current.center * 2.0 - request.moving
    } else {
        request.fixed
    };
    let theta = (request.moving.y - anchor.y).atan2(request.moving.x - anchor.x);
    let (sin_beta, cos_beta) = (theta - angle - FRAC_PI_2).sin_cos();

    let mut solved = *current;

    if keep_symmetry {
        let d = request.moving.distance_to(&current.center);
        solved.height = 2.0 * (d * cos_beta).abs();
        solved.width = 2.0 * (d * sin_beta).abs();

        if keep_aspect {
            let side = solved.width.max(solved.height);
            solved.width = side;
            solved.height = side;
        } else {
            match request.restriction {
                Restriction::Height => solved.width = current.width,
                Restriction::Width => solved.height = current.height,
                Restriction::None => {}
            }
        }
        // The center stays where it is, even when one dimension was restored.
        return solved;
    }

    let d = request.moving.distance_to(&request.fixed);
    match request.restriction {
        Restriction::Width => {
            solved.width = (d * sin_beta).abs();
            if keep_aspect {
                solved.height = solved.width;
            }
        }
        Restriction::Height => {
            solved.height = (d * cos_beta).abs();
            if keep_aspect {
                solved.width = solved.height;
            }
        }
        Restriction::None => {
            solved.width = (d * sin_beta).abs();
            solved.height = (d * cos_beta).abs();
            if keep_aspect {
                let side = solved.width.max(solved.height);
                solved.width = side;
                solved.height = side;
            }
        }
    }

    let (sin_a, cos_a) = angle.sin_cos();
    let half_w = request.w_sign * solved.width / 2.0;
    let half_h = request.h_sign * solved.height / 2.0;
    solved.center = Point2D::new(
        request.fixed.x + half_w * cos_a - half_h * sin_a,
        request.fixed.y + half_w * sin_a + half_h * cos_a,
    );
    solved
}
