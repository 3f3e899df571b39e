//! Viewport state and the absolute↔screen mapping.
//!
//! Absolute coordinates are image pixels, screen coordinates are pixels of
//! the client area. The mapping is a per-axis scale followed by a scroll
//! offset:
//!
//! ```text
//! screen = abs * scale + scroll
//! abs    = (screen - scroll) / scale
//! ```
//!
//! `scroll` is the screen position of the image origin and is never positive
//! once the image is larger than the client area.

use serde::{Deserialize, Serialize};
use tracing::debug;
use zoomview_core::{Point2D, Transform, ViewportError};

/// Default factor applied per wheel notch.
pub const DEFAULT_ZOOM_STEP: f64 = 1.1;

const DEFAULT_MIN_SCALE: f64 = 0.01;
const DEFAULT_MAX_SCALE: f64 = 100.0;

/// Pan and zoom state of an image shown in a client area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    scale_x: f64,
    scale_y: f64,
    scroll: Point2D,
    client_width: f64,
    client_height: f64,
    image_width: f64,
    image_height: f64,
    square: bool,
    fit: bool,
    zoom_step: f64,
    min_scale: f64,
    max_scale: f64,
}

impl Viewport {
    /// Creates a viewport for a client area of the given size, with no image
    /// yet, uniform scale, and fit mode on.
    pub fn new(client_width: f64, client_height: f64) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            scroll: Point2D::ZERO,
            client_width,
            client_height,
            image_width: 0.0,
            image_height: 0.0,
            square: true,
            fit: true,
            zoom_step: DEFAULT_ZOOM_STEP,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }

    pub fn client_size(&self) -> (f64, f64) {
        (self.client_width, self.client_height)
    }

    /// Sets the client area size (typically on window resize).
    pub fn set_client_size(&mut self, width: f64, height: f64) {
        self.client_width = width;
        self.client_height = height;
        self.update();
    }

    pub fn image_size(&self) -> (f64, f64) {
        (self.image_width, self.image_height)
    }

    pub fn set_image_size(&mut self, width: f64, height: f64) {
        self.image_width = width;
        self.image_height = height;
        self.update();
    }

    pub fn zoom_step(&self) -> f64 {
        self.zoom_step
    }

    pub fn set_zoom_step(&mut self, step: f64) {
        self.zoom_step = step;
    }

    /// Sets the clamp range applied to every scale change.
    pub fn set_scale_limits(&mut self, min: f64, max: f64) -> Result<(), ViewportError> {
        if !(min > 0.0 && min.is_finite()) {
            return Err(ViewportError::InvalidScale { value: min });
        }
        if !(max >= min && max.is_finite()) {
            return Err(ViewportError::InvalidScale { value: max });
        }
        self.min_scale = min;
        self.max_scale = max;
        Ok(())
    }

    pub fn is_square(&self) -> bool {
        self.square
    }

    /// Switches between uniform and per-axis scaling. Entering uniform mode
    /// adopts the horizontal scale for both axes.
    pub fn set_square(&mut self, square: bool) {
        self.square = square;
        if square {
            self.scale_y = self.scale_x;
        }
        self.update();
    }

    pub fn is_fit(&self) -> bool {
        self.fit
    }

    pub fn set_fit(&mut self, fit: bool) {
        self.fit = fit;
        self.update();
    }

    pub fn scroll(&self) -> Point2D {
        self.scroll
    }

    /// Sets the screen position of the image origin, clamped to the
    /// scrollable range.
    pub fn set_scroll(&mut self, scroll: Point2D) {
        self.scroll = scroll;
        self.clamp_scroll();
    }

    /// Pans by a screen delta.
    pub fn pan_by(&mut self, delta: Point2D) {
        self.set_scroll(self.scroll + delta);
    }

    /// The uniform display scale.
    ///
    /// Fails in anisotropic mode, where no single scale describes the view.
    pub fn display_scale(&self) -> Result<f64, ViewportError> {
        if !self.square {
            return Err(ViewportError::NotUniformScale {
                scale_x: self.scale_x,
                scale_y: self.scale_y,
            });
        }
        Ok(self.scale_x)
    }

    /// Sets both axes to `scale` and leaves fit mode.
    pub fn set_display_scale(&mut self, scale: f64) -> Result<(), ViewportError> {
        let scale = self.checked_scale(scale)?;
        self.fit = false;
        self.scale_x = scale;
        self.scale_y = scale;
        self.update();
        Ok(())
    }

    pub fn display_scale_anisotropic(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    /// Sets the per-axis scale and leaves fit mode. In uniform mode the
    /// vertical component is ignored and `scale_y` follows `scale_x`.
    pub fn set_display_scale_anisotropic(
        &mut self,
        scale_x: f64,
        scale_y: f64,
    ) -> Result<(), ViewportError> {
        let scale_x = self.checked_scale(scale_x)?;
        let scale_y = if self.square {
            scale_x
        } else {
            self.checked_scale(scale_y)?
        };
        self.fit = false;
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self.update();
        Ok(())
    }

    /// Re-fits the scale if fit mode is on and clamps the scroll offset.
    pub fn update(&mut self) {
        if self.fit && self.image_width > 0.0 && self.image_height > 0.0 {
            let fx = self.client_width / self.image_width;
            let fy = self.client_height / self.image_height;
            if fx > 0.0 && fy > 0.0 {
                if self.square {
                    let s = fx.min(fy);
                    self.scale_x = s;
                    self.scale_y = s;
                } else {
                    self.scale_x = fx;
                    self.scale_y = fy;
                }
            }
        }
        self.clamp_scroll();
    }

    /// Zooms by `steps` wheel notches (positive zooms in) keeping the
    /// absolute point under `screen` stationary.
    pub fn zoom_at(&mut self, screen: Point2D, steps: i32) {
        if steps == 0 {
            return;
        }
        let anchor = self.scr_to_abs(screen);
        let factor = self.zoom_step.powi(steps);
        self.fit = false;
        self.scale_x = self.clamp_scale(self.scale_x * factor);
        self.scale_y = if self.square {
            self.scale_x
        } else {
            self.clamp_scale(self.scale_y * factor)
        };
        self.scroll = Point2D::new(
            screen.x - anchor.x * self.scale_x,
            screen.y - anchor.y * self.scale_y,
        );
        self.update();
        debug!(
            scale_x = self.scale_x,
            scale_y = self.scale_y,
            "Zoomed at {}",
            screen
        );
    }

    /// One zoom step in, about the client center.
    pub fn zoom_in(&mut self) {
        self.zoom_at(self.client_center(), 1);
    }

    /// One zoom step out, about the client center.
    pub fn zoom_out(&mut self) {
        self.zoom_at(self.client_center(), -1);
    }

    /// One image pixel per screen pixel.
    pub fn zoom_1to1(&mut self) {
        self.fit = false;
        self.scale_x = 1.0;
        self.scale_y = 1.0;
        self.update();
    }

    /// Zooms so that the screen rectangle spanned by `a` and `b` fills the
    /// client area, with its top-left corner at the client origin.
    pub fn zoom_to_window(&mut self, a: Point2D, b: Point2D) -> Result<(), ViewportError> {
        let top_left = self.scr_to_abs(Point2D::new(a.x.min(b.x), a.y.min(b.y)));
        let bottom_right = self.scr_to_abs(Point2D::new(a.x.max(b.x), a.y.max(b.y)));
        let w = bottom_right.x - top_left.x;
        let h = bottom_right.y - top_left.y;
        if !(w > 0.0 && h > 0.0) {
            return Err(ViewportError::EmptyZoomWindow);
        }

        let fx = self.client_width / w;
        let fy = self.client_height / h;
        if self.square {
            self.set_display_scale(fx.min(fy))?;
        } else {
            self.set_display_scale_anisotropic(fx, fy)?;
        }
        self.set_scroll(Point2D::new(
            -top_left.x * self.scale_x,
            -top_left.y * self.scale_y,
        ));
        debug!(%top_left, %bottom_right, "Zoomed to window");
        Ok(())
    }

    pub fn abs_to_scr(&self, p: Point2D) -> Point2D {
        Point2D::new(
            p.x * self.scale_x + self.scroll.x,
            p.y * self.scale_y + self.scroll.y,
        )
    }

    pub fn scr_to_abs(&self, p: Point2D) -> Point2D {
        Point2D::new(
            (p.x - self.scroll.x) / self.scale_x,
            (p.y - self.scroll.y) / self.scale_y,
        )
    }

    /// True when `p` (absolute) lies on the image.
    pub fn contains_abs(&self, p: Point2D) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.image_width && p.y < self.image_height
    }

    fn client_center(&self) -> Point2D {
        Point2D::new(self.client_width / 2.0, self.client_height / 2.0)
    }

    fn checked_scale(&self, value: f64) -> Result<f64, ViewportError> {
        if value.is_finite() && value > 0.0 {
            Ok(self.clamp_scale(value))
        } else {
            Err(ViewportError::InvalidScale { value })
        }
    }

    fn clamp_scale(&self, value: f64) -> f64 {
        value.clamp(self.min_scale, self.max_scale)
    }

    fn clamp_scroll(&mut self) {
        let min_x = (self.client_width - self.image_width * self.scale_x).min(0.0);
        let min_y = (self.client_height - self.image_height * self.scale_y).min(0.0);
        self.scroll = Point2D::new(
            self.scroll.x.clamp(min_x, 0.0),
            self.scroll.y.clamp(min_y, 0.0),
        );
    }
}

impl Transform for Viewport {
    fn apply(&self, p: Point2D) -> Point2D {
        self.abs_to_scr(p)
    }
}
