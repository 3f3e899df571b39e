//! Horizontal and vertical scale bars.
//!
//! A scale bar is pinned to the clip area rather than to the image. Its
//! length is chosen from the current zoom so that it shows a round number of
//! units while staying between a minimum and maximum screen width.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use tracing::debug;
use zoomview_core::{CursorHint, Modifiers, Point2D, Rgba, Status, SwapAxes, Transform};

use crate::artwork::{HandleHit, OverlayArtwork};
use crate::surface::{FontSpec, RenderSurface, TextAlign, TextStyle};

/// Mantissas a scale bar length may take within a decade.
const NICE_NUMBERS: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

const DECADES: [f64; 9] = [1e-12, 1e-9, 1e-6, 1e-3, 1.0, 1e3, 1e6, 1e9, 1e12];
const PREFIXES: [&str; 9] = ["p", "n", "µ", "m", "", "k", "M", "G", "T"];

const BAR_STROKE_WIDTH: f64 = 2.0;

/// Default label template; `{value}` and `{prefix}` are substituted.
pub const DEFAULT_SCALE_BAR_TEXT: &str = "{value} {prefix}m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleBar {
    pub orientation: Orientation,
    /// Screen offset of the bar. Non-negative components anchor to the
    /// top/left edge of the clip area, negative ones to the bottom/right.
    pub location: Point2D,
    /// Units per absolute pixel.
    pub scale: f64,
    pub text: String,
    pub min_width_px: f64,
    pub max_width_px: f64,
    /// Length of the end ticks.
    pub tick_height_px: f64,
    pub color: Rgba,
    pub font: FontSpec,
    pub status: Status,
}

impl ScaleBar {
    pub fn horizontal(scale: f64, text: impl Into<String>, color: Rgba) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            location: Point2D::new(30.0, -40.0),
            scale,
            text: text.into(),
            min_width_px: 100.0,
            max_width_px: 200.0,
            tick_height_px: 20.0,
            color,
            font: FontSpec::default(),
            status: Status::ENABLED | Status::VISIBLE,
        }
    }

    pub fn vertical(scale: f64, text: impl Into<String>, color: Rgba) -> Self {
        Self {
            orientation: Orientation::Vertical,
            location: Point2D::new(-30.0, -30.0),
            ..Self::horizontal(scale, text, color)
        }
    }

    /// Picks the bar length as `(number of units, width in screen pixels)`.
    ///
    /// The vertical bar measures along y by running the same computation
    /// through a swapped-axes transform.
    pub fn size(&self, transform: &dyn Transform) -> (f64, f64) {
        match self.orientation {
            Orientation::Horizontal => self.size_along_x(transform),
            Orientation::Vertical => self.size_along_x(&SwapAxes(transform)),
        }
    }

    fn size_along_x(&self, transform: &dyn Transform) -> (f64, f64) {
        let s1 = transform.apply(Point2D::new(1.0, 0.0)).x - transform.apply(Point2D::ZERO).x;
        let decade = 10f64.powf(
            (self.max_width_px / (NICE_NUMBERS[0] / self.scale * s1))
                .log10()
                .floor(),
        );
        let target = (self.min_width_px + self.max_width_px) / 2.0;

        // min_by keeps the first of equally close candidates.
        NICE_NUMBERS
            .iter()
            .map(|n| {
                let number = decade * n;
                (number, number / self.scale * s1)
            })
            .min_by(|a, b| (target - a.1).abs().total_cmp(&(target - b.1).abs()))
            .unwrap_or((0.0, 0.0))
    }

    /// The label for `number` units with the template applied.
    pub fn label(&self, number: f64) -> String {
        let (value, prefix) = add_prefix(number);
        self.text
            .replace("{value}", &format_number(value))
            .replace("{prefix}", prefix)
    }

    fn label_style(&self, rotation: f64) -> TextStyle {
        TextStyle {
            font: self.font.clone(),
            color: self.color,
            rotation,
            align: TextAlign::TopCenter,
        }
    }

    fn bar_line(&self, surface: &mut dyn RenderSurface, a: (f64, f64), b: (f64, f64)) {
        surface.stroke_line(a.into(), b.into(), self.color, BAR_STROKE_WIDTH);
    }

    fn paint_horizontal(&self, surface: &mut dyn RenderSurface, width: f64, label: &str) {
        let (clip_w, clip_h) = surface.clip_size();
        let px1 = if self.location.x >= 0.0 {
            self.location.x
        } else {
            clip_w + self.location.x - width
        };
        let px2 = px1 + width;
        let py = if self.location.y >= 0.0 {
            self.location.y
        } else {
            clip_h + self.location.y
        };
        let half = self.tick_height_px / 2.0;

        self.bar_line(surface, (px1, py), (px2, py));
        self.bar_line(surface, (px1, py - half), (px1, py + half));
        self.bar_line(surface, (px2, py - half), (px2, py + half));

        surface.draw_text(
            Point2D::new((px1 + px2) / 2.0, py + 2.0),
            label,
            &self.label_style(0.0),
        );
    }

    fn paint_vertical(&self, surface: &mut dyn RenderSurface, width: f64, label: &str) {
        let (clip_w, clip_h) = surface.clip_size();
        let px = if self.location.x >= 0.0 {
            self.location.x
        } else {
            clip_w + self.location.x
        };
        let py1 = if self.location.y >= 0.0 {
            self.location.y
        } else {
            clip_h + self.location.y - width
        };
        let py2 = py1 + width;
        let half = self.tick_height_px / 2.0;

        self.bar_line(surface, (px, py1), (px, py2));
        self.bar_line(surface, (px - half, py1), (px + half, py1));
        self.bar_line(surface, (px - half, py2), (px + half, py2));

        surface.draw_text(
            Point2D::new(px + 2.0, (py1 + py2) / 2.0),
            label,
            &self.label_style(-FRAC_PI_2),
        );
    }
}

impl OverlayArtwork for ScaleBar {
    fn paint(&self, surface: &mut dyn RenderSurface, transform: &dyn Transform) {
        let (number, width) = self.size(transform);
        if !(width.is_finite() && width > 0.0) {
            debug!(number, width, "Scale bar skipped, no usable length at this zoom");
            return;
        }
        let label = self.label(number);
        match self.orientation {
            Orientation::Horizontal => self.paint_horizontal(surface, width, &label),
            Orientation::Vertical => self.paint_vertical(surface, width, &label),
        }
    }

    fn find_handle(&self, _point: Point2D, _transform: &dyn Transform) -> Option<HandleHit> {
        None
    }

    fn handle_count(&self) -> usize {
        0
    }

    fn cursor(&self, _index: usize) -> CursorHint {
        CursorHint::Default
    }

    fn move_handle(&mut self, _index: usize, _location: Point2D, _modifiers: Modifiers) {}

    fn status(&self) -> Status {
        self.status
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
    }
}

/// Splits `x` into a mantissa and an SI prefix, e.g. `2500.0 -> (2.5, "k")`.
///
/// Values outside `[1e-12, 1e12)` come back unchanged with an empty prefix.
pub fn add_prefix(x: f64) -> (f64, &'static str) {
    DECADES
        .windows(2)
        .zip(PREFIXES)
        .find(|(w, _)| w[0] <= x && x < w[1])
        .map(|(w, prefix)| (x / w[0], prefix))
        .unwrap_or((x, ""))
}

/// Formats with at most six significant digits and no trailing zeros.
fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = if value == 0.0 {
        0
    } else {
        value.abs().log10().floor() as i32
    };
    let decimals = (5 - magnitude).clamp(0, 17) as usize;
    let s = format!("{value:.decimals$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
