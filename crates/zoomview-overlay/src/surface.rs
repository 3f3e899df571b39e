//! Render surface abstraction.
//!
//! Artworks paint through [`RenderSurface`] in screen coordinates; they never
//! see the backend. [`DisplayList`] records the calls so a host can replay
//! them elsewhere, and [`PixmapSurface`](crate::render::PixmapSurface)
//! rasterises them with tiny-skia.

use serde::{Deserialize, Serialize};
use zoomview_core::{Point2D, Rgba};

/// Font selection for captions and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    /// Line height in screen pixels.
    pub size_px: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            size_px: 12.0,
        }
    }
}

/// Where the anchor sits relative to the laid out text (before rotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    /// Anchor is the top-left corner of the text box.
    #[default]
    TopLeft,
    /// Anchor is the middle of the top edge of the text box.
    TopCenter,
}

/// How a piece of text is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: FontSpec,
    pub color: Rgba,
    /// Clockwise rotation on screen, in radians, about the anchor.
    pub rotation: f64,
    pub align: TextAlign,
}

/// A screen-space drawing target.
pub trait RenderSurface {
    /// Width and height of the drawable area in pixels.
    fn clip_size(&self) -> (f64, f64);

    fn stroke_line(&mut self, from: Point2D, to: Point2D, color: Rgba, width: f64);

    /// Fills an axis-aligned square of side `side` centered on `center`.
    fn fill_square(&mut self, center: Point2D, side: f64, color: Rgba);

    fn draw_text(&mut self, anchor: Point2D, text: &str, style: &TextStyle);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point2D,
        to: Point2D,
        color: Rgba,
        width: f64,
    },
    Square {
        center: Point2D,
        side: f64,
        color: Rgba,
    },
    Text {
        anchor: Point2D,
        text: String,
        style: TextStyle,
    },
}

/// A surface that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded lines as `(from, to, width)`.
    pub fn lines(&self) -> impl Iterator<Item = (Point2D, Point2D, f64)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line {
                from, to, width, ..
            } => Some((*from, *to, *width)),
            _ => None,
        })
    }

    /// Centers of recorded squares.
    pub fn squares(&self) -> impl Iterator<Item = Point2D> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Square { center, .. } => Some(*center),
            _ => None,
        })
    }

    /// Recorded text strings.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Replays the recorded calls onto another surface.
    pub fn replay(&self, target: &mut dyn RenderSurface) {
        for command in &self.commands {
            match command {
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => target.stroke_line(*from, *to, *color, *width),
                DrawCommand::Square {
                    center,
                    side,
                    color,
                } => target.fill_square(*center, *side, *color),
                DrawCommand::Text {
                    anchor,
                    text,
                    style,
                } => target.draw_text(*anchor, text, style),
            }
        }
    }
}

impl RenderSurface for DisplayList {
    fn clip_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn stroke_line(&mut self, from: Point2D, to: Point2D, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_square(&mut self, center: Point2D, side: f64, color: Rgba) {
        self.commands.push(DrawCommand::Square {
            center,
            side,
            color,
        });
    }

    fn draw_text(&mut self, anchor: Point2D, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            anchor,
            text: text.to_string(),
            style: style.clone(),
        });
    }
}
