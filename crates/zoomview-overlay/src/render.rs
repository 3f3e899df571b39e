//! Raster backend for [`RenderSurface`] on a tiny-skia pixmap.

use std::path::Path;

use rusttype::{point as rt_point, Scale};
use tiny_skia::{Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::debug;
use zoomview_core::{OverlayError, Point2D, Rgba};

use crate::fonts;
use crate::surface::{RenderSurface, TextAlign, TextStyle};

/// An RGBA pixmap the overlay layer can be painted into.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Creates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self, OverlayError> {
        Pixmap::new(width, height)
            .map(|pixmap| Self { pixmap })
            .ok_or_else(|| OverlayError::Surface(format!("cannot allocate {width}x{height} pixmap")))
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    /// Straight-alpha color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Rgba::new(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, OverlayError> {
        self.pixmap
            .encode_png()
            .map_err(|e| OverlayError::Surface(e.to_string()))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), OverlayError> {
        self.pixmap
            .save_png(path)
            .map_err(|e| OverlayError::Surface(e.to_string()))
    }

    fn paint_for(color: Rgba) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        paint
    }

    /// Source-over blend of `color` at `coverage` into one pixel.
    fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba, coverage: f32) {
        let (w, h) = (i64::from(self.pixmap.width()), i64::from(self.pixmap.height()));
        if x < 0 || y < 0 || x >= w || y >= h {
            return;
        }
        let alpha = f32::from(color.a) / 255.0 * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let idx = ((y * w + x) * 4) as usize;
        let pixel = &mut self.pixmap.data_mut()[idx..idx + 4];
        // Pixmap data is premultiplied RGBA.
        let src = [color.r, color.g, color.b];
        for (dst, s) in pixel.iter_mut().zip(src) {
            let v = f32::from(s) * alpha + f32::from(*dst) * (1.0 - alpha);
            *dst = v.round().clamp(0.0, 255.0) as u8;
        }
        let a = 255.0 * alpha + f32::from(pixel[3]) * (1.0 - alpha);
        pixel[3] = a.round().clamp(0.0, 255.0) as u8;
    }
}

impl RenderSurface for PixmapSurface {
    fn clip_size(&self) -> (f64, f64) {
        (f64::from(self.pixmap.width()), f64::from(self.pixmap.height()))
    }

    fn stroke_line(&mut self, from: Point2D, to: Point2D, color: Rgba, width: f64) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width: width as f32,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &Self::paint_for(color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn fill_square(&mut self, center: Point2D, side: f64, color: Rgba) {
        let half = side / 2.0;
        let Some(rect) = Rect::from_xywh(
            (center.x - half) as f32,
            (center.y - half) as f32,
            side as f32,
            side as f32,
        ) else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &Self::paint_for(color), Transform::identity(), None);
    }

    fn draw_text(&mut self, anchor: Point2D, text: &str, style: &TextStyle) {
        let Some(font) = fonts::font_for(&style.font.family) else {
            debug!(text, "Text skipped, no font available");
            return;
        };
        let scale = Scale::uniform(style.font.size_px as f32);
        let ascent = font.v_metrics(scale).ascent;
        let glyphs: Vec<_> = font.layout(text, scale, rt_point(0.0, ascent)).collect();

        let text_width = glyphs
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        let shift_x = match style.align {
            TextAlign::TopLeft => 0.0,
            TextAlign::TopCenter => -f64::from(text_width) / 2.0,
        };

        // Glyphs are rasterised unrotated in a local frame whose origin is
        // the anchor, then each covered pixel is rotated into place.
        let mut covered = Vec::new();
        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let local = Point2D::new(
                        f64::from(gx as i32 + bb.min.x) + shift_x,
                        f64::from(gy as i32 + bb.min.y),
                    );
                    covered.push((local, v));
                });
            }
        }

        for (local, coverage) in covered {
            let p = anchor + local.rotate_about(Point2D::ZERO, style.rotation);
            self.blend_pixel(p.x.round() as i64, p.y.round() as i64, style.color, coverage);
        }
    }
}
