//! Viewer configuration.
//!
//! Holds the defaults that a host application applies to a fresh viewport
//! and to every artwork it creates. Supports JSON and TOML files; the file
//! extension picks the format.
//!
//! Configuration is organized into sections:
//! - Viewport behavior (zoom step, fit, uniform scaling, scale clamps)
//! - Handle appearance (size, rotation lever, outline widths)
//! - Rectangle defaults (color, visible handles, resize policy)
//! - Scale bar sizing and label template
//! - Vertical cursor appearance

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zoomview_core::{Point2D, Rgba};
use zoomview_overlay::{
    FontSpec, Orientation, Overlay, RectangleArtwork, ScaleBar, VCursorArtwork, Viewport,
    DEFAULT_HANDLE_SIZE, DEFAULT_ROTATION_HANDLE_LENGTH, DEFAULT_SCALE_BAR_TEXT,
    DEFAULT_ZOOM_STEP,
};

const CONFIG_DIR_NAME: &str = "zoomview";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Viewport behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Scale factor per wheel notch
    pub zoom_step: f64,
    /// Keep one scale for both axes
    pub square: bool,
    /// Fit the image into the client area until the user zooms
    pub fit: bool,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            zoom_step: DEFAULT_ZOOM_STEP,
            square: true,
            fit: true,
            min_scale: 0.01,
            max_scale: 100.0,
        }
    }
}

/// Handle and outline appearance, in screen pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleSettings {
    pub size_px: f64,
    pub rotation_handle_length_px: f64,
    pub stroke_width: f64,
    pub selected_stroke_width: f64,
}

impl Default for HandleSettings {
    fn default() -> Self {
        Self {
            size_px: DEFAULT_HANDLE_SIZE,
            rotation_handle_length_px: DEFAULT_ROTATION_HANDLE_LENGTH,
            stroke_width: 1.0,
            selected_stroke_width: 3.0,
        }
    }
}

/// Defaults for newly created rectangles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleSettings {
    pub show_rotate_handle: bool,
    pub show_center_handle: bool,
    pub show_side_handles: bool,
    pub allow_resize: bool,
    pub square: bool,
    pub color: Rgba,
    /// Caption font
    pub font: FontSpec,
}

impl Default for RectangleSettings {
    fn default() -> Self {
        Self {
            show_rotate_handle: true,
            show_center_handle: true,
            show_side_handles: true,
            allow_resize: true,
            square: false,
            color: Rgba::RED,
            font: FontSpec::default(),
        }
    }
}

/// Scale bar sizing and labelling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleBarSettings {
    /// Meters per absolute unit
    pub scale: f64,
    /// Label template with `{value}` and `{prefix}` placeholders
    pub text: String,
    pub min_width_px: f64,
    pub max_width_px: f64,
    pub tick_height_px: f64,
    pub color: Rgba,
    pub font: FontSpec,
}

impl Default for ScaleBarSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            text: DEFAULT_SCALE_BAR_TEXT.to_string(),
            min_width_px: 100.0,
            max_width_px: 200.0,
            tick_height_px: 20.0,
            color: Rgba::WHITE,
            font: FontSpec::default(),
        }
    }
}

/// Vertical cursor appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorSettings {
    pub hit_tolerance_px: f64,
    pub color: Rgba,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self {
            hit_tolerance_px: 10.0,
            color: Rgba::YELLOW,
        }
    }
}

/// Complete viewer configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ViewerConfig {
    pub viewport: ViewportSettings,
    pub handles: HandleSettings,
    pub rectangle: RectangleSettings,
    pub scale_bar: ScaleBarSettings,
    pub cursor: CursorSettings,
}

impl ViewerConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<platform config dir>/zoomview/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = FileFormat::from_path(path).ok_or_else(|| {
            SettingsError::LoadError(format!(
                "{}: config file must be .json or .toml",
                path.display()
            ))
        })?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded viewer config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise returns the defaults.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!(
                "No config at {}, using built-in defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating the parent directory.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let format = FileFormat::from_path(path).ok_or_else(|| {
            SettingsError::SaveError(format!(
                "{}: config file must be .json or .toml",
                path.display()
            ))
        })?;
        let content = match format {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved viewer config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let vp = &self.viewport;
        if !(vp.zoom_step.is_finite() && vp.zoom_step > 1.0) {
            return Err(SettingsError::invalid("viewport.zoom_step", "must be > 1"));
        }
        if !(vp.min_scale.is_finite() && vp.min_scale > 0.0) {
            return Err(SettingsError::invalid("viewport.min_scale", "must be > 0"));
        }
        if !(vp.max_scale.is_finite() && vp.max_scale >= vp.min_scale) {
            return Err(SettingsError::invalid(
                "viewport.max_scale",
                "must be >= viewport.min_scale",
            ));
        }

        let h = &self.handles;
        for (key, value) in [
            ("handles.size_px", h.size_px),
            ("handles.rotation_handle_length_px", h.rotation_handle_length_px),
            ("handles.stroke_width", h.stroke_width),
            ("handles.selected_stroke_width", h.selected_stroke_width),
            ("scale_bar.min_width_px", self.scale_bar.min_width_px),
            ("scale_bar.tick_height_px", self.scale_bar.tick_height_px),
            ("scale_bar.scale", self.scale_bar.scale),
            ("cursor.hit_tolerance_px", self.cursor.hit_tolerance_px),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(key, "must be > 0"));
            }
        }

        let sb = &self.scale_bar;
        if !(sb.max_width_px.is_finite() && sb.max_width_px > sb.min_width_px) {
            return Err(SettingsError::invalid(
                "scale_bar.max_width_px",
                "must be greater than scale_bar.min_width_px",
            ));
        }
        if !sb.text.contains("{value}") {
            return Err(SettingsError::invalid(
                "scale_bar.text",
                "must contain the {value} placeholder",
            ));
        }

        Ok(())
    }

    /// A viewport for a client area of the given size, configured from the
    /// `viewport` section.
    pub fn build_viewport(&self, client_width: f64, client_height: f64) -> SettingsResult<Viewport> {
        let vp = &self.viewport;
        let mut viewport = Viewport::new(client_width, client_height);
        viewport.set_zoom_step(vp.zoom_step);
        viewport
            .set_scale_limits(vp.min_scale, vp.max_scale)
            .map_err(|e| SettingsError::invalid("viewport", e.to_string()))?;
        viewport.set_square(vp.square);
        viewport.set_fit(vp.fit);
        Ok(viewport)
    }

    /// Applies handle and rectangle defaults to an existing rectangle.
    pub fn apply_to_rectangle(&self, rect: &mut RectangleArtwork) {
        let h = &self.handles;
        let r = &self.rectangle;
        rect.set_handle_size(h.size_px);
        rect.set_rotation_handle_length(h.rotation_handle_length_px);
        rect.set_stroke_widths(h.stroke_width, h.selected_stroke_width);
        rect.set_color(r.color);
        rect.set_font(r.font.clone());
        rect.set_show_rotate_handle(r.show_rotate_handle);
        rect.set_show_center_handle(r.show_center_handle);
        rect.set_show_side_handles(r.show_side_handles);
        rect.set_allow_resize(r.allow_resize);
        rect.set_square(r.square);
    }

    /// Rectangle with top-left corner `(x, y)` styled from this config.
    pub fn rectangle(&self, x: f64, y: f64, width: f64, height: f64, angle: f64) -> RectangleArtwork {
        let mut rect = RectangleArtwork::new(x, y, width, height, angle, self.rectangle.color);
        self.apply_to_rectangle(&mut rect);
        rect
    }

    /// Artwork factory for the viewer that creates configured rectangles.
    pub fn rectangle_creator(&self) -> impl FnMut(Point2D) -> Option<(Overlay, usize)> {
        let config = self.clone();
        move |start| {
            let (mut rect, handle) = RectangleArtwork::create_at(start, config.rectangle.color);
            config.apply_to_rectangle(&mut rect);
            Some((Overlay::Rectangle(rect), handle.index()))
        }
    }

    pub fn scale_bar(&self, orientation: Orientation) -> ScaleBar {
        let sb = &self.scale_bar;
        let mut bar = match orientation {
            Orientation::Horizontal => ScaleBar::horizontal(sb.scale, sb.text.clone(), sb.color),
            Orientation::Vertical => ScaleBar::vertical(sb.scale, sb.text.clone(), sb.color),
        };
        bar.min_width_px = sb.min_width_px;
        bar.max_width_px = sb.max_width_px;
        bar.tick_height_px = sb.tick_height_px;
        bar.font = sb.font.clone();
        bar
    }

    pub fn vcursor(&self, position: f64) -> VCursorArtwork {
        let mut cursor = VCursorArtwork::new(position);
        cursor.color = self.cursor.color;
        cursor.hit_tolerance_px = self.cursor.hit_tolerance_px;
        cursor
    }
}
