//! ZoomView Settings Crate
//!
//! Loads, validates and persists viewer defaults, and applies them to the
//! viewport and artworks built by `zoomview-overlay`.

pub mod config;
pub mod error;

pub use config::{
    CursorSettings, HandleSettings, RectangleSettings, ScaleBarSettings, ViewerConfig,
    ViewportSettings,
};
pub use error::{SettingsError, SettingsResult};
