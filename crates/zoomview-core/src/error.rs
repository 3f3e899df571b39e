//! Error handling for ZoomView
//!
//! Hit-test misses and cursor lookups for unknown handles are not errors;
//! they come back as `None` / a default value. The types here cover
//! contract violations by the host and malformed input.

use thiserror::Error;

/// Viewport error type
///
/// Raised when the host queries or configures the viewport outside the
/// accessor's precondition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewportError {
    /// The uniform-scale accessor was used while the viewport scales each
    /// axis independently.
    #[error("Can't use a uniform display scale in anisotropic mode (scale_x={scale_x}, scale_y={scale_y})")]
    NotUniformScale {
        /// The current horizontal scale.
        scale_x: f64,
        /// The current vertical scale.
        scale_y: f64,
    },

    /// A scale factor was zero, negative, or not finite.
    #[error("Invalid display scale: {value}")]
    InvalidScale {
        /// The rejected scale value.
        value: f64,
    },

    /// A zoom window with zero width or height.
    #[error("Zoom window is empty")]
    EmptyZoomWindow,
}

/// Overlay error type
///
/// Represents malformed commands sent to an artwork.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OverlayError {
    /// Handle index outside the artwork's handle table.
    #[error("Invalid handle index {index} (artwork has {count} handles)")]
    InvalidHandle {
        /// The requested index.
        index: usize,
        /// Number of handles the artwork owns.
        count: usize,
    },

    /// Overlay index outside the viewer's collection.
    #[error("Unknown overlay {index} (viewer holds {count})")]
    UnknownOverlay {
        /// The requested index.
        index: usize,
        /// Number of overlays in the viewer.
        count: usize,
    },

    /// A coordinate was NaN or infinite.
    #[error("Non-finite coordinate ({x}, {y})")]
    NonFiniteInput {
        /// The rejected x component.
        x: f64,
        /// The rejected y component.
        y: f64,
    },

    /// The render surface could not be created or written.
    #[error("Render surface error: {0}")]
    Surface(String),
}

/// Main error type for ZoomView
#[derive(Error, Debug)]
pub enum Error {
    /// Viewport error
    #[error(transparent)]
    Viewport(#[from] ViewportError),

    /// Overlay error
    #[error(transparent)]
    Overlay(#[from] OverlayError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a viewport contract violation
    pub fn is_viewport_error(&self) -> bool {
        matches!(self, Error::Viewport(_))
    }

    /// Check if this is an overlay error
    pub fn is_overlay_error(&self) -> bool {
        matches!(self, Error::Overlay(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
