//! # ZoomView Core
//!
//! Core types shared by every ZoomView crate: points in absolute (image) and
//! screen space, the absolute→screen [`Transform`] contract, artwork
//! [`Status`] flags, input state passed into the overlay engine, and the
//! error types used in public APIs.

pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
pub mod status;
pub mod transform;

pub use color::Rgba;
pub use error::{Error, OverlayError, Result, ViewportError};
pub use geometry::Point2D;
pub use input::{CursorHint, Modifiers, PointerButton};
pub use status::Status;
pub use transform::{SwapAxes, Transform};
