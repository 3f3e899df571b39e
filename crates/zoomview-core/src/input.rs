//! Input state the overlay engine receives from its host.

use serde::{Deserialize, Serialize};

/// Keyboard modifiers sampled by the host at the time of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Mirrors a resize about the current center.
    pub ctrl: bool,
    /// Locks the aspect ratio while resizing.
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
    };
}

/// Pointer buttons the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Mouse cursor shape the host should display over a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CursorHint {
    #[default]
    Default,
    Hand,
    Move,
    ResizeNs,
    ResizeEw,
    ResizeNwse,
    ResizeNesw,
    Rotate,
}
