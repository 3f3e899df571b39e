//! Artwork status flags.
//!
//! The three flags are orthogonal. `visible` gates painting, `enabled` gates
//! handle drawing and hit testing, and `selected` only changes the stroke
//! weight.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Independent selection / enable / visibility flags of an artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Status {
    pub selected: bool,
    pub enabled: bool,
    pub visible: bool,
}

impl Status {
    pub const NONE: Status = Status {
        selected: false,
        enabled: false,
        visible: false,
    };
    pub const SELECTED: Status = Status {
        selected: true,
        ..Status::NONE
    };
    pub const ENABLED: Status = Status {
        enabled: true,
        ..Status::NONE
    };
    pub const VISIBLE: Status = Status {
        visible: true,
        ..Status::NONE
    };
    pub const ALL: Status = Status {
        selected: true,
        enabled: true,
        visible: true,
    };

    /// True when every flag set in `other` is also set in `self`.
    pub fn contains(&self, other: Status) -> bool {
        (!other.selected || self.selected)
            && (!other.enabled || self.enabled)
            && (!other.visible || self.visible)
    }

    /// Both enabled and visible: the precondition for hit testing.
    pub fn is_interactive(&self) -> bool {
        self.enabled && self.visible
    }

    /// Bit encoding: Selected=1, Enabled=2, Visible=4.
    pub fn bits(&self) -> u8 {
        u8::from(self.selected) | (u8::from(self.enabled) << 1) | (u8::from(self.visible) << 2)
    }

    /// Inverse of [`Status::bits`]; unknown bits are ignored.
    pub fn from_bits(bits: u8) -> Status {
        Status {
            selected: bits & 1 != 0,
            enabled: bits & 2 != 0,
            visible: bits & 4 != 0,
        }
    }
}

impl BitOr for Status {
    type Output = Status;

    fn bitor(self, rhs: Status) -> Status {
        Status {
            selected: self.selected || rhs.selected,
            enabled: self.enabled || rhs.enabled,
            visible: self.visible || rhs.visible,
        }
    }
}
