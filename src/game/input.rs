//! Input Capture
//!
//! Raw per-tick input: digital axes and jump button edges.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;

/// Raw input state for a single tick.
///
/// Axes are digital: -1, 0, or +1. Out-of-range values are read by sign.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Horizontal axis: -1 (left), 0, +1 (right)
    pub axis_x: i8,

    /// Vertical axis: -1 (down), 0, +1 (up)
    /// Down requests a drop through one-way platforms.
    pub axis_y: i8,

    /// Action flags:
    /// - Bit 0: Jump pressed this tick
    /// - Bit 1: Jump released this tick
    pub flags: u8,
}

impl InputFrame {
    /// Jump pressed flag bit
    pub const FLAG_JUMP_PRESSED: u8 = 0x01;

    /// Jump released flag bit
    pub const FLAG_JUMP_RELEASED: u8 = 0x02;

    /// Create an idle frame.
    pub const fn new() -> Self {
        Self {
            axis_x: 0,
            axis_y: 0,
            flags: 0,
        }
    }

    /// Create a frame with axis values.
    pub const fn with_axes(axis_x: i8, axis_y: i8) -> Self {
        Self {
            axis_x,
            axis_y,
            flags: 0,
        }
    }

    /// Same frame with jump pressed.
    pub const fn jump(mut self) -> Self {
        self.flags |= Self::FLAG_JUMP_PRESSED;
        self
    }

    /// Same frame with jump released.
    pub const fn release_jump(mut self) -> Self {
        self.flags |= Self::FLAG_JUMP_RELEASED;
        self
    }

    /// Axes as a direction vector with components in {-1, 0, 1}.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.axis_x.signum() as f32, self.axis_y.signum() as f32)
    }

    /// Check if jump was pressed this tick.
    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.flags & Self::FLAG_JUMP_PRESSED != 0
    }

    /// Check if jump was released this tick.
    #[inline]
    pub fn jump_released(&self) -> bool {
        self.flags & Self::FLAG_JUMP_RELEASED != 0
    }
}
