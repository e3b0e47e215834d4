//! Actor Orientation
//!
//! An actor may be mirrored on either local axis. The mirroring is resolved
//! once into a [`Frame`] of world-space unit vectors, and everything downstream
//! works in that local frame.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;

/// Mirroring of the actor's local axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Local right is world +X, local up is world +Y.
    #[default]
    Normal,
    /// Local right is world -X.
    FlippedX,
    /// Local up is world -Y.
    FlippedY,
    /// Both axes mirrored.
    FlippedBoth,
}

impl Orientation {
    /// Build from independent mirror flags.
    pub const fn from_flags(flip_horizontal: bool, flip_vertical: bool) -> Self {
        match (flip_horizontal, flip_vertical) {
            (false, false) => Orientation::Normal,
            (true, false) => Orientation::FlippedX,
            (false, true) => Orientation::FlippedY,
            (true, true) => Orientation::FlippedBoth,
        }
    }

    /// Derive from Euler angles in degrees, where each angle is a half turn
    /// or none.
    ///
    /// A half turn about Y or about Z mirrors local right; a half turn about
    /// X or about Z mirrors local up. Two half turns on the same local axis
    /// cancel out.
    pub fn from_euler_degrees(x: f32, y: f32, z: f32) -> Self {
        let half_turn = |angle: f32| (angle.rem_euclid(360.0) - 180.0).abs() < 1e-3;
        let (hx, hy, hz) = (half_turn(x), half_turn(y), half_turn(z));
        Self::from_flags(hy != hz, hx != hz)
    }

    /// Whether local right points along world -X.
    #[inline]
    pub const fn flip_horizontal(self) -> bool {
        matches!(self, Orientation::FlippedX | Orientation::FlippedBoth)
    }

    /// Whether local up points along world -Y.
    #[inline]
    pub const fn flip_vertical(self) -> bool {
        matches!(self, Orientation::FlippedY | Orientation::FlippedBoth)
    }

    /// Resolve into world-space unit vectors.
    pub fn frame(self) -> Frame {
        Frame {
            right: if self.flip_horizontal() { Vec2::LEFT } else { Vec2::RIGHT },
            up: if self.flip_vertical() { Vec2::DOWN } else { Vec2::UP },
        }
    }
}

/// World-space unit vectors of the actor's local axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Local +X
    pub right: Vec2,
    /// Local +Y
    pub up: Vec2,
}

impl Frame {
    /// Convert a local-frame vector into world space.
    #[inline]
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        self.right.scale(local.x) + self.up.scale(local.y)
    }

    /// Convert a world-space vector into the local frame.
    #[inline]
    pub fn to_local(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.dot(self.right), world.dot(self.up))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Orientation::Normal.frame()
    }
}
