//! Raycast Seam
//!
//! The resolver only needs one query from its environment: cast a ray and
//! report the nearest surface it meets. Anything that can answer that query
//! implements [`RaycastWorld`].

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;

/// How a surface reacts to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SurfaceTag {
    /// Blocks motion from every direction.
    #[default]
    Solid,
    /// One-way platform: blocks only downward motion, and can be dropped
    /// through on request.
    PassThrough,
}

/// Bit set of collision layers (32 layers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Mask matching every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Mask matching no layer.
    pub const NONE: Self = Self(0);

    /// Mask matching a single layer.
    ///
    /// Layers above 31 match nothing.
    pub const fn layer(layer: u8) -> Self {
        if layer < 32 {
            Self(1 << layer)
        } else {
            Self::NONE
        }
    }

    /// Add a layer to the mask.
    pub const fn with(self, layer: u8) -> Self {
        Self(self.0 | Self::layer(layer).0)
    }

    /// Check whether a layer is part of the mask.
    #[inline]
    pub const fn contains(self, layer: u8) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// A ray hit reported by the environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// Unit surface normal at the hit point, facing the ray origin.
    pub normal: Vec2,
    /// World position of the hit point.
    pub point: Vec2,
    /// Surface kind.
    pub tag: SurfaceTag,
}

impl RayHit {
    /// Create a hit result.
    pub fn new(distance: f32, normal: Vec2, point: Vec2, tag: SurfaceTag) -> Self {
        Self {
            distance,
            normal,
            point,
            tag,
        }
    }

    /// Check whether this hit is a one-way platform.
    #[inline]
    pub fn is_pass_through(&self) -> bool {
        self.tag == SurfaceTag::PassThrough
    }
}

/// Ray-casting primitive supplied by the environment.
pub trait RaycastWorld {
    /// Cast a ray from `origin` along the unit vector `direction`.
    ///
    /// Returns the nearest hit within `max_distance` among surfaces on a
    /// layer in `mask`. `max_distance` may be `f32::INFINITY`.
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask) -> Option<RayHit>;
}

impl<W: RaycastWorld + ?Sized> RaycastWorld for &W {
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        (**self).cast(origin, direction, max_distance, mask)
    }
}
