//! Static Colliders
//!
//! Segment and box shapes with ray intersection.

use serde::{Serialize, Deserialize};

use crate::controller::raycast::{RayHit, SurfaceTag};
use crate::core::aabb::Aabb;
use crate::core::vec2::Vec2;

/// Below this, a ray counts as parallel to a surface.
const PARALLEL_EPSILON: f32 = 1e-9;

/// Collider geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Two-sided line segment (edges, slopes).
    Segment { start: Vec2, end: Vec2 },
    /// Filled rectangle.
    Box(Aabb),
}

/// A static surface in a level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub shape: Shape,
    #[serde(default)]
    pub tag: SurfaceTag,
    #[serde(default)]
    pub layer: u8,
}

impl Collider {
    /// Solid segment on layer 0.
    pub fn segment(start: Vec2, end: Vec2) -> Self {
        Self {
            shape: Shape::Segment { start, end },
            tag: SurfaceTag::Solid,
            layer: 0,
        }
    }

    /// Solid box on layer 0.
    pub fn solid_box(bounds: Aabb) -> Self {
        Self {
            shape: Shape::Box(bounds),
            tag: SurfaceTag::Solid,
            layer: 0,
        }
    }

    /// Change the surface tag.
    pub fn with_tag(mut self, tag: SurfaceTag) -> Self {
        self.tag = tag;
        self
    }

    /// Change the layer.
    pub fn on_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    /// Intersect a ray with this collider.
    pub fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        let (distance, normal) = match self.shape {
            Shape::Segment { start, end } => cast_segment(origin, direction, max_distance, start, end)?,
            Shape::Box(bounds) => cast_box(origin, direction, max_distance, &bounds)?,
        };
        Some(RayHit::new(distance, normal, origin + direction * distance, self.tag))
    }
}

/// Ray against segment. The normal faces the ray origin.
fn cast_segment(origin: Vec2, direction: Vec2, max_distance: f32, start: Vec2, end: Vec2) -> Option<(f32, Vec2)> {
    let edge = end - start;
    let denom = direction.cross(edge);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let to_start = start - origin;
    let t = to_start.cross(edge) / denom;
    let s = to_start.cross(direction) / denom;
    if t < 0.0 || t > max_distance || !(0.0..=1.0).contains(&s) {
        return None;
    }

    let mut normal = edge.perpendicular().normalize();
    if normal.dot(direction) > 0.0 {
        normal = -normal;
    }
    Some((t, normal))
}

/// Ray against box (slab test). Rays starting inside report distance 0.
fn cast_box(origin: Vec2, direction: Vec2, max_distance: f32, bounds: &Aabb) -> Option<(f32, Vec2)> {
    if bounds.contains(origin) {
        return Some((0.0, -direction));
    }

    let mut t_enter = 0.0_f32;
    let mut t_exit = max_distance;
    let mut normal = Vec2::ZERO;

    let axes = [
        (origin.x, direction.x, bounds.min.x, bounds.max.x, Vec2::LEFT),
        (origin.y, direction.y, bounds.min.y, bounds.max.y, Vec2::DOWN),
    ];
    for (o, d, lo, hi, lo_normal) in axes {
        if d.abs() < PARALLEL_EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t_near = (lo - o) * inv;
        let mut t_far = (hi - o) * inv;
        let mut face = lo_normal;
        if t_near > t_far {
            std::mem::swap(&mut t_near, &mut t_far);
            face = -lo_normal;
        }

        if t_near > t_enter {
            t_enter = t_near;
            normal = face;
        }
        t_exit = t_exit.min(t_far);
        if t_enter > t_exit {
            return None;
        }
    }

    if normal == Vec2::ZERO {
        return None;
    }
    Some((t_enter, normal))
}
