//! Ray Origin Grid
//!
//! Evenly spaced ray origins along the edges of the actor's box, inset by
//! the skin width. Recomputed from the current box on every step.

use crate::core::aabb::Aabb;
use crate::core::vec2::Vec2;

use super::orientation::Frame;

/// Inset corners and ray spacing for one step.
///
/// Corner names are in the actor's local frame: `bottom_left` is the inset
/// corner furthest along `-frame.right` and `-frame.up`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastOrigins {
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
    pub top_left: Vec2,
    pub top_right: Vec2,
    /// Rays on each side edge
    pub horizontal_ray_count: u32,
    /// Rays on the top and bottom edges
    pub vertical_ray_count: u32,
    /// Distance between side-edge rays (along local up)
    pub horizontal_ray_spacing: f32,
    /// Distance between top/bottom-edge rays (along local right)
    pub vertical_ray_spacing: f32,
}

impl RaycastOrigins {
    /// Compute origins for a box.
    ///
    /// Ray counts must already be validated (at least 2).
    pub fn compute(
        bounds: &Aabb,
        frame: &Frame,
        skin_width: f32,
        horizontal_ray_count: u32,
        vertical_ray_count: u32,
    ) -> Self {
        debug_assert!(horizontal_ray_count >= 2 && vertical_ray_count >= 2);

        let inset = bounds.shrink(skin_width);

        let (left_x, right_x) = if frame.right.x >= 0.0 {
            (inset.min.x, inset.max.x)
        } else {
            (inset.max.x, inset.min.x)
        };
        let (bottom_y, top_y) = if frame.up.y >= 0.0 {
            (inset.min.y, inset.max.y)
        } else {
            (inset.max.y, inset.min.y)
        };

        Self {
            bottom_left: Vec2::new(left_x, bottom_y),
            bottom_right: Vec2::new(right_x, bottom_y),
            top_left: Vec2::new(left_x, top_y),
            top_right: Vec2::new(right_x, top_y),
            horizontal_ray_count,
            vertical_ray_count,
            horizontal_ray_spacing: inset.height() / (horizontal_ray_count - 1) as f32,
            vertical_ray_spacing: inset.width() / (vertical_ray_count - 1) as f32,
        }
    }

    /// Bottom corner on the side of `direction_x` (local).
    #[inline]
    pub fn bottom_corner(&self, direction_x: f32) -> Vec2 {
        if direction_x < 0.0 {
            self.bottom_left
        } else {
            self.bottom_right
        }
    }

    /// Left corner on the edge of `direction_y` (local).
    #[inline]
    pub fn left_corner(&self, direction_y: f32) -> Vec2 {
        if direction_y < 0.0 {
            self.bottom_left
        } else {
            self.top_left
        }
    }
}
