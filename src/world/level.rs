//! Level Environment
//!
//! A static set of colliders that answers the controller's ray queries.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::controller::raycast::{LayerMask, RayHit, RaycastWorld, SurfaceTag};
use crate::core::aabb::Aabb;
use crate::core::vec2::Vec2;

use super::collider::{Collider, Shape};
use super::goal::GoalRegion;

/// Errors raised while loading a level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("collider {index} uses layer {layer}, layers must be below 32")]
    InvalidLayer { index: usize, layer: u8 },

    #[error("collider {index} has non-finite geometry")]
    NonFiniteGeometry { index: usize },
}

/// A static level: colliders, spawn point, and an optional goal.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Bottom-left corner of the actor box when spawning
    pub spawn: Vec2,
    #[serde(default)]
    pub colliders: Vec<Collider>,
    #[serde(default)]
    pub goal: Option<GoalRegion>,
}

impl Level {
    /// Create an empty level.
    pub fn new(name: impl Into<String>, spawn: Vec2) -> Self {
        Self {
            name: name.into(),
            spawn,
            colliders: Vec::new(),
            goal: None,
        }
    }

    /// Parse and validate a JSON level description.
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Check layers and geometry.
    pub fn validate(&self) -> Result<(), LevelError> {
        for (index, collider) in self.colliders.iter().enumerate() {
            if collider.layer >= 32 {
                return Err(LevelError::InvalidLayer { index, layer: collider.layer });
            }
            let finite = match collider.shape {
                Shape::Segment { start, end } => start.is_finite() && end.is_finite(),
                Shape::Box(bounds) => bounds.min.is_finite() && bounds.max.is_finite(),
            };
            if !finite {
                return Err(LevelError::NonFiniteGeometry { index });
            }
        }
        Ok(())
    }

    /// Add any collider.
    pub fn add(&mut self, collider: Collider) -> &mut Self {
        self.colliders.push(collider);
        self
    }

    /// Add a solid segment.
    pub fn add_segment(&mut self, start: Vec2, end: Vec2) -> &mut Self {
        self.add(Collider::segment(start, end))
    }

    /// Add a solid box.
    pub fn add_box(&mut self, bounds: Aabb) -> &mut Self {
        self.add(Collider::solid_box(bounds))
    }

    /// Add a one-way platform.
    pub fn add_platform(&mut self, bounds: Aabb) -> &mut Self {
        self.add(Collider::solid_box(bounds).with_tag(SurfaceTag::PassThrough))
    }

    /// Set the goal region.
    pub fn set_goal(&mut self, goal: GoalRegion) -> &mut Self {
        self.goal = Some(goal);
        self
    }

    /// Box of the given size placed at the spawn point.
    pub fn spawn_bounds(&self, size: Vec2) -> Aabb {
        Aabb::from_min_size(self.spawn, size)
    }
}

impl RaycastWorld for Level {
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        for collider in &self.colliders {
            if !mask.contains(collider.layer) {
                continue;
            }
            if let Some(hit) = collider.cast(origin, direction, max_distance) {
                // Strict comparison: the first collider added wins ties
                if nearest.map_or(true, |best| hit.distance < best.distance) {
                    nearest = Some(hit);
                }
            }
        }
        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_level() -> Level {
        let mut level = Level::new("sample", Vec2::ZERO);
        level
            .add_segment(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0))
            .add_platform(Aabb::new(Vec2::new(-1.0, 2.0), Vec2::new(1.0, 2.5)))
            .add(Collider::segment(Vec2::new(-10.0, 4.0), Vec2::new(10.0, 4.0)).on_layer(3));
        level
    }

    #[test]
    fn test_nearest_hit_wins() {
        let level = sample_level();
        let hit = level.cast(Vec2::new(0.0, 3.0), Vec2::DOWN, 10.0, LayerMask::ALL).unwrap();
        assert!((hit.distance - 0.5).abs() < 1e-6);
        assert_eq!(hit.tag, SurfaceTag::PassThrough);
    }

    #[test]
    fn test_mask_filters_layers() {
        let level = sample_level();
        let up = Vec2::UP;
        assert!(level.cast(Vec2::new(5.0, 1.0), up, 10.0, LayerMask::layer(0)).is_none());
        let hit = level.cast(Vec2::new(5.0, 1.0), up, 10.0, LayerMask::layer(3)).unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{
            "name": "json",
            "spawn": { "x": 1.0, "y": 2.0 },
            "colliders": [
                { "shape": { "segment": { "start": { "x": 0.0, "y": 0.0 }, "end": { "x": 4.0, "y": 0.0 } } } },
                { "shape": { "box": { "min": { "x": 0.0, "y": 1.0 }, "max": { "x": 2.0, "y": 1.2 } } },
                  "tag": "PassThrough", "layer": 2 }
            ],
            "goal": { "bounds": { "min": { "x": 3.0, "y": 0.0 }, "max": { "x": 4.0, "y": 2.0 } }, "layer": 0 }
        }"#;
        let level = Level::from_json_str(json).unwrap();
        assert_eq!(level.colliders.len(), 2);
        assert_eq!(level.colliders[1].tag, SurfaceTag::PassThrough);
        assert_eq!(level.colliders[1].layer, 2);
        assert!(level.goal.is_some());

        let encoded = serde_json::to_string(&level).unwrap();
        let decoded = Level::from_json_str(&encoded).unwrap();
        assert_eq!(decoded.colliders, level.colliders);
    }

    #[test]
    fn test_invalid_layer_rejected() {
        let mut level = Level::new("bad", Vec2::ZERO);
        level.add(Collider::segment(Vec2::ZERO, Vec2::RIGHT).on_layer(40));
        assert!(matches!(level.validate(), Err(LevelError::InvalidLayer { index: 0, layer: 40 })));
    }
}
