//! Goal Region
//!
//! Trigger area that completes a level when an actor of the same layer
//! enters it.

use serde::{Serialize, Deserialize};

use crate::core::aabb::Aabb;

/// Level-completion trigger.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalRegion {
    pub bounds: Aabb,
    /// Only actors on this layer trigger the goal
    #[serde(default)]
    pub layer: u8,
}

impl GoalRegion {
    pub fn new(bounds: Aabb, layer: u8) -> Self {
        Self { bounds, layer }
    }

    /// Check whether an actor box on `actor_layer` triggers this goal.
    pub fn triggered_by(&self, actor: &Aabb, actor_layer: u8) -> bool {
        actor_layer == self.layer && self.bounds.overlaps(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;

    #[test]
    fn test_goal_requires_matching_layer() {
        let goal = GoalRegion::new(Aabb::new(Vec2::new(5.0, 0.0), Vec2::new(6.0, 2.0)), 1);
        let inside = Aabb::from_min_size(Vec2::new(5.5, 0.0), Vec2::new(1.0, 2.0));
        let outside = Aabb::from_min_size(Vec2::new(0.0, 0.0), Vec2::new(1.0, 2.0));

        assert!(goal.triggered_by(&inside, 1));
        assert!(!goal.triggered_by(&inside, 0));
        assert!(!goal.triggered_by(&outside, 1));
    }
}
