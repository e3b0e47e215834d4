//! Contact State
//!
//! Per-actor record of which sides touched a surface this step, plus the
//! slope and platform bookkeeping carried between steps.

use serde::{Serialize, Deserialize};

use crate::core::hash::{StateHash, StateHasher};
use crate::core::vec2::Vec2;

/// Contact flags and slope state of one actor.
///
/// The side and slope flags describe only the most recent step; they are
/// cleared at the start of every resolve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactState {
    /// Touched a ceiling
    pub above: bool,
    /// Touched the ground (or is carried by a platform)
    pub below: bool,
    /// Touched a wall on the local left
    pub left: bool,
    /// Touched a wall on the local right
    pub right: bool,

    /// Movement was locked onto a climbable slope
    pub climbing_slope: bool,
    /// Movement followed a slope downward
    pub descending_slope: bool,
    /// Slope angle in degrees of this step's contact, 0 = flat
    pub slope_angle: f32,
    /// `slope_angle` of the previous step
    pub slope_angle_old: f32,

    /// Requested displacement before this step's corrections
    pub velocity_old: Vec2,
    /// Last non-zero horizontal direction, +1 or -1
    pub face_dir: i8,
    /// Latched while dropping through a one-way platform
    pub falling_through_platform: bool,
}

impl Default for ContactState {
    fn default() -> Self {
        Self {
            above: false,
            below: false,
            left: false,
            right: false,
            climbing_slope: false,
            descending_slope: false,
            slope_angle: 0.0,
            slope_angle_old: 0.0,
            velocity_old: Vec2::ZERO,
            face_dir: 1,
            falling_through_platform: false,
        }
    }
}

impl ContactState {
    /// Clear the per-step flags and roll the slope angle over.
    ///
    /// `face_dir`, `velocity_old`, and the platform latch survive.
    pub fn reset(&mut self) {
        self.above = false;
        self.below = false;
        self.left = false;
        self.right = false;
        self.climbing_slope = false;
        self.descending_slope = false;

        self.slope_angle_old = self.slope_angle;
        self.slope_angle = 0.0;
    }

    /// Grounded or carried.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.below
    }

    /// Feed every field into a hasher.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_bool(self.above);
        hasher.update_bool(self.below);
        hasher.update_bool(self.left);
        hasher.update_bool(self.right);
        hasher.update_bool(self.climbing_slope);
        hasher.update_bool(self.descending_slope);
        hasher.update_f32(self.slope_angle);
        hasher.update_f32(self.slope_angle_old);
        hasher.update_vec2(self.velocity_old);
        hasher.update_i32(self.face_dir as i32);
        hasher.update_bool(self.falling_through_platform);
    }

    /// Hash of this snapshot alone.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_contact_state();
        self.hash_into(&mut hasher);
        hasher.finalize()
    }
}
