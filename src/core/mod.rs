//! Core primitives.
//!
//! Geometry and hashing types shared by the controller, the level
//! environment, and the simulation loop.

pub mod vec2;
pub mod aabb;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use aabb::Aabb;
pub use hash::{StateHash, StateHasher, compute_state_hash};
