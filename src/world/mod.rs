//! Level Environment
//!
//! Static geometry that implements the controller's raycast seam.
//!
//! ## Module Structure
//!
//! - `collider`: Segment and box shapes with ray intersection
//! - `level`: Collider sets, spawn points, JSON loading
//! - `goal`: Level-completion trigger regions

pub mod collider;
pub mod level;
pub mod goal;

pub use collider::{Collider, Shape};
pub use level::{Level, LevelError};
pub use goal::GoalRegion;
