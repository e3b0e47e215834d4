//! Kinematic Controller
//!
//! Raycast collision resolution for a box actor.
//!
//! ## Module Structure
//!
//! - `config`: Controller configuration and validation
//! - `error`: Setup errors
//! - `orientation`: Axis mirroring and the local frame
//! - `raycast`: Environment seam (ray queries, surface tags, layers)
//! - `origins`: Ray origin grid
//! - `contact`: Per-actor contact state
//! - `timer`: Platform drop reset timer
//! - `resolver`: The step resolver

pub mod config;
pub mod error;
pub mod orientation;
pub mod raycast;
pub mod origins;
pub mod contact;
pub mod timer;
pub mod resolver;

// Re-export key types
pub use config::ControllerConfig;
pub use error::ControllerError;
pub use orientation::{Frame, Orientation};
pub use raycast::{LayerMask, RayHit, RaycastWorld, SurfaceTag};
pub use origins::RaycastOrigins;
pub use contact::ContactState;
pub use timer::DropTimer;
pub use resolver::{Controller2D, Resolution};
