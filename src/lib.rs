//! # Flipside Controller
//!
//! Raycast-based kinematic character controller for 2D platformers, with a
//! small deterministic game layer on top.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    FLIPSIDE CONTROLLER                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Math primitives                          │
//! │  ├── vec2.rs      - 2D vector                                │
//! │  ├── aabb.rs      - Axis-aligned boxes                       │
//! │  └── hash.rs      - State hashing for replay checks          │
//! │                                                              │
//! │  controller/      - Collision resolution                     │
//! │  ├── config.rs    - Tuning and validation                    │
//! │  ├── orientation.rs - Mirroring and the local frame          │
//! │  ├── raycast.rs   - Environment seam                         │
//! │  ├── origins.rs   - Ray origin grid                          │
//! │  ├── contact.rs   - Contact state                            │
//! │  ├── timer.rs     - Platform drop timer                      │
//! │  └── resolver.rs  - Slope and platform aware step resolver   │
//! │                                                              │
//! │  world/           - Static levels                            │
//! │  ├── collider.rs  - Segments and boxes                       │
//! │  ├── level.rs     - Level geometry and JSON loading          │
//! │  └── goal.rs      - Goal regions                             │
//! │                                                              │
//! │  game/            - Player and simulation loop               │
//! │  ├── input.rs     - Input frames                             │
//! │  ├── player.rs    - Jump physics and movement                │
//! │  ├── sequence.rs  - Level progression                        │
//! │  ├── events.rs    - Simulation events                        │
//! │  └── tick.rs      - Fixed-step loop and replay               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Resolution depends only on the controller's state, the environment, and
//! the arguments of each call. Time advances only through explicit `dt`
//! values, so replaying the same inputs reproduces the same state hash on
//! the same platform.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod controller;
pub mod world;
pub mod game;

// Re-export commonly used types
pub use core::aabb::Aabb;
pub use core::vec2::Vec2;
pub use controller::{ContactState, Controller2D, ControllerConfig, ControllerError, Orientation, RaycastWorld, Resolution};
pub use world::level::Level;
pub use game::input::InputFrame;
pub use game::tick::{SimulationConfig, SimulationState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
