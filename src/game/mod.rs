//! Game Layer
//!
//! Player intent, level progression, and the fixed-step loop built on top
//! of the controller.
//!
//! ## Module Structure
//!
//! - `input`: Per-tick input frames
//! - `player`: Jump physics and movement intent
//! - `sequence`: Ordered level progression
//! - `events`: Simulation events for logging and replay
//! - `tick`: Simulation loop, replay, and state hashing

pub mod input;
pub mod player;
pub mod sequence;
pub mod events;
pub mod tick;

// Re-export key types
pub use input::InputFrame;
pub use player::{JumpPhysics, Player, PlayerConfig};
pub use sequence::{LevelSequence, LevelTransition};
pub use events::{SimEvent, SimEventData};
pub use tick::{replay, tick, SimulationConfig, SimulationError, SimulationState, TickResult};
