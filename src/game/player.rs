//! Player Movement
//!
//! Turns input into a desired velocity, lets the controller correct it, and
//! applies the result. Jump arcs are derived from heights and apex time
//! rather than tuned directly.

use serde::{Serialize, Deserialize};

use crate::controller::{
    ContactState, Controller2D, ControllerConfig, ControllerError, Orientation, RaycastWorld, Resolution,
};
use crate::core::aabb::Aabb;
use crate::core::vec2::Vec2;
use crate::game::input::InputFrame;

/// Player tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Apex height of a held jump
    pub max_jump_height: f32,
    /// Apex height of a tapped jump
    pub min_jump_height: f32,
    /// Seconds from take-off to the apex of a held jump
    pub time_to_jump_apex: f32,
    /// Horizontal speed, units per second
    pub move_speed: f32,
    /// Layer used for goal triggers
    pub layer: u8,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_jump_height: 4.0,
            min_jump_height: 1.0,
            time_to_jump_apex: 0.4,
            move_speed: 6.0,
            layer: 0,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ControllerError> {
        let positive = |value: f32| value.is_finite() && value > 0.0;
        if !positive(self.max_jump_height) {
            return Err(ControllerError::invalid("max_jump_height", "must be positive and finite"));
        }
        if !positive(self.min_jump_height) || self.min_jump_height > self.max_jump_height {
            return Err(ControllerError::invalid(
                "min_jump_height",
                "must be positive and at most max_jump_height",
            ));
        }
        if !positive(self.time_to_jump_apex) {
            return Err(ControllerError::invalid("time_to_jump_apex", "must be positive and finite"));
        }
        if !self.move_speed.is_finite() || self.move_speed < 0.0 {
            return Err(ControllerError::invalid("move_speed", "must be non-negative and finite"));
        }
        Ok(())
    }
}

/// Jump constants derived from a [`PlayerConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpPhysics {
    /// Downward acceleration (negative)
    pub gravity: f32,
    /// Take-off speed reaching `max_jump_height`
    pub max_jump_velocity: f32,
    /// Speed cap on jump release, reaching `min_jump_height`
    pub min_jump_velocity: f32,
    /// Fastest allowed fall (negative)
    pub terminal_velocity: f32,
}

impl JumpPhysics {
    pub fn from_config(config: &PlayerConfig) -> Self {
        let gravity = -(2.0 * config.max_jump_height) / config.time_to_jump_apex.powi(2);
        let max_jump_velocity = gravity.abs() * config.time_to_jump_apex;
        let min_jump_velocity = (2.0 * gravity.abs() * config.min_jump_height).sqrt();
        Self {
            gravity,
            max_jump_velocity,
            min_jump_velocity,
            terminal_velocity: -2.0 * max_jump_velocity,
        }
    }
}

/// A controllable box actor.
#[derive(Clone, Debug)]
pub struct Player {
    config: PlayerConfig,
    physics: JumpPhysics,
    controller: Controller2D,
    /// World-space box
    pub bounds: Aabb,
    /// Velocity in the controller's local frame, units per second
    pub velocity: Vec2,
}

impl Player {
    pub fn new(
        config: PlayerConfig,
        controller_config: ControllerConfig,
        orientation: Orientation,
        bounds: Aabb,
    ) -> Result<Self, ControllerError> {
        config.validate()?;
        let controller = Controller2D::new(controller_config, orientation)?;
        Ok(Self {
            physics: JumpPhysics::from_config(&config),
            config,
            controller,
            bounds,
            velocity: Vec2::ZERO,
        })
    }

    #[inline]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    #[inline]
    pub fn contacts(&self) -> &ContactState {
        self.controller.contacts()
    }

    /// Place the player at a new box with no velocity and fresh contacts.
    pub fn respawn(&mut self, bounds: Aabb) {
        self.bounds = bounds;
        self.velocity = Vec2::ZERO;
        self.controller.reset();
    }

    /// Advance the player by one tick of `dt` seconds.
    pub fn update<W: RaycastWorld + ?Sized>(&mut self, world: &W, input: &InputFrame, dt: f32) -> Resolution {
        self.controller.advance(dt);

        let direction = input.direction();
        self.velocity.x = direction.x * self.config.move_speed;

        if input.jump_pressed() && self.controller.contacts().is_grounded() {
            self.velocity.y = self.physics.max_jump_velocity;
        }
        if input.jump_released() {
            self.velocity.y = self.velocity.y.min(self.physics.min_jump_velocity);
        }

        self.velocity.y += self.physics.gravity * dt;
        self.velocity.y = self.velocity.y.max(self.physics.terminal_velocity);

        let resolution = self
            .controller
            .resolve(world, &self.bounds, self.velocity * dt, direction, false);
        self.bounds = self
            .bounds
            .translated(self.controller.frame().to_world(resolution.displacement));

        if resolution.contacts.above || resolution.contacts.below {
            self.velocity.y = 0.0;
        }

        resolution
    }
}
