//! Collision Resolver
//!
//! Turns a desired per-step displacement into one that respects solid
//! surfaces, slopes, and one-way platforms.
//!
//! ## Step Order
//!
//! ```text
//! prologue    recompute ray origins, reset contact flags, record face dir
//! descent     (dy < 0)  probe down from the uphill corner, follow the slope
//! horizontal  (dx != 0) sweep the leading edge, climb or clamp
//! vertical    (dy != 0) sweep the leading edge, platforms, re-check slope
//! epilogue    force `below` when carried by a platform
//! ```
//!
//! All displacements are in the actor's local frame (see [`Frame`]).

use tracing::{debug, trace};

use crate::core::aabb::Aabb;
use crate::core::vec2::Vec2;

use super::config::ControllerConfig;
use super::contact::ContactState;
use super::error::ControllerError;
use super::orientation::{Frame, Orientation};
use super::origins::RaycastOrigins;
use super::raycast::{RayHit, RaycastWorld};
use super::timer::DropTimer;

/// Outcome of one resolve call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    /// Corrected displacement, local frame
    pub displacement: Vec2,
    /// Contact snapshot after this step
    pub contacts: ContactState,
}

/// Raycast collision resolver for one box actor.
#[derive(Clone, Debug)]
pub struct Controller2D {
    config: ControllerConfig,
    frame: Frame,
    contacts: ContactState,
    drop_timer: DropTimer,
    origins: Option<RaycastOrigins>,
}

impl Controller2D {
    /// Create a controller. Fails if the configuration is out of range.
    pub fn new(config: ControllerConfig, orientation: Orientation) -> Result<Self, ControllerError> {
        config.validate()?;
        Ok(Self {
            frame: orientation.frame(),
            config,
            contacts: ContactState::default(),
            drop_timer: DropTimer::new(),
            origins: None,
        })
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// World-space unit vectors of the local axes.
    #[inline]
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Contact state after the most recent step.
    #[inline]
    pub fn contacts(&self) -> &ContactState {
        &self.contacts
    }

    /// Ray origins used by the most recent step.
    #[inline]
    pub fn origins(&self) -> Option<&RaycastOrigins> {
        self.origins.as_ref()
    }

    /// Pending platform drop reset, if any.
    #[inline]
    pub fn drop_timer(&self) -> &DropTimer {
        &self.drop_timer
    }

    /// Let `dt` seconds of simulated time pass.
    ///
    /// Clears the platform drop latch once the delay has elapsed, whatever
    /// the actor is doing at that moment.
    pub fn advance(&mut self, dt: f32) {
        if self.drop_timer.advance(dt) {
            self.contacts.falling_through_platform = false;
            debug!("platform drop latch cleared");
        }
    }

    /// Forget all contact history and cancel any pending drop reset.
    pub fn reset(&mut self) {
        self.contacts = ContactState::default();
        self.drop_timer.cancel();
        self.origins = None;
    }

    /// Resolve a step with no directional input.
    ///
    /// Used when the actor is moved by something other than its own intent,
    /// such as a moving platform.
    pub fn resolve_without_input<W: RaycastWorld + ?Sized>(
        &mut self,
        world: &W,
        bounds: &Aabb,
        displacement: Vec2,
        on_platform: bool,
    ) -> Resolution {
        self.resolve(world, bounds, displacement, Vec2::ZERO, on_platform)
    }

    /// Resolve one step.
    ///
    /// # Arguments
    ///
    /// * `world` - Environment answering ray queries
    /// * `bounds` - Actor's current world-space box
    /// * `displacement` - Desired displacement for this step (local frame)
    /// * `input` - Directional input; `y == -1` requests a platform drop
    /// * `on_platform` - Actor is carried by an external platform
    pub fn resolve<W: RaycastWorld + ?Sized>(
        &mut self,
        world: &W,
        bounds: &Aabb,
        displacement: Vec2,
        input: Vec2,
        on_platform: bool,
    ) -> Resolution {
        let origins = RaycastOrigins::compute(
            bounds,
            &self.frame,
            self.config.skin_width,
            self.config.horizontal_ray_count,
            self.config.vertical_ray_count,
        );
        self.origins = Some(origins);

        let mut contacts = self.contacts;
        contacts.reset();
        contacts.velocity_old = displacement;
        if displacement.x != 0.0 {
            contacts.face_dir = if displacement.x > 0.0 { 1 } else { -1 };
        }

        let mut sweep = Sweep {
            world,
            config: &self.config,
            frame: self.frame,
            origins,
            input,
            velocity: displacement,
            contacts,
            drop_started: false,
        };

        if sweep.velocity.y < 0.0 {
            sweep.descend_slope();
        }
        if sweep.velocity.x != 0.0 {
            sweep.horizontal_collisions();
        }
        if sweep.velocity.y != 0.0 {
            sweep.vertical_collisions();
        }

        let Sweep { velocity, mut contacts, drop_started, .. } = sweep;

        if on_platform {
            contacts.below = true;
        }
        if drop_started {
            self.drop_timer.schedule(self.config.fall_through_delay);
            debug!(delay = self.config.fall_through_delay, "dropping through platform");
        }

        self.contacts = contacts;
        Resolution {
            displacement: velocity,
            contacts,
        }
    }
}

/// Displacement after locking onto a slope being climbed, or `None` if the
/// requested vertical motion already exceeds the climb (e.g. mid-jump).
pub fn climb_displacement(velocity: Vec2, slope_angle: f32) -> Option<Vec2> {
    let move_distance = velocity.x.abs();
    let (sin, cos) = slope_angle.to_radians().sin_cos();
    let climb_velocity_y = sin * move_distance;

    if velocity.y <= climb_velocity_y {
        Some(Vec2::new(cos * move_distance * sign(velocity.x), climb_velocity_y))
    } else {
        None
    }
}

/// Displacement after following a slope downward.
pub fn descend_displacement(velocity: Vec2, slope_angle: f32) -> Vec2 {
    let move_distance = velocity.x.abs();
    let (sin, cos) = slope_angle.to_radians().sin_cos();
    Vec2::new(
        cos * move_distance * sign(velocity.x),
        velocity.y - sin * move_distance,
    )
}

/// Sign with zero counted as positive.
#[inline]
fn sign(value: f32) -> f32 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Mutable accumulator threaded through the sub-passes of one resolve.
struct Sweep<'a, W: ?Sized> {
    world: &'a W,
    config: &'a ControllerConfig,
    frame: Frame,
    origins: RaycastOrigins,
    input: Vec2,
    velocity: Vec2,
    contacts: ContactState,
    drop_started: bool,
}

impl<W: RaycastWorld + ?Sized> Sweep<'_, W> {
    /// Cast along a local-frame direction.
    fn cast(&self, origin: Vec2, local_direction: Vec2, length: f32) -> Option<RayHit> {
        self.world.cast(
            origin,
            self.frame.to_world(local_direction),
            length,
            self.config.collision_mask,
        )
    }

    /// Angle between the hit normal and local up, in degrees.
    #[inline]
    fn surface_angle(&self, hit: &RayHit) -> f32 {
        hit.normal.angle_deg(self.frame.up)
    }

    fn descend_slope(&mut self) {
        let skin = self.config.skin_width;
        let direction_x = self.contacts.face_dir as f32;

        // The uphill corner stays on the slope while moving down it
        let origin = self.origins.bottom_corner(-direction_x);
        let Some(hit) = self.cast(origin, Vec2::DOWN, f32::INFINITY) else {
            return;
        };

        let slope_angle = self.surface_angle(&hit);
        if slope_angle == 0.0 || slope_angle > self.config.slope_angle_limit {
            return;
        }
        if sign(self.frame.to_local(hit.normal).x) != direction_x {
            return;
        }
        if hit.distance - skin > slope_angle.to_radians().tan() * self.velocity.x.abs() {
            return;
        }

        self.velocity = descend_displacement(self.velocity, slope_angle);
        self.contacts.slope_angle = slope_angle;
        self.contacts.descending_slope = true;
        self.contacts.below = true;
        trace!(slope_angle, "descending slope");
    }

    fn horizontal_collisions(&mut self) {
        let skin = self.config.skin_width;
        let limit = self.config.slope_angle_limit;
        let direction_x = self.contacts.face_dir as f32;

        let mut ray_length = self.velocity.x.abs() + skin;
        if self.velocity.x.abs() < skin {
            ray_length = 2.0 * skin;
        }

        for i in 0..self.origins.horizontal_ray_count {
            let origin = self.origins.bottom_corner(direction_x)
                + self.frame.up * (self.origins.horizontal_ray_spacing * i as f32);
            let Some(hit) = self.cast(origin, Vec2::new(direction_x, 0.0), ray_length) else {
                continue;
            };

            if hit.is_pass_through() || hit.distance == 0.0 {
                continue;
            }

            let slope_angle = self.surface_angle(&hit);

            if i == 0 && slope_angle <= limit {
                if self.contacts.descending_slope {
                    self.contacts.descending_slope = false;
                    self.velocity = self.contacts.velocity_old;
                }

                // Walk up to a newly met slope before bending onto it
                let mut distance_to_slope_start = 0.0;
                if slope_angle != self.contacts.slope_angle_old {
                    distance_to_slope_start = hit.distance - skin;
                    self.velocity.x -= distance_to_slope_start * direction_x;
                }
                self.climb_slope(slope_angle);
                self.velocity.x += distance_to_slope_start * direction_x;
            }

            if !self.contacts.climbing_slope || slope_angle > limit {
                self.velocity.x = self.velocity.x.abs().min(hit.distance - skin) * direction_x;
                ray_length = (self.velocity.x.abs() + skin).min(hit.distance);

                if self.contacts.climbing_slope {
                    self.velocity.y = self.contacts.slope_angle.to_radians().tan() * self.velocity.x.abs();
                }

                self.contacts.left = direction_x < 0.0;
                self.contacts.right = direction_x > 0.0;
            }
        }
    }

    fn climb_slope(&mut self, slope_angle: f32) {
        if let Some(velocity) = climb_displacement(self.velocity, slope_angle) {
            self.velocity = velocity;
            self.contacts.below = true;
            self.contacts.climbing_slope = true;
            self.contacts.slope_angle = slope_angle;
            trace!(slope_angle, "climbing slope");
        }
    }

    fn vertical_collisions(&mut self) {
        let skin = self.config.skin_width;
        let direction_y = sign(self.velocity.y);
        let mut ray_length = self.velocity.y.abs() + skin;

        for i in 0..self.origins.vertical_ray_count {
            let origin = self.origins.left_corner(direction_y)
                + self.frame.right * (self.origins.vertical_ray_spacing * i as f32 + self.velocity.x);
            let Some(hit) = self.cast(origin, Vec2::new(0.0, direction_y), ray_length) else {
                continue;
            };

            if hit.is_pass_through() || hit.distance == 0.0 {
                // Jumping up through a platform is never blocked
                if direction_y > 0.0 || hit.distance == 0.0 {
                    continue;
                }
                if self.contacts.falling_through_platform {
                    continue;
                }
                if self.input.y == -1.0 {
                    self.contacts.falling_through_platform = true;
                    self.drop_started = true;
                    continue;
                }
            }

            self.velocity.y = (hit.distance - skin) * direction_y;
            ray_length = hit.distance;

            if self.contacts.climbing_slope {
                let tan = self.contacts.slope_angle.to_radians().tan();
                if tan.abs() > f32::EPSILON {
                    self.velocity.x = self.velocity.y / tan * sign(self.velocity.x);
                }
            }

            self.contacts.above = direction_y > 0.0;
            self.contacts.below = direction_y < 0.0;
        }

        if self.contacts.climbing_slope {
            self.revalidate_slope();
        }
    }

    /// Re-measure the slope under the actor's new position, in case the
    /// step crossed onto a section with a different angle.
    fn revalidate_slope(&mut self) {
        let skin = self.config.skin_width;
        let direction_x = sign(self.velocity.x);
        let ray_length = self.velocity.x.abs() + skin;
        let origin = self.origins.bottom_corner(direction_x) + self.frame.up * self.velocity.y;

        if let Some(hit) = self.cast(origin, Vec2::new(direction_x, 0.0), ray_length) {
            let slope_angle = self.surface_angle(&hit);
            if slope_angle != self.contacts.slope_angle {
                self.velocity.x = (hit.distance - skin) * direction_x;
                self.contacts.slope_angle = slope_angle;
                trace!(slope_angle, "slope angle changed within step");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
