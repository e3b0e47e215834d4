//! Simulation Events
//!
//! Edge-triggered notifications produced by the tick loop, for logging
//! and replay comparison.

use serde::{Serialize, Deserialize};

use crate::controller::ContactState;

/// Event payload.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEventData {
    /// Touched ground after being airborne
    Landed {
        /// Local vertical velocity just before landing
        impact_velocity: f32,
    },

    /// Ground contact lost (jump, walk-off, or platform drop)
    LeftGround,

    /// Struck a ceiling
    HitCeiling,

    /// Started falling through a one-way platform
    PlatformDropStarted,

    /// Drop latch cleared; platforms block again
    PlatformDropEnded,

    /// Reached the goal of a level
    LevelCompleted {
        from: usize,
        /// `None` when the final level was completed
        to: Option<usize>,
    },
}

/// An event with the tick it occurred on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    pub tick: u32,
    pub data: SimEventData,
}

impl SimEvent {
    pub fn new(tick: u32, data: SimEventData) -> Self {
        Self { tick, data }
    }

    /// Contact edges between two consecutive snapshots, in a fixed order.
    pub fn contact_edges(
        tick: u32,
        before: &ContactState,
        after: &ContactState,
        impact_velocity: f32,
    ) -> Vec<SimEvent> {
        let mut events = Vec::new();

        if !before.falling_through_platform && after.falling_through_platform {
            events.push(Self::new(tick, SimEventData::PlatformDropStarted));
        }
        if before.falling_through_platform && !after.falling_through_platform {
            events.push(Self::new(tick, SimEventData::PlatformDropEnded));
        }
        if before.below && !after.below {
            events.push(Self::new(tick, SimEventData::LeftGround));
        }
        if !before.below && after.below {
            events.push(Self::new(tick, SimEventData::Landed { impact_velocity }));
        }
        if !before.above && after.above {
            events.push(Self::new(tick, SimEventData::HitCeiling));
        }

        events
    }

    pub fn is_level_completed(&self) -> bool {
        matches!(self.data, SimEventData::LevelCompleted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_edge() {
        let airborne = ContactState::default();
        let grounded = ContactState {
            below: true,
            ..Default::default()
        };

        let events = SimEvent::contact_edges(7, &airborne, &grounded, -12.0);
        assert_eq!(events, vec![SimEvent::new(7, SimEventData::Landed { impact_velocity: -12.0 })]);

        let events = SimEvent::contact_edges(8, &grounded, &grounded, 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_drop_edges_come_first() {
        let grounded = ContactState {
            below: true,
            ..Default::default()
        };
        let dropping = ContactState {
            falling_through_platform: true,
            ..Default::default()
        };

        let events = SimEvent::contact_edges(3, &grounded, &dropping, 0.0);
        assert_eq!(events[0].data, SimEventData::PlatformDropStarted);
        assert_eq!(events[1].data, SimEventData::LeftGround);
    }

    #[test]
    fn test_event_json() {
        let event = SimEvent::new(1, SimEventData::LevelCompleted { from: 0, to: Some(1) });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"level_completed\""));
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert!(back.is_level_completed());
    }
}
