//! Simulation Tick
//!
//! Fixed-step loop driving one player through an ordered list of levels.
//! Given the same levels, config, and inputs, two runs produce the same
//! state hash.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::controller::{ControllerConfig, ControllerError, Orientation};
use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::vec2::Vec2;
use crate::game::events::{SimEvent, SimEventData};
use crate::game::input::InputFrame;
use crate::game::player::{Player, PlayerConfig};
use crate::game::sequence::LevelSequence;
use crate::world::level::Level;
use crate::TICK_RATE;

/// Seconds per tick at the default tick rate.
pub const DEFAULT_DT: f32 = 1.0 / TICK_RATE as f32;

/// Setup errors for a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("no levels to simulate")]
    NoLevels,

    #[error(transparent)]
    Controller(#[from] ControllerError),
}

/// Everything needed to build a fresh [`SimulationState`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub player: PlayerConfig,
    pub controller: ControllerConfig,
    pub orientation: Orientation,
    /// Player box size
    pub actor_size: Vec2,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            controller: ControllerConfig::default(),
            orientation: Orientation::Normal,
            actor_size: Vec2::new(1.0, 2.0),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ControllerError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<SimEvent>,
    /// Whether a goal was reached this tick
    pub level_completed: bool,
    /// Whether the final level has been completed
    pub finished: bool,
}

/// Full simulation state.
#[derive(Clone, Debug)]
pub struct SimulationState {
    /// Ticks simulated so far
    pub tick: u32,
    pub player: Player,
    pub sequence: LevelSequence,
    actor_size: Vec2,
}

impl SimulationState {
    /// Place a fresh player at the first level's spawn point.
    pub fn new(config: &SimulationConfig, levels: &[Level]) -> Result<Self, SimulationError> {
        let first = levels.first().ok_or(SimulationError::NoLevels)?;
        let player = Player::new(
            config.player.clone(),
            config.controller.clone(),
            config.orientation,
            first.spawn_bounds(config.actor_size),
        )?;

        Ok(Self {
            tick: 0,
            player,
            sequence: LevelSequence::new(levels.len()),
            actor_size: config.actor_size,
        })
    }

    /// The level the player is currently in.
    pub fn active_level<'a>(&self, levels: &'a [Level]) -> Option<&'a Level> {
        if self.sequence.is_finished() {
            return None;
        }
        levels.get(self.sequence.current())
    }

    /// Compute the state hash.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, |hasher| {
            hasher.update_u32(self.sequence.current() as u32);
            hasher.update_bool(self.sequence.is_finished());
            hasher.update_aabb(&self.player.bounds);
            hasher.update_vec2(self.player.velocity);
            self.player.contacts().hash_into(hasher);
        })
    }
}

/// Run one simulation tick of `dt` seconds.
pub fn tick(state: &mut SimulationState, levels: &[Level], input: &InputFrame, dt: f32) -> TickResult {
    let mut result = TickResult::default();

    let Some(level) = state.active_level(levels) else {
        result.finished = true;
        return result;
    };

    state.tick += 1;

    let before = *state.player.contacts();
    state.player.update(level, input, dt);
    let after = *state.player.contacts();

    // Requested vertical speed this tick, before the controller clamped it
    let impact_velocity = if dt > 0.0 { after.velocity_old.y / dt } else { 0.0 };
    result.events = SimEvent::contact_edges(state.tick, &before, &after, impact_velocity);

    let reached_goal = level
        .goal
        .as_ref()
        .is_some_and(|goal| goal.triggered_by(&state.player.bounds, state.player.config().layer));

    if reached_goal {
        let from = state.sequence.current();
        let transition = state.sequence.advance();
        let to = transition.map(|t| t.to);
        debug!(tick = state.tick, from, ?to, "level completed");

        result.level_completed = true;
        result
            .events
            .push(SimEvent::new(state.tick, SimEventData::LevelCompleted { from, to }));

        match to.and_then(|index| levels.get(index)) {
            Some(next) => state.player.respawn(next.spawn_bounds(state.actor_size)),
            None => {
                result.finished = true;
                info!(tick = state.tick, "all levels completed");
            }
        }
    }

    result
}

/// Replay recorded inputs from a fresh state.
///
/// Stops early once the final level is completed.
pub fn replay(
    config: &SimulationConfig,
    levels: &[Level],
    inputs: &[InputFrame],
    dt: f32,
) -> Result<(SimulationState, Vec<SimEvent>), SimulationError> {
    let mut state = SimulationState::new(config, levels)?;
    let mut all_events = Vec::new();

    for input in inputs {
        let result = tick(&mut state, levels, input, dt);
        all_events.extend(result.events);

        if result.finished {
            break;
        }
    }

    Ok((state, all_events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aabb::Aabb;
    use crate::world::goal::GoalRegion;

    fn floor_level(name: &str, spawn: Vec2, goal_min_x: f32) -> Level {
        let mut level = Level::new(name, spawn);
        level.add_segment(Vec2::new(-100.0, 0.0), Vec2::new(100.0, 0.0));
        level.set_goal(GoalRegion::new(
            Aabb::new(Vec2::new(goal_min_x, 0.0), Vec2::new(goal_min_x + 1.0, 2.0)),
            0,
        ));
        level
    }

    fn two_levels() -> Vec<Level> {
        vec![
            floor_level("first", Vec2::ZERO, 3.0),
            floor_level("second", Vec2::new(-10.0, 0.0), 50.0),
        ]
    }

    fn scripted_inputs() -> Vec<InputFrame> {
        (0..240u32)
            .map(|t| match t % 80 {
                0 => InputFrame::with_axes(1, 0).jump(),
                10 => InputFrame::with_axes(1, 0).release_jump(),
                40..=50 => InputFrame::with_axes(-1, 0),
                _ => InputFrame::with_axes(1, 0),
            })
            .collect()
    }

    #[test]
    fn test_requires_levels() {
        let result = SimulationState::new(&SimulationConfig::default(), &[]);
        assert!(matches!(result, Err(SimulationError::NoLevels)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimulationConfig::default();
        config.controller.horizontal_ray_count = 1;
        let result = SimulationState::new(&config, &two_levels());
        assert!(matches!(result, Err(SimulationError::Controller(_))));
    }

    #[test]
    fn test_tick_determinism() {
        let levels = two_levels();
        let config = SimulationConfig::default();
        let mut state1 = SimulationState::new(&config, &levels).unwrap();
        let mut state2 = SimulationState::new(&config, &levels).unwrap();

        for input in scripted_inputs() {
            tick(&mut state1, &levels, &input, DEFAULT_DT);
            tick(&mut state2, &levels, &input, DEFAULT_DT);
        }

        assert_eq!(state1.tick, state2.tick);
        assert_eq!(state1.player.bounds, state2.player.bounds);
        assert_eq!(state1.compute_hash(), state2.compute_hash());
    }

    #[test]
    fn test_replay_determinism() {
        let levels = two_levels();
        let config = SimulationConfig::default();
        let inputs = scripted_inputs();

        let (final1, events1) = replay(&config, &levels, &inputs, DEFAULT_DT).unwrap();
        let (final2, events2) = replay(&config, &levels, &inputs, DEFAULT_DT).unwrap();

        assert_eq!(final1.compute_hash(), final2.compute_hash());
        assert_eq!(events1, events2);
    }

    #[test]
    fn test_hash_changes_with_state() {
        let levels = two_levels();
        let mut state = SimulationState::new(&SimulationConfig::default(), &levels).unwrap();
        let initial = state.compute_hash();
        tick(&mut state, &levels, &InputFrame::with_axes(1, 0), DEFAULT_DT);
        assert_ne!(state.compute_hash(), initial);
    }

    #[test]
    fn test_lands_on_first_tick() {
        let levels = two_levels();
        let mut state = SimulationState::new(&SimulationConfig::default(), &levels).unwrap();
        let result = tick(&mut state, &levels, &InputFrame::new(), DEFAULT_DT);
        assert!(matches!(result.events[0].data, SimEventData::Landed { .. }));
        assert!(state.player.contacts().below);
    }

    #[test]
    fn test_goal_advances_exactly_once() {
        let levels = two_levels();
        let mut state = SimulationState::new(&SimulationConfig::default(), &levels).unwrap();
        let walk = InputFrame::with_axes(1, 0);

        let mut completions = 0;
        for _ in 0..60 {
            let result = tick(&mut state, &levels, &walk, DEFAULT_DT);
            if result.level_completed {
                completions += 1;
                assert!(result
                    .events
                    .contains(&SimEvent::new(state.tick, SimEventData::LevelCompleted { from: 0, to: Some(1) })));
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(state.sequence.current(), 1);
        assert!(!state.sequence.is_finished());
        // Respawned at the second level and walked from there
        assert!(state.player.bounds.min.x < 0.0);
    }

    #[test]
    fn test_final_goal_finishes_run() {
        let levels = vec![floor_level("only", Vec2::ZERO, 3.0)];
        let mut state = SimulationState::new(&SimulationConfig::default(), &levels).unwrap();
        let walk = InputFrame::with_axes(1, 0);

        let mut finished_at = None;
        for _ in 0..60 {
            let result = tick(&mut state, &levels, &walk, DEFAULT_DT);
            if result.level_completed {
                assert!(finished_at.is_none());
                assert!(result.finished);
                finished_at = Some(state.tick);
            }
        }

        let finished_at = finished_at.unwrap();
        assert!(state.sequence.is_finished());
        // No ticks counted after the run ends
        assert_eq!(state.tick, finished_at);

        let result = tick(&mut state, &levels, &walk, DEFAULT_DT);
        assert!(result.finished);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_replay_stops_when_finished() {
        let levels = vec![floor_level("only", Vec2::ZERO, 3.0)];
        let inputs = vec![InputFrame::with_axes(1, 0); 120];
        let (state, events) = replay(&SimulationConfig::default(), &levels, &inputs, DEFAULT_DT).unwrap();

        assert!(state.sequence.is_finished());
        assert!(state.tick < 120);
        assert_eq!(events.iter().filter(|e| e.is_level_completed()).count(), 1);
    }

    #[test]
    fn test_platform_drop_events() {
        let mut level = Level::new("platform", Vec2::new(0.0, 1.0));
        level.add_segment(Vec2::new(-100.0, -5.0), Vec2::new(100.0, -5.0));
        level.add_platform(Aabb::new(Vec2::new(-5.0, 0.5), Vec2::new(5.0, 1.0)));
        let levels = vec![level];
        let mut state = SimulationState::new(&SimulationConfig::default(), &levels).unwrap();

        // Settle on the platform
        for _ in 0..10 {
            tick(&mut state, &levels, &InputFrame::new(), DEFAULT_DT);
        }
        assert!(state.player.contacts().below);

        let mut events = Vec::new();
        events.extend(tick(&mut state, &levels, &InputFrame::with_axes(0, -1), DEFAULT_DT).events);
        for _ in 0..30 {
            events.extend(tick(&mut state, &levels, &InputFrame::new(), DEFAULT_DT).events);
        }

        let kinds: Vec<_> = events.iter().map(|e| e.data).collect();
        assert!(kinds.contains(&SimEventData::PlatformDropStarted));
        assert!(kinds.contains(&SimEventData::PlatformDropEnded));
        assert!(state.player.bounds.min.y < 0.5);
    }
}
