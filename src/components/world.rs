//! World Resources
//!
//! Fixed simulation parameters, the tick clock, and the spawn-order roster.

use bevy_ecs::prelude::*;

/// Resource: fixed epidemic parameters.
///
/// The defaults are the simulation's built-in constants. The struct is
/// injectable so tests can pin edge-case values (certain infection, short
/// timers); it is not a runtime configuration surface.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimParams {
    /// Side length of the square grid, in cells
    pub grid_size: i32,
    /// Seconds an agent stays in quarantine
    pub quarantine_duration: f32,
    /// Seconds a mask stays effective
    pub protection_duration: f32,
    /// Maximum Euclidean distance at which infection may occur
    pub proximity_threshold: f32,
    /// Chance of infection per in-range contact, in [0, 1]
    pub infection_probability: f32,
    /// Driver ticks per second
    pub tick_rate: u32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            grid_size: 50,
            quarantine_duration: 60.0,
            protection_duration: 60.0,
            proximity_threshold: 10.0,
            infection_probability: 0.5,
            tick_rate: 10,
        }
    }
}

impl SimParams {
    /// Elapsed seconds per driver tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// Resource: simulation clock, advanced once per tick
#[derive(Resource, Debug, Default)]
pub struct SimClock {
    /// Ticks completed
    pub tick: u64,
    /// Elapsed time handed in for the current tick, in seconds
    pub dt: f32,
    /// Seconds since the last all-healthy reset
    pub elapsed: f32,
}

impl SimClock {
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.dt = dt;
        self.elapsed += dt;
    }

    /// Driver-side reset once the whole population is healthy
    pub fn reset_elapsed(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Resource: agent entities in spawn order.
///
/// The infection pass iterates this list. The ordering is observable
/// behavior (an agent infected early in a tick spreads later in the same
/// tick), so it must not depend on archetype iteration order. The roster
/// is fixed after setup; agents are never added or removed.
#[derive(Resource, Debug, Default)]
pub struct AgentRoster {
    pub entities: Vec<Entity>,
}

impl AgentRoster {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
