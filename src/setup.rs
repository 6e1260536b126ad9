//! World Setup
//!
//! Resource insertion and population spawning.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::{Agent, AgentRoster, Health, Position, SimClock, SimParams};
use crate::events::TickEvents;
use crate::SimRng;

/// Default population size
pub const DEFAULT_AGENT_COUNT: usize = 20;

/// Insert the core resources into a fresh world
pub fn insert_resources(world: &mut World, params: SimParams, rng: SmallRng) {
    world.insert_resource(params);
    world.insert_resource(SimClock::default());
    world.insert_resource(TickEvents::new());
    world.insert_resource(AgentRoster::default());
    world.insert_resource(SimRng(rng));
}

/// Spawn the population at uniformly random grid cells. The first agent
/// starts infected, everyone else healthy. Spawn order is recorded in the
/// roster and fixed for the simulation's lifetime.
pub fn spawn_population(world: &mut World, count: usize) {
    let grid_size = world.resource::<SimParams>().grid_size;
    let positions: Vec<Position> = {
        let mut rng = world.resource_mut::<SimRng>();
        (0..count)
            .map(|_| {
                Position::new(
                    rng.0.gen_range(0..grid_size),
                    rng.0.gen_range(0..grid_size),
                )
            })
            .collect()
    };

    let mut roster = Vec::with_capacity(count);
    for (index, position) in positions.into_iter().enumerate() {
        let health = if index == 0 {
            Health::Infected
        } else {
            Health::Healthy
        };
        roster.push(world.spawn((Agent, position, health)).id());
    }
    world.resource_mut::<AgentRoster>().entities = roster;
}
