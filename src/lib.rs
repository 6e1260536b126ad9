//! Grid Epidemic Simulation
//!
//! A fixed population of agents random-walks a bounded grid. Proximity to
//! an infected agent can infect the healthy; driver commands place agents
//! in timed quarantine or behind timed masks, both of which expire back to
//! healthy.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod events;
pub mod output;
pub mod setup;
pub mod sim;
pub mod systems;

pub use components::{Agent, AgentRoster, Health, Position, SimClock, SimParams};
pub use sim::Simulation;
pub use systems::commands::Command;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
