//! Driver Commands
//!
//! The closed command set an external input source may apply between
//! ticks. Each command hits every agent unconditionally; the agents' own
//! state guards decide whether anything changes.

use bevy_ecs::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{Agent, AgentRoster, Health, Position, SimClock, SimParams};
use crate::events::{HealthEvent, HealthEventKind, TickEvents};
use crate::SimRng;

/// Commands accepted from the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    MaskAll,
    QuarantineAll,
    SeedInfection,
}

impl Command {
    pub fn apply(self, world: &mut World) {
        match self {
            Command::MaskAll => mask_all(world),
            Command::QuarantineAll => quarantine_all(world),
            Command::SeedInfection => seed_infection(world),
        }
    }
}

/// Mask every currently-healthy, currently-unmasked agent for the
/// protection duration.
pub fn mask_all(world: &mut World) {
    let params = *world.resource::<SimParams>();
    let tick = world.resource::<SimClock>().tick;

    let mut masked = Vec::new();
    let mut query = world.query_filtered::<(&Position, &mut Health), With<Agent>>();
    for (position, mut health) in query.iter_mut(world) {
        if health.apply_protection(params.protection_duration) {
            masked.push(*position);
        }
    }

    let mut events = world.resource_mut::<TickEvents>();
    for position in masked {
        events.push(HealthEvent {
            tick,
            kind: HealthEventKind::Masked,
            x: position.x,
            y: position.y,
        });
    }
}

/// Quarantine every currently-infected agent for the quarantine duration.
pub fn quarantine_all(world: &mut World) {
    let params = *world.resource::<SimParams>();
    let tick = world.resource::<SimClock>().tick;

    let mut isolated = Vec::new();
    let mut query = world.query_filtered::<(&Position, &mut Health), With<Agent>>();
    for (position, mut health) in query.iter_mut(world) {
        if health.apply_quarantine(params.quarantine_duration) {
            isolated.push(*position);
        }
    }

    let mut events = world.resource_mut::<TickEvents>();
    for position in isolated {
        events.push(HealthEvent {
            tick,
            kind: HealthEventKind::Quarantined,
            x: position.x,
            y: position.y,
        });
    }
}

/// Force one uniformly chosen agent into the infected state, regardless of
/// its current state. This is an override, not gated by the healthy guard
/// used elsewhere.
pub fn seed_infection(world: &mut World) {
    let tick = world.resource::<SimClock>().tick;
    let roster_len = world.resource::<AgentRoster>().len();
    if roster_len == 0 {
        return;
    }

    let index = {
        let mut rng = world.resource_mut::<SimRng>();
        rng.0.gen_range(0..roster_len)
    };
    let chosen = world.resource::<AgentRoster>().entities[index];

    if let Some(mut health) = world.get_mut::<Health>(chosen) {
        *health = Health::Infected;
    }
    if let Some(position) = world.get::<Position>(chosen).copied() {
        world.resource_mut::<TickEvents>().push(HealthEvent {
            tick,
            kind: HealthEventKind::Seeded,
            x: position.x,
            y: position.y,
        });
    }
}
