//! Infection System
//!
//! The proximity rule and the ordered, in-place infection pass.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::{AgentRoster, Health, Position, SimClock, SimParams};
use crate::events::{HealthEvent, HealthEventKind, TickEvents};
use crate::SimRng;

/// Proximity rule: an infected source at `source` may infect `target` when
/// the target is healthy and within `threshold`. One uniform sample is
/// drawn only when both guards pass. Returns true when the target was
/// infected.
///
/// Non-healthy targets (including the source checked against itself) fall
/// through the state guard untouched; in particular protected agents
/// cannot be infected.
pub fn try_infect(
    source: Position,
    target_pos: Position,
    target: &mut Health,
    threshold: f32,
    probability: f32,
    rng: &mut SmallRng,
) -> bool {
    if !target.is_healthy() {
        return false;
    }
    if source.distance_to(&target_pos) > threshold {
        return false;
    }
    if rng.gen::<f32>() < probability {
        *target = Health::Infected;
        return true;
    }
    false
}

/// System: one ordered pass over the roster. Every agent that is infected
/// when its turn comes is checked against every agent in spawn order,
/// mutating targets in place — so an agent infected earlier in this pass
/// spreads further within the same tick. The source set is deliberately
/// not snapshotted.
pub fn spread_infection(world: &mut World) {
    let roster = world.resource::<AgentRoster>().entities.clone();
    let params = *world.resource::<SimParams>();
    let tick = world.resource::<SimClock>().tick;

    world.resource_scope(|world, mut rng: Mut<SimRng>| {
        for &source in &roster {
            let source_infected = world
                .get::<Health>(source)
                .is_some_and(|h| h.is_infected());
            if !source_infected {
                continue;
            }
            let Some(source_pos) = world.get::<Position>(source).copied() else {
                continue;
            };

            for &target in &roster {
                let Some(target_pos) = world.get::<Position>(target).copied() else {
                    continue;
                };
                let Some(mut health) = world.get_mut::<Health>(target) else {
                    continue;
                };
                if try_infect(
                    source_pos,
                    target_pos,
                    &mut *health,
                    params.proximity_threshold,
                    params.infection_probability,
                    &mut rng.0,
                ) {
                    world.resource_mut::<TickEvents>().push(HealthEvent {
                        tick,
                        kind: HealthEventKind::Infected,
                        x: target_pos.x,
                        y: target_pos.y,
                    });
                }
            }
        }
    });
}
