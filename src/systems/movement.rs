//! Movement System
//!
//! Random walk on the grid: each non-quarantined agent steps ±1 on each
//! axis per tick, clamped to the grid bounds.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::{Agent, Health, Position, SimParams};
use crate::SimRng;

/// System: move every agent one random step. Both axes step independently.
/// Quarantined agents stay put.
pub fn wander(
    params: Res<SimParams>,
    mut rng: ResMut<SimRng>,
    mut query: Query<(&Health, &mut Position), With<Agent>>,
) {
    for (health, mut position) in query.iter_mut() {
        if health.is_quarantined() {
            continue;
        }
        let dx = if rng.0.gen::<bool>() { 1 } else { -1 };
        let dy = if rng.0.gen::<bool>() { 1 } else { -1 };
        position.step(dx, dy, params.grid_size);
    }
}
