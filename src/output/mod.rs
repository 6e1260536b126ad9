//! Snapshot Output
//!
//! Read-only world views for an external renderer, serialized as JSON.
//! The renderer maps each agent's state to a color and shows the remaining
//! countdown next to quarantined and masked agents.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::components::{Agent, Health, Position, SimClock};

/// One agent as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub x: i32,
    pub y: i32,
    pub state: String,
    /// Remaining quarantine or protection time, 0 outside those states
    pub remaining_secs: f32,
}

/// Per-state population counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateCounts {
    pub healthy: usize,
    pub infected: usize,
    pub quarantined: usize,
    pub protected: usize,
}

/// Complete world view at one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    /// Seconds since the last all-healthy reset
    pub elapsed_secs: f32,
    pub counts: StateCounts,
    pub agents: Vec<AgentSnapshot>,
}

/// Errors at the snapshot file boundary
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Build a snapshot from the current world state
pub fn generate_snapshot(world: &mut World) -> WorldSnapshot {
    let (tick, elapsed_secs) = {
        let clock = world.resource::<SimClock>();
        (clock.tick, clock.elapsed)
    };

    let mut counts = StateCounts::default();
    let mut agents = Vec::new();
    let mut query = world.query_filtered::<(&Position, &Health), With<Agent>>();
    for (position, health) in query.iter(world) {
        match health {
            Health::Healthy => counts.healthy += 1,
            Health::Infected => counts.infected += 1,
            Health::Quarantined { .. } => counts.quarantined += 1,
            Health::Protected { .. } => counts.protected += 1,
        }
        let remaining_secs = match health {
            Health::Quarantined { remaining } | Health::Protected { remaining } => *remaining,
            _ => 0.0,
        };
        agents.push(AgentSnapshot {
            x: position.x,
            y: position.y,
            state: health.label().to_string(),
            remaining_secs,
        });
    }

    WorldSnapshot {
        tick,
        elapsed_secs,
        counts,
        agents,
    }
}

/// Write a snapshot under `dir` as `snapshot_<tick>.json`, creating the
/// directory if needed
pub fn write_snapshot(
    snapshot: &WorldSnapshot,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, SnapshotError> {
    fs::create_dir_all(dir.as_ref())?;
    let path = dir
        .as_ref()
        .join(format!("snapshot_{:06}.json", snapshot.tick));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json)?;
    Ok(path)
}
