//! Agent Components
//!
//! Position on the grid and the four-state health machine.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Marker component identifying an entity as an agent
#[derive(Component, Debug, Clone, Default)]
pub struct Agent;

/// Component: an agent's cell on the square grid
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step by (dx, dy), clamping both components into [0, grid_size - 1]
    pub fn step(&mut self, dx: i32, dy: i32, grid_size: i32) {
        self.x = (self.x + dx).clamp(0, grid_size - 1);
        self.y = (self.y + dy).clamp(0, grid_size - 1);
    }

    /// Euclidean distance to another cell
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Component: an agent's health state
///
/// Exactly one variant holds at any time. The countdown for quarantine and
/// protection lives inside the variant, so a timer can only be non-zero
/// while the matching state holds.
#[derive(Component, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Health {
    #[default]
    Healthy,
    Infected,
    Quarantined { remaining: f32 },
    Protected { remaining: f32 },
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Health::Healthy)
    }

    pub fn is_infected(&self) -> bool {
        matches!(self, Health::Infected)
    }

    pub fn is_quarantined(&self) -> bool {
        matches!(self, Health::Quarantined { .. })
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Health::Protected { .. })
    }

    /// Remaining quarantine time in seconds, 0 outside quarantine
    pub fn quarantine_remaining(&self) -> f32 {
        match self {
            Health::Quarantined { remaining } => *remaining,
            _ => 0.0,
        }
    }

    /// Remaining mask time in seconds, 0 outside protection
    pub fn protection_remaining(&self) -> f32 {
        match self {
            Health::Protected { remaining } => *remaining,
            _ => 0.0,
        }
    }

    /// Mask a currently-healthy agent for `duration` seconds. Infected,
    /// quarantined and already-masked agents are unaffected. Returns true
    /// when the state changed.
    pub fn apply_protection(&mut self, duration: f32) -> bool {
        if self.is_healthy() {
            *self = Health::Protected {
                remaining: duration,
            };
            true
        } else {
            false
        }
    }

    /// Quarantine a currently-infected agent for `duration` seconds.
    /// No-op for any other state. Returns true when the state changed.
    pub fn apply_quarantine(&mut self, duration: f32) -> bool {
        if self.is_infected() {
            *self = Health::Quarantined {
                remaining: duration,
            };
            true
        } else {
            false
        }
    }

    /// Count down the quarantine timer by `dt`. At zero the agent is
    /// healthy, and fully susceptible, again. Returns true on the
    /// transition.
    pub fn decay_quarantine(&mut self, dt: f32) -> bool {
        if let Health::Quarantined { remaining } = self {
            *remaining -= dt;
            if *remaining <= 0.0 {
                *self = Health::Healthy;
                return true;
            }
        }
        false
    }

    /// Count down the mask timer by `dt`. Expiry restores Healthy.
    /// Returns true on the transition.
    pub fn decay_protection(&mut self, dt: f32) -> bool {
        if let Health::Protected { remaining } = self {
            *remaining -= dt;
            if *remaining <= 0.0 {
                *self = Health::Healthy;
                return true;
            }
        }
        false
    }

    /// Short label for snapshots and logs
    pub fn label(&self) -> &'static str {
        match self {
            Health::Healthy => "healthy",
            Health::Infected => "infected",
            Health::Quarantined { .. } => "quarantined",
            Health::Protected { .. } => "protected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_clamps_to_grid() {
        let mut pos = Position::new(0, 49);
        pos.step(-1, 1, 50);
        assert_eq!(pos, Position::new(0, 49));

        pos.step(1, -1, 50);
        assert_eq!(pos, Position::new(1, 48));
    }

    #[test]
    fn test_distance() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_protection_only_for_healthy() {
        let mut healthy = Health::Healthy;
        assert!(healthy.apply_protection(60.0));
        assert_eq!(healthy, Health::Protected { remaining: 60.0 });

        // Masking an infected agent must leave it infected
        let mut infected = Health::Infected;
        assert!(!infected.apply_protection(60.0));
        assert_eq!(infected, Health::Infected);

        let mut quarantined = Health::Quarantined { remaining: 30.0 };
        assert!(!quarantined.apply_protection(60.0));
        assert!(quarantined.is_quarantined());

        // Already masked: the running timer is not refreshed
        let mut masked = Health::Protected { remaining: 10.0 };
        assert!(!masked.apply_protection(60.0));
        assert_eq!(masked.protection_remaining(), 10.0);
    }

    #[test]
    fn test_quarantine_only_for_infected() {
        let mut infected = Health::Infected;
        assert!(infected.apply_quarantine(60.0));
        assert_eq!(infected.quarantine_remaining(), 60.0);

        let mut healthy = Health::Healthy;
        assert!(!healthy.apply_quarantine(60.0));
        assert!(healthy.is_healthy());
    }

    #[test]
    fn test_quarantine_decay_boundary() {
        // dt < remaining: stays quarantined with the difference left
        let mut health = Health::Quarantined { remaining: 1.0 };
        assert!(!health.decay_quarantine(0.4));
        assert!((health.quarantine_remaining() - 0.6).abs() < 1e-6);

        // dt >= remaining: recovers
        assert!(health.decay_quarantine(0.6));
        assert!(health.is_healthy());
    }

    #[test]
    fn test_protection_decay_boundary() {
        let mut health = Health::Protected { remaining: 0.1 };
        assert!(health.decay_protection(0.1));
        assert!(health.is_healthy());

        // No-op for every non-protected state
        let mut infected = Health::Infected;
        assert!(!infected.decay_protection(100.0));
        assert!(infected.is_infected());
    }

    #[test]
    fn test_timers_zero_outside_their_state() {
        for health in [Health::Healthy, Health::Infected] {
            assert_eq!(health.quarantine_remaining(), 0.0);
            assert_eq!(health.protection_remaining(), 0.0);
        }
        let quarantined = Health::Quarantined { remaining: 5.0 };
        assert_eq!(quarantined.protection_remaining(), 0.0);
    }
}
