//! Recovery Systems
//!
//! Countdown decay for quarantine and protection. Both expire back to
//! healthy; there is no immunity after recovery.

use bevy_ecs::prelude::*;

use crate::components::{Agent, Health, Position, SimClock};
use crate::events::{HealthEvent, HealthEventKind, TickEvents};

/// System: count down quarantine timers by the tick's `dt`; expired agents
/// are healthy, and fully susceptible, again.
pub fn decay_quarantine(
    clock: Res<SimClock>,
    mut events: ResMut<TickEvents>,
    mut query: Query<(&Position, &mut Health), With<Agent>>,
) {
    for (position, mut health) in query.iter_mut() {
        if health.decay_quarantine(clock.dt) {
            events.push(HealthEvent {
                tick: clock.tick,
                kind: HealthEventKind::QuarantineEnded,
                x: position.x,
                y: position.y,
            });
        }
    }
}

/// System: count down mask timers by the tick's `dt`. No-op for every
/// non-protected agent.
pub fn decay_protection(
    clock: Res<SimClock>,
    mut events: ResMut<TickEvents>,
    mut query: Query<(&Position, &mut Health), With<Agent>>,
) {
    for (position, mut health) in query.iter_mut() {
        if health.decay_protection(clock.dt) {
            events.push(HealthEvent {
                tick: clock.tick,
                kind: HealthEventKind::ProtectionExpired,
                x: position.x,
                y: position.y,
            });
        }
    }
}
