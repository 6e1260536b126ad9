//! ECS Systems
//!
//! Per-tick systems (movement, infection, timer decay) and the driver
//! command set.

pub mod commands;
pub mod infection;
pub mod movement;
pub mod recovery;

pub use commands::{mask_all, quarantine_all, seed_infection, Command};
pub use infection::{spread_infection, try_infect};
pub use movement::wander;
pub use recovery::{decay_protection, decay_quarantine};
