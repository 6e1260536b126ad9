//! ECS Components and Resources
//!
//! Agent components (position, health state) and world-level resources
//! (parameters, clock, spawn-order roster).

pub mod agent;
pub mod world;

pub use agent::{Agent, Health, Position};
pub use world::{AgentRoster, SimClock, SimParams};
