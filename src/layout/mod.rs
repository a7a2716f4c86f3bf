//! Board state: placed structures, occupancy and counters

pub mod counters;
pub mod render;
pub mod state;

pub use counters::Counters;
pub use state::{GridState, InvariantViolation};
