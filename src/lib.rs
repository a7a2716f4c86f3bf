//! Layout Planner - placement core for production layouts
//!
//! Footprint geometry, the pairwise interaction test, persistent board
//! snapshots and the mandatory supply planner. Search drivers, scoring and
//! layout I/O live outside this crate and call in through these modules.

pub mod core;
pub mod layout;
pub mod planner;
pub mod spatial;
pub mod structure;

pub use crate::core::{LayoutConfig, LayoutError, PlacementConflict, Position, DEFAULT_BOARD_SIZE};
pub use crate::layout::{Counters, GridState};
pub use crate::planner::{
    plan_mandatory_structures, plan_optional_structures, MandatoryPlanner, PlanOutcome,
    PrefillOutcome,
};
pub use crate::spatial::interacts;
pub use crate::structure::{Structure, StructureKind};
