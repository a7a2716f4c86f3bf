//! Mandatory supply planning
//!
//! Finds feeder and supply-node placements so that every primary is linked
//! to as many distinct supply nodes as its kind demands, or proves that the
//! arrangement of primaries admits no such placement.

pub mod links;
pub mod prefill;
pub mod search;

pub use links::{
    can_be_fully_supplied, candidate_links, deficits, is_fully_supplied, link_assignment,
    supply_links, Deficit, SupplyLink,
};
pub use prefill::{plan_optional_structures, PrefillOutcome};
pub use search::{plan_mandatory_structures, MandatoryPlanner, PlanOutcome, PlanStats};
