//! Search-free supply pass
//!
//! Two rules, repeated until the board stops changing:
//! - a primary with exactly as many candidate links as it is missing gets
//!   all of them, and one with fewer makes the board infeasible;
//! - a candidate link whose cells no other short primary could use is placed
//!   straight away.
//!
//! Whatever is still short afterwards is left for [`MandatoryPlanner`].
//!
//! [`MandatoryPlanner`]: crate::planner::MandatoryPlanner

use ahash::{AHashMap, AHashSet};

use crate::core::types::Position;
use crate::layout::GridState;
use crate::planner::links::{candidate_links, deficits, Deficit, SupplyLink};
use crate::structure::StructureKind;

/// Result of the search-free pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefillOutcome {
    /// Board with every uncontroversial link placed; may still have deficits
    Prefilled(GridState),
    /// Some primary can no longer reach its demand
    Infeasible,
}

impl PrefillOutcome {
    pub fn is_infeasible(&self) -> bool {
        matches!(self, PrefillOutcome::Infeasible)
    }

    pub fn state(&self) -> Option<&GridState> {
        match self {
            PrefillOutcome::Prefilled(state) => Some(state),
            PrefillOutcome::Infeasible => None,
        }
    }

    pub fn into_state(self) -> Option<GridState> {
        match self {
            PrefillOutcome::Prefilled(state) => Some(state),
            PrefillOutcome::Infeasible => None,
        }
    }
}

/// Place forced and uncontested supply links
pub fn plan_optional_structures(state: &GridState) -> PrefillOutcome {
    let mut current = state.clone();
    let mut rounds = 0;
    loop {
        rounds += 1;
        let Some(forced) = place_forced_links(&current) else {
            tracing::debug!("prefill: infeasible after {} rounds", rounds);
            return PrefillOutcome::Infeasible;
        };
        let next = place_uncontested_links(&forced);
        if next.placed().len() == current.placed().len() {
            tracing::debug!(
                "prefill: added {} structures in {} rounds, {} primaries still short",
                next.placed().len() - state.placed().len(),
                rounds,
                deficits(&next).len()
            );
            return PrefillOutcome::Prefilled(next);
        }
        current = next;
    }
}

/// Apply every link some primary cannot do without
fn place_forced_links(state: &GridState) -> Option<GridState> {
    let mut current = state.clone();
    'scan: loop {
        for deficit in deficits(&current) {
            let candidates = candidate_links(&current, deficit.primary);
            let missing = deficit.missing as usize;
            if candidates.len() < missing {
                tracing::trace!(
                    "prefill: {} has {} candidates for {} missing links",
                    current.placed()[deficit.primary],
                    candidates.len(),
                    missing
                );
                return None;
            }
            if candidates.len() == missing {
                for link in candidates {
                    current = link.apply(&current).ok()?;
                }
                continue 'scan;
            }
        }
        return Some(current);
    }
}

/// Cells a link would newly fill; an existing supply node is shared, not filled
fn new_cells(state: &GridState, link: &SupplyLink) -> Vec<Position> {
    let node_exists = state
        .structure_at(link.node)
        .is_some_and(|s| s.kind == StructureKind::SupplyNode);
    if node_exists {
        vec![link.lane]
    } else {
        vec![link.lane, link.node]
    }
}

fn place_uncontested_links(state: &GridState) -> GridState {
    let offers: Vec<(Deficit, Vec<SupplyLink>)> = deficits(state)
        .into_iter()
        .map(|deficit| (deficit, candidate_links(state, deficit.primary)))
        .collect();

    // Number of distinct short primaries wanting each cell
    let mut claims: AHashMap<Position, u32> = AHashMap::new();
    for (_, links) in &offers {
        let cells: AHashSet<Position> = links
            .iter()
            .flat_map(|link| new_cells(state, link))
            .collect();
        for cell in cells {
            *claims.entry(cell).or_insert(0) += 1;
        }
    }

    let mut current = state.clone();
    for (deficit, links) in offers {
        let mut placed = 0;
        for link in links {
            if placed == deficit.missing {
                break;
            }
            let contested = new_cells(state, &link)
                .iter()
                .any(|cell| claims.get(cell).copied().unwrap_or(0) > 1);
            if contested {
                continue;
            }
            if let Ok(next) = link.apply(&current) {
                current = next;
                placed += 1;
            }
        }
    }
    current
}
