//! Backtracking search for mandatory supply structures
//!
//! Depth-first over persistent states: each step links the first deficient
//! primary (placement order) to one more supply node and recurses. Dropping a
//! child state is the whole of backtracking. Before expanding, the wired and
//! candidate links together must still be able to give every unit of demand
//! its own feeder lane; placements only ever remove candidates, so a branch
//! failing that check can never recover.

use crate::core::config::{config, LayoutConfig};
use crate::layout::GridState;
use crate::planner::links::{can_be_fully_supplied, candidate_links, deficits, SupplyLink};

/// Result of mandatory planning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Every primary is fully supplied in the returned state
    Planned(GridState),
    /// No assignment of supply structures satisfies all primaries
    Infeasible,
    /// The configured expansion budget ran out before an answer was found
    BudgetExhausted { expansions: u64 },
}

impl PlanOutcome {
    pub fn is_planned(&self) -> bool {
        matches!(self, PlanOutcome::Planned(_))
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, PlanOutcome::Infeasible)
    }

    pub fn state(&self) -> Option<&GridState> {
        match self {
            PlanOutcome::Planned(state) => Some(state),
            _ => None,
        }
    }

    pub fn into_state(self) -> Option<GridState> {
        match self {
            PlanOutcome::Planned(state) => Some(state),
            _ => None,
        }
    }
}

/// Search effort for one planner call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanStats {
    /// Links tentatively placed
    pub expansions: u64,
    /// Branches abandoned
    pub dead_ends: u64,
    /// Deepest recursion reached
    pub max_depth: usize,
}

/// Planner for the supply structures every primary needs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MandatoryPlanner {
    budget: Option<u64>,
}

impl MandatoryPlanner {
    /// Planner that runs to completion
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            budget: config.planner_budget,
        }
    }

    /// Cap the number of expansions
    pub fn with_budget(mut self, expansions: u64) -> Self {
        self.budget = Some(expansions);
        self
    }

    pub fn budget(&self) -> Option<u64> {
        self.budget
    }

    pub fn plan(&self, state: &GridState) -> PlanOutcome {
        self.plan_with_stats(state).0
    }

    pub fn plan_with_stats(&self, state: &GridState) -> (PlanOutcome, PlanStats) {
        let initial = deficits(state);
        if initial.is_empty() {
            tracing::debug!("all {} primaries already supplied", state.primaries().count());
            return (PlanOutcome::Planned(state.clone()), PlanStats::default());
        }

        tracing::debug!(
            "planning supply for {} deficient primaries ({} links missing)",
            initial.len(),
            initial.iter().map(|d| d.missing).sum::<u32>()
        );

        let mut search = Search {
            budget: self.budget,
            stats: PlanStats::default(),
        };
        let outcome = match search.descend(state.clone(), None, 0) {
            Ok(Some(planned)) => {
                debug_assert!(planned.check_invariants().is_ok());
                PlanOutcome::Planned(planned)
            }
            Ok(None) => PlanOutcome::Infeasible,
            Err(Exhausted) => PlanOutcome::BudgetExhausted {
                expansions: search.stats.expansions,
            },
        };

        tracing::debug!(
            "supply planning finished: {} after {} expansions, {} dead ends",
            match &outcome {
                PlanOutcome::Planned(_) => "planned",
                PlanOutcome::Infeasible => "infeasible",
                PlanOutcome::BudgetExhausted { .. } => "budget exhausted",
            },
            search.stats.expansions,
            search.stats.dead_ends
        );

        (outcome, search.stats)
    }
}

/// Plan mandatory supply structures with the global config
pub fn plan_mandatory_structures(state: &GridState) -> PlanOutcome {
    MandatoryPlanner::from_config(config()).plan(state)
}

struct Exhausted;

struct Search {
    budget: Option<u64>,
    stats: PlanStats,
}

impl Search {
    fn expand(&mut self) -> Result<(), Exhausted> {
        if let Some(budget) = self.budget {
            if self.stats.expansions >= budget {
                return Err(Exhausted);
            }
        }
        self.stats.expansions += 1;
        Ok(())
    }

    /// `floor` is the link placed by the parent step. Links for the same
    /// primary are chosen in increasing node order.
    fn descend(
        &mut self,
        state: GridState,
        floor: Option<SupplyLink>,
        depth: usize,
    ) -> Result<Option<GridState>, Exhausted> {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let open = deficits(&state);
        let Some(target) = open.first().copied() else {
            return Ok(Some(state));
        };

        if !can_be_fully_supplied(&state) {
            tracing::trace!(
                "depth {}: {} primaries short of links and not enough lanes left",
                depth,
                open.len()
            );
            self.stats.dead_ends += 1;
            return Ok(None);
        }

        for link in candidate_links(&state, target.primary) {
            if let Some(previous) = floor {
                if previous.primary == link.primary && link.node <= previous.node {
                    continue;
                }
            }

            self.expand()?;
            let next = match link.apply(&state) {
                Ok(next) => next,
                Err(conflict) => {
                    tracing::trace!("depth {}: skipping link: {}", depth, conflict);
                    continue;
                }
            };
            tracing::trace!(
                "depth {}: {} linked to node {} via {}",
                depth,
                state.placed()[link.primary],
                link.node,
                link.lane
            );

            if let Some(planned) = self.descend(next, Some(link), depth + 1)? {
                return Ok(Some(planned));
            }
        }

        self.stats.dead_ends += 1;
        Ok(None)
    }
}
