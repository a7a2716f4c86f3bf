//! Supply links and coverage bookkeeping
//!
//! A supply link joins a primary to a supply node through a single feeder:
//! the feeder sits directly outside one footprint edge and the node one cell
//! further out on the same line. Links are derived from the board; nothing
//! stores them.
//!
//! A feeder wedged between two primaries can be wired to both, but it only
//! ever serves one. Coverage is therefore a matching: every unit of demand
//! is paired with its own feeder lane, primaries claiming in placement order.

use ahash::{AHashMap, AHashSet};

use crate::core::error::PlacementConflict;
use crate::core::types::Position;
use crate::layout::GridState;
use crate::spatial::footprint::CellRect;
use crate::spatial::interaction::interacts;
use crate::structure::{Structure, StructureKind};

/// Primary, feeder lane and supply node on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SupplyLink {
    /// Index of the primary in `GridState::placed`
    pub primary: usize,
    pub lane: Position,
    pub node: Position,
}

impl SupplyLink {
    /// Place the feeder, and the node unless one is already there
    pub fn apply(&self, state: &GridState) -> Result<GridState, PlacementConflict> {
        let with_feeder = state.add_building(Structure::new(StructureKind::Feeder, self.lane))?;
        match with_feeder.structure_at(self.node) {
            None => with_feeder.add_building(Structure::new(StructureKind::SupplyNode, self.node)),
            Some(existing) if existing.kind == StructureKind::SupplyNode => Ok(with_feeder),
            Some(owner) => Err(PlacementConflict::Occupied {
                structure: Structure::new(StructureKind::SupplyNode, self.node),
                cell: self.node,
                owner: *owner,
            }),
        }
    }
}

/// A primary still short of supply links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deficit {
    pub primary: usize,
    pub missing: u32,
}

/// Lane cell between a footprint and a node two cells beyond one of its edges
fn lane_toward(footprint: &CellRect, node: Position) -> Option<Position> {
    let rows = footprint.min.row..=footprint.max.row;
    let cols = footprint.min.col..=footprint.max.col;

    if cols.contains(&node.col) {
        if node.row == footprint.min.row - 2 {
            return Some(node.offset(1, 0));
        }
        if node.row == footprint.max.row + 2 {
            return Some(node.offset(-1, 0));
        }
    }
    if rows.contains(&node.row) {
        if node.col == footprint.min.col - 2 {
            return Some(node.offset(0, 1));
        }
        if node.col == footprint.max.col + 2 {
            return Some(node.offset(0, -1));
        }
    }
    None
}

/// Cells a supply node could occupy while reaching `footprint`
fn node_window(footprint: &CellRect) -> CellRect {
    let reach = StructureKind::SupplyNode.reach().max_extent();
    footprint.grow(reach, reach, reach, reach)
}

/// Links whose feeder and node are both on the board, whoever the feeder
/// ends up serving. Row-major by node.
fn wired_links(state: &GridState, index: usize) -> Vec<SupplyLink> {
    let Some(primary) = state.placed().get(index) else {
        return Vec::new();
    };
    let footprint = primary.footprint();

    node_window(&footprint)
        .cells()
        .filter_map(|node| {
            let lane = lane_toward(&footprint, node)?;
            let node_ok = state
                .structure_at(node)
                .is_some_and(|s| s.kind == StructureKind::SupplyNode);
            let lane_ok = state
                .structure_at(lane)
                .is_some_and(|s| s.kind == StructureKind::Feeder);
            (node_ok && lane_ok).then_some(SupplyLink {
                primary: index,
                lane,
                node,
            })
        })
        .collect()
}

/// One unit of demand and the links that could satisfy it
struct Slot {
    primary: usize,
    options: Vec<SupplyLink>,
}

/// One slot per unit of demand, primaries in placement order
fn demand_slots(
    state: &GridState,
    options_for: impl Fn(usize) -> Vec<SupplyLink>,
) -> Vec<Slot> {
    let mut slots = Vec::new();
    for (index, primary) in state.primaries() {
        let demand = primary.kind.supply_demand();
        if demand == 0 {
            continue;
        }
        let options = options_for(index);
        for _ in 0..demand {
            slots.push(Slot {
                primary: index,
                options: options.clone(),
            });
        }
    }
    slots
}

/// Feeder lanes matched to demand slots, at most one slot per lane
struct LaneMatching<'a> {
    slots: &'a [Slot],
    owner: AHashMap<Position, usize>,
}

impl<'a> LaneMatching<'a> {
    /// Slots are matched in order; a later slot only displaces an earlier
    /// one when the earlier slot can move to another lane.
    fn solve(slots: &'a [Slot]) -> Self {
        let mut matching = Self {
            slots,
            owner: AHashMap::new(),
        };
        for slot in 0..slots.len() {
            let mut visited = AHashSet::new();
            matching.augment(slot, &mut visited);
        }
        matching
    }

    fn augment(&mut self, slot: usize, visited: &mut AHashSet<Position>) -> bool {
        let slots = self.slots;
        for link in &slots[slot].options {
            if !visited.insert(link.lane) {
                continue;
            }
            let available = match self.owner.get(&link.lane).copied() {
                None => true,
                Some(holder) => self.augment(holder, visited),
            };
            if available {
                self.owner.insert(link.lane, slot);
                return true;
            }
        }
        false
    }

    fn link_of(&self, slot: usize) -> Option<SupplyLink> {
        self.slots[slot]
            .options
            .iter()
            .find(|link| self.owner.get(&link.lane) == Some(&slot))
            .copied()
    }

    fn is_complete(&self) -> bool {
        self.owner.len() == self.slots.len()
    }
}

/// Links credited to every primary with supply demand, in placement order
///
/// Each feeder counts for at most one primary. Each primary's links are
/// row-major by node.
pub fn link_assignment(state: &GridState) -> Vec<(usize, Vec<SupplyLink>)> {
    let slots = demand_slots(state, |index| wired_links(state, index));
    let matching = LaneMatching::solve(&slots);

    let mut assignment: Vec<(usize, Vec<SupplyLink>)> = Vec::new();
    for (slot_index, slot) in slots.iter().enumerate() {
        if assignment.last().map(|(primary, _)| *primary) != Some(slot.primary) {
            assignment.push((slot.primary, Vec::new()));
        }
        if let (Some(link), Some((_, links))) = (matching.link_of(slot_index), assignment.last_mut()) {
            links.push(link);
        }
    }
    for (_, links) in &mut assignment {
        links.sort_by_key(|link| link.node);
    }
    assignment
}

/// Links credited to the primary at `index`, row-major by node
pub fn supply_links(state: &GridState, index: usize) -> Vec<SupplyLink> {
    link_assignment(state)
        .into_iter()
        .find(|(primary, _)| *primary == index)
        .map(|(_, links)| links)
        .unwrap_or_default()
}

/// Primaries with fewer links than their kind demands, in placement order
pub fn deficits(state: &GridState) -> Vec<Deficit> {
    link_assignment(state)
        .into_iter()
        .filter_map(|(index, links)| {
            let demand = state.placed()[index].kind.supply_demand();
            let linked = links.len() as u32;
            (linked < demand).then_some(Deficit {
                primary: index,
                missing: demand - linked,
            })
        })
        .collect()
}

pub fn is_fully_supplied(state: &GridState) -> bool {
    deficits(state).is_empty()
}

/// Whether wired links plus candidate links can still cover every demand
///
/// Candidates of different primaries may contend for the same cells, so this
/// can answer `true` for a board that has no solution. A `false` is final:
/// placements only remove candidates.
pub fn can_be_fully_supplied(state: &GridState) -> bool {
    let slots = demand_slots(state, |index| {
        let mut options = wired_links(state, index);
        options.extend(candidate_links(state, index));
        options
    });
    LaneMatching::solve(&slots).is_complete()
}

/// Links that could still be added for the primary at `index`
///
/// Scans every cell within supply-node reach of the footprint in row-major
/// order. A cell qualifies when a node there would interact with the
/// primary, it sits two cells beyond an edge, it is free or already a supply
/// node, and the lane between is free. Any lane holding a feeder is skipped,
/// whichever primary that feeder serves, so a node can be offered again only
/// through a different lane.
pub fn candidate_links(state: &GridState, index: usize) -> Vec<SupplyLink> {
    let Some(primary) = state.placed().get(index) else {
        return Vec::new();
    };
    let footprint = primary.footprint();

    node_window(&footprint)
        .cells()
        .filter(|&node| state.in_bounds(node))
        .filter(|&node| interacts(&Structure::new(StructureKind::SupplyNode, node), primary))
        .filter_map(|node| {
            let lane = lane_toward(&footprint, node)?;
            if !state.is_free(lane) {
                return None;
            }
            let node_ok = match state.structure_at(node) {
                None => true,
                Some(existing) => existing.kind == StructureKind::SupplyNode,
            };
            node_ok.then_some(SupplyLink {
                primary: index,
                lane,
                node,
            })
        })
        .collect()
}
