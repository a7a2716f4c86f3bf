//! Persistent board snapshot
//!
//! A `GridState` is never mutated once handed out. Every transition clones
//! the snapshot, applies the change to the copy and returns it, so earlier
//! snapshots stay valid for other branches of a search.

use rayon::prelude::*;
use thiserror::Error;

use crate::core::config::config;
use crate::core::error::PlacementConflict;
use crate::core::types::Position;
use crate::layout::counters::Counters;
use crate::spatial::grid::Grid;
use crate::spatial::interaction::interacts;
use crate::structure::{Structure, StructureKind};

/// Broken consistency between placed structures, occupancy and counters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("{structure} extends off the board at {cell}")]
    OffBoard { structure: Structure, cell: Position },

    #[error("cell {cell} of {structure} is not owned by it")]
    CellNotOwned { structure: Structure, cell: Position },

    #[error("occupancy holds {occupied} cells but footprints cover {expected}")]
    StrayCells { occupied: usize, expected: usize },

    #[error("counters drifted: stored {stored:?}, recomputed {recomputed:?}")]
    CounterDrift { stored: Counters, recomputed: Counters },
}

/// Immutable snapshot of a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    board_size: i32,
    placed: Vec<Structure>,
    /// Owner index into `placed` for every occupied cell
    occupancy: Grid<Option<u32>>,
    counters: Counters,
}

impl Default for GridState {
    fn default() -> Self {
        Self::new()
    }
}

impl GridState {
    /// Empty board sized by the global config
    pub fn new() -> Self {
        Self::with_board_size(config().board_size)
    }

    /// Empty board of the given side length
    pub fn with_board_size(board_size: i32) -> Self {
        Self {
            board_size,
            placed: Vec::new(),
            occupancy: Grid::new(board_size),
            counters: Counters::new(),
        }
    }

    /// Empty board with its four corner cells blocked
    pub fn with_reserved_corners(board_size: i32) -> Result<Self, PlacementConflict> {
        let last = board_size - 1;
        Self::with_board_size(board_size).add_all(
            [(0, 0), (0, last), (last, 0), (last, last)]
                .into_iter()
                .map(|(row, col)| Structure::at(StructureKind::Reserved, row, col)),
        )
    }

    pub fn board_size(&self) -> i32 {
        self.board_size
    }

    /// Structures in placement order
    pub fn placed(&self) -> &[Structure] {
        &self.placed
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.within_board(self.board_size)
    }

    /// Index into `placed` of the structure covering `pos`
    #[inline]
    pub fn index_at(&self, pos: Position) -> Option<usize> {
        self.occupancy
            .get(pos)
            .copied()
            .flatten()
            .map(|index| index as usize)
    }

    pub fn structure_at(&self, pos: Position) -> Option<&Structure> {
        self.index_at(pos).map(|index| &self.placed[index])
    }

    /// True for in-bounds cells nobody occupies
    pub fn is_free(&self, pos: Position) -> bool {
        matches!(self.occupancy.get(pos), Some(None))
    }

    /// Number of occupied cells
    pub fn occupied_cells(&self) -> usize {
        self.occupancy.iter().filter(|(_, owner)| owner.is_some()).count()
    }

    /// Primary structures with their indices, in placement order
    pub fn primaries(&self) -> impl Iterator<Item = (usize, &Structure)> + '_ {
        self.placed.iter().enumerate().filter(|(_, s)| s.is_primary())
    }

    /// Return a new state with `structure` added
    ///
    /// Fails when any footprint cell leaves the board or is already occupied;
    /// `self` is left untouched either way. Range interactions are not
    /// checked here.
    pub fn add_building(&self, structure: Structure) -> Result<GridState, PlacementConflict> {
        for cell in structure.footprint().cells() {
            if !self.in_bounds(cell) {
                tracing::trace!("rejecting {}: off board at {}", structure, cell);
                return Err(PlacementConflict::OutOfBounds { structure, cell });
            }
            if let Some(owner) = self.structure_at(cell) {
                tracing::trace!("rejecting {}: {} owns {}", structure, owner, cell);
                return Err(PlacementConflict::Occupied {
                    structure,
                    cell,
                    owner: *owner,
                });
            }
        }

        let mut next = self.clone();
        let index = next.placed.len() as u32;
        for cell in structure.footprint().cells() {
            next.occupancy.set(cell, Some(index));
        }
        next.placed.push(structure);
        next.counters.record(&structure);
        Ok(next)
    }

    /// Add several structures in order; fails on the first conflict
    pub fn add_all(
        &self,
        structures: impl IntoIterator<Item = Structure>,
    ) -> Result<GridState, PlacementConflict> {
        let mut state = self.clone();
        for structure in structures {
            state = state.add_building(structure)?;
        }
        Ok(state)
    }

    /// Indices of placed structures interacting with the one at `index`
    pub fn interactions_of(&self, index: usize) -> Vec<usize> {
        let Some(subject) = self.placed.get(index) else {
            return Vec::new();
        };
        self.placed
            .iter()
            .enumerate()
            .filter(|(other_index, other)| *other_index != index && interacts(subject, other))
            .map(|(other_index, _)| other_index)
            .collect()
    }

    /// Every state reachable by adding one structure of `kind`
    ///
    /// Anchors are tried in row-major order across worker threads; the result
    /// keeps that order.
    pub fn successors(&self, kind: StructureKind) -> Vec<GridState> {
        let (height, width) = kind.size();
        let anchors: Vec<Position> = (0..=self.board_size - height)
            .flat_map(|row| (0..=self.board_size - width).map(move |col| Position::new(row, col)))
            .collect();

        anchors
            .par_iter()
            .filter_map(|&anchor| self.add_building(Structure::new(kind, anchor)).ok())
            .collect()
    }

    /// Verify occupancy, placement list and counters agree
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut expected = 0;
        for (index, structure) in self.placed.iter().enumerate() {
            for cell in structure.footprint().cells() {
                if !self.in_bounds(cell) {
                    return Err(InvariantViolation::OffBoard {
                        structure: *structure,
                        cell,
                    });
                }
                if self.index_at(cell) != Some(index) {
                    return Err(InvariantViolation::CellNotOwned {
                        structure: *structure,
                        cell,
                    });
                }
                expected += 1;
            }
        }

        let occupied = self.occupied_cells();
        if occupied != expected {
            return Err(InvariantViolation::StrayCells { occupied, expected });
        }

        let recomputed = Counters::tally(&self.placed);
        if recomputed != self.counters {
            return Err(InvariantViolation::CounterDrift {
                stored: self.counters,
                recomputed,
            });
        }

        Ok(())
    }
}
