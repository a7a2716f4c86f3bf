//! Running tallies over the structures in a layout

use crate::structure::{Structure, StructureKind};

/// Per-kind counts plus aggregate cost figures
///
/// Maintained incrementally by [`Counters::record`] on every transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    by_kind: [u32; StructureKind::COUNT],
    power_kw: u64,
    cells: usize,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one structure's contribution
    pub fn record(&mut self, structure: &Structure) {
        self.by_kind[structure.kind.index()] += 1;
        self.power_kw += u64::from(structure.kind.power_kw());
        self.cells += structure.kind.cell_count();
    }

    /// Recompute from scratch
    pub fn tally<'a>(placed: impl IntoIterator<Item = &'a Structure>) -> Self {
        let mut counters = Self::new();
        for structure in placed {
            counters.record(structure);
        }
        counters
    }

    pub fn count(&self, kind: StructureKind) -> u32 {
        self.by_kind[kind.index()]
    }

    pub fn total(&self) -> u32 {
        self.by_kind.iter().sum()
    }

    pub fn power_kw(&self) -> u64 {
        self.power_kw
    }

    /// Cells covered by all footprints
    pub fn cells(&self) -> usize {
        self.cells
    }
}
