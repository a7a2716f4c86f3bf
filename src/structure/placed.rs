//! A single structure value: kind plus anchor

use serde::{Deserialize, Serialize};

use crate::core::types::{Position, COORD_LIMIT};
use crate::spatial::footprint::{footprint_of, range_of, CellRect, Zone};
use crate::structure::kind::StructureKind;

/// One placed or candidate structure
///
/// Immutable; footprint and range are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Structure {
    pub kind: StructureKind,
    pub anchor: Position,
}

impl Structure {
    /// Create a structure anchored at its top-left cell
    ///
    /// # Panics
    /// If the anchor lies beyond `COORD_LIMIT` in either axis.
    pub fn new(kind: StructureKind, anchor: Position) -> Self {
        assert!(
            anchor.row.abs() <= COORD_LIMIT && anchor.col.abs() <= COORD_LIMIT,
            "anchor {} outside representable coordinates",
            anchor
        );
        Self { kind, anchor }
    }

    pub fn at(kind: StructureKind, row: i32, col: i32) -> Self {
        Self::new(kind, Position::new(row, col))
    }

    pub fn footprint(&self) -> CellRect {
        footprint_of(self.kind, self.anchor)
    }

    pub fn range(&self) -> Zone {
        range_of(self.kind, self.anchor)
    }

    pub fn footprint_cells(&self) -> Vec<Position> {
        self.footprint().cells().collect()
    }

    pub fn range_cells(&self) -> Vec<Position> {
        self.range().cells()
    }

    pub fn is_primary(&self) -> bool {
        self.kind.is_primary()
    }
}

impl std::fmt::Display for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{}", self.kind, self.anchor)
    }
}
