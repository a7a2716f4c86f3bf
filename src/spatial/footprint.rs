//! Footprint and range geometry
//!
//! Pure functions of (kind, anchor). Nothing here knows about the board, so
//! returned cells may lie outside it; the layout rejects those on placement.

use serde::{Deserialize, Serialize};

use crate::core::types::Position;
use crate::structure::kind::{Reach, StructureKind};

/// Inclusive axis-aligned rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    pub min: Position,
    pub max: Position,
}

impl CellRect {
    /// Rectangle of `height x width` cells whose top-left cell is `origin`
    pub fn from_origin(origin: Position, height: i32, width: i32) -> Self {
        debug_assert!(height > 0 && width > 0);
        Self {
            min: origin,
            max: origin.offset(height - 1, width - 1),
        }
    }

    pub fn height(&self) -> i32 {
        self.max.row - self.min.row + 1
    }

    pub fn width(&self) -> i32 {
        self.max.col - self.min.col + 1
    }

    pub fn area(&self) -> usize {
        (self.height() * self.width()) as usize
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        (self.min.row..=self.max.row).contains(&pos.row)
            && (self.min.col..=self.max.col).contains(&pos.col)
    }

    /// True when the rectangles share at least one cell (closed boundaries)
    #[inline]
    pub fn intersects(&self, other: &CellRect) -> bool {
        self.min.row <= other.max.row
            && other.min.row <= self.max.row
            && self.min.col <= other.max.col
            && other.min.col <= self.max.col
    }

    /// Grow by a number of cells on each side
    pub fn grow(&self, up: i32, down: i32, left: i32, right: i32) -> Self {
        Self {
            min: self.min.offset(-up, -left),
            max: self.max.offset(down, right),
        }
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &CellRect) -> Self {
        Self {
            min: Position::new(
                self.min.row.min(other.min.row),
                self.min.col.min(other.min.col),
            ),
            max: Position::new(
                self.max.row.max(other.max.row),
                self.max.col.max(other.max.col),
            ),
        }
    }

    /// All cells in row-major order
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let (min, max) = (self.min, self.max);
        (min.row..=max.row)
            .flat_map(move |row| (min.col..=max.col).map(move |col| Position::new(row, col)))
    }
}

/// Zone of effect: a union of up to two rectangles
///
/// Plain footprints need one rectangle. Aprons add a strip to the footprint;
/// crosses use a horizontal and a vertical bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    primary: CellRect,
    secondary: Option<CellRect>,
}

impl Zone {
    pub fn rect(rect: CellRect) -> Self {
        Self {
            primary: rect,
            secondary: None,
        }
    }

    pub fn pair(primary: CellRect, secondary: CellRect) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn parts(&self) -> impl Iterator<Item = &CellRect> {
        std::iter::once(&self.primary).chain(self.secondary.as_ref())
    }

    /// Bounding rectangle of the whole zone
    pub fn bounds(&self) -> CellRect {
        match &self.secondary {
            Some(second) => self.primary.union(second),
            None => self.primary,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.parts().any(|part| part.contains(pos))
    }

    pub fn intersects(&self, rect: &CellRect) -> bool {
        self.parts().any(|part| part.intersects(rect))
    }

    /// Deduplicated cells in row-major order
    pub fn cells(&self) -> Vec<Position> {
        let mut cells: Vec<Position> = self.parts().flat_map(|part| part.cells()).collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }
}

/// Cells a structure of `kind` anchored at `anchor` occupies
///
/// The anchor is the top-left cell of the footprint.
pub fn footprint_of(kind: StructureKind, anchor: Position) -> CellRect {
    let (height, width) = kind.size();
    CellRect::from_origin(anchor, height, width)
}

/// Cells within the zone of effect of a structure
///
/// Always a superset of the footprint.
pub fn range_of(kind: StructureKind, anchor: Position) -> Zone {
    let footprint = footprint_of(kind, anchor);
    match kind.reach() {
        Reach::None => Zone::rect(footprint),
        Reach::Apron { depth, width } => Zone::pair(
            footprint,
            CellRect {
                min: Position::new(footprint.max.row + 1, footprint.min.col),
                max: Position::new(footprint.max.row + depth, footprint.min.col + width - 1),
            },
        ),
        Reach::Cross(arm) => Zone::pair(
            footprint.grow(0, 0, arm, arm),
            footprint.grow(arm, arm, 0, 0),
        ),
    }
}
