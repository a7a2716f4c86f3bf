//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Largest coordinate magnitude a structure anchor may carry.
///
/// Keeps every derived footprint/range computation far away from `i32` overflow.
pub const COORD_LIMIT: i32 = 1 << 20;

/// Grid cell position
///
/// Ordering is row-major: rows compare first, then columns. All deterministic
/// iteration in the planner relies on this ordering.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Shift by a row/column delta
    #[inline]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// True when the position lies inside a square board of the given side
    #[inline]
    pub fn within_board(&self, board_size: i32) -> bool {
        (0..board_size).contains(&self.row) && (0..board_size).contains(&self.col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
