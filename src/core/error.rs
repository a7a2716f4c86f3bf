use thiserror::Error;

use crate::core::types::Position;
use crate::structure::Structure;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Why a structure could not be added to a layout
///
/// Always names the first offending footprint cell in row-major order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementConflict {
    #[error("{structure} leaves the board at {cell}")]
    OutOfBounds { structure: Structure, cell: Position },

    #[error("{structure} overlaps {owner} at {cell}")]
    Occupied {
        structure: Structure,
        cell: Position,
        owner: Structure,
    },
}

impl PlacementConflict {
    /// The structure whose placement was rejected
    pub fn structure(&self) -> Structure {
        match self {
            PlacementConflict::OutOfBounds { structure, .. } => *structure,
            PlacementConflict::Occupied { structure, .. } => *structure,
        }
    }

    /// The cell that caused the rejection
    pub fn cell(&self) -> Position {
        match self {
            PlacementConflict::OutOfBounds { cell, .. } => *cell,
            PlacementConflict::Occupied { cell, .. } => *cell,
        }
    }
}
