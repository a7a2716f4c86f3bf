//! Cell geometry, dense grids and the interaction predicate

pub mod footprint;
pub mod grid;
pub mod interaction;

pub use footprint::{footprint_of, range_of, CellRect, Zone};
pub use grid::Grid;
pub use interaction::{interacts, overlaps};
