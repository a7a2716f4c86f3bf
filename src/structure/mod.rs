//! Structure kinds and placed structures

pub mod kind;
pub mod placed;

pub use kind::{Reach, Role, StructureKind};
pub use placed::Structure;
