pub mod config;
pub mod error;
pub mod types;

pub use config::{config, set_config, LayoutConfig, DEFAULT_BOARD_SIZE};
pub use error::{LayoutError, PlacementConflict, Result};
pub use types::Position;
