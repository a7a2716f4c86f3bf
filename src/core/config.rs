//! Layout configuration with documented defaults
//!
//! Board geometry and planner limits live here so the external search driver
//! can tune them once at process start.

use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::core::error::{LayoutError, Result};

/// Side length of the square board used by the original furnace layouts
pub const DEFAULT_BOARD_SIZE: i32 = 18;

/// Configuration for the placement core
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Side length `N` of the square board (cells)
    ///
    /// Every legally occupied cell satisfies `0 <= row < N` and `0 <= col < N`.
    /// Must fit at least one 3x3 primary structure.
    pub board_size: i32,

    /// Maximum number of search expansions the mandatory planner may spend
    ///
    /// `None` lets the planner run to completion (success or proven
    /// infeasibility). A driver exploring many layouts can cap it to bound
    /// the cost of pathological arrangements.
    pub planner_budget: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            planner_budget: None,
        }
    }
}

impl LayoutConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.board_size < 3 {
            return Err(LayoutError::Config(format!(
                "board_size ({}) must be at least 3",
                self.board_size
            )));
        }

        if self.board_size > 4096 {
            return Err(LayoutError::Config(format!(
                "board_size ({}) exceeds the supported maximum of 4096",
                self.board_size
            )));
        }

        if self.planner_budget == Some(0) {
            return Err(LayoutError::Config(
                "planner_budget must be positive when set".into(),
            ));
        }

        Ok(())
    }

    /// Parse and validate a config from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LayoutConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// === GLOBAL CONFIG ACCESS ===

static CONFIG: OnceLock<LayoutConfig> = OnceLock::new();

/// Get the global layout config (initializes with defaults if not set)
pub fn config() -> &'static LayoutConfig {
    CONFIG.get_or_init(LayoutConfig::default)
}

/// Set the global layout config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: LayoutConfig) -> std::result::Result<(), LayoutConfig> {
    CONFIG.set(config)
}
