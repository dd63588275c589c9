//! Session configuration.

use crate::error::{GridError, GridResult};
use crate::grid::DEFAULT_CELL_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default cap on `rows * cols` for interactively created grids.
pub const DEFAULT_MAX_CELLS: u64 = 10_000;

/// Tunables for an editing session. Every field has a default, so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Cell edge length in pixels.
    pub cell_size: u32,
    /// Maximum distance in pixels between a click and a shape it selects.
    pub click_tolerance: f64,
    /// Seed for shape placement. Random when absent.
    pub seed: Option<u64>,
    /// Largest grid, in cells, the shell accepts at its size prompt.
    pub max_cells: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            click_tolerance: f64::from(DEFAULT_CELL_SIZE) / 2.0,
            seed: None,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> GridResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GridError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> GridResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            GridError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    fn validate(&self) -> GridResult<()> {
        if self.cell_size == 0 {
            return Err(GridError::Config("cell_size must be positive".to_string()));
        }
        if !self.click_tolerance.is_finite() || self.click_tolerance < 0.0 {
            return Err(GridError::Config(
                "click_tolerance must be a non-negative number".to_string(),
            ));
        }
        if self.max_cells == 0 {
            return Err(GridError::Config("max_cells must be positive".to_string()));
        }
        Ok(())
    }

    /// Reject a `rows` x `cols` grid larger than [`EditorConfig::max_cells`].
    pub fn check_grid_size(&self, rows: i64, cols: i64) -> GridResult<()> {
        let cells = rows.unsigned_abs().saturating_mul(cols.unsigned_abs());
        if cells > self.max_cells {
            return Err(GridError::InvalidDimension(format!(
                "{rows}x{cols} grid has {cells} cells, the limit is {}",
                self.max_cells
            )));
        }
        Ok(())
    }
}
