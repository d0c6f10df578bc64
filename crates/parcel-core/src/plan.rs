//! Factory plan documents: the config plus every grid cell, as JSON.

use serde::{Deserialize, Serialize};

use crate::cell::GridCell;
use crate::config::FactoryConfig;
use crate::grid::Grid;

/// Suggested file name for saved plans.
pub const PLAN_FILE_NAME: &str = "factory-plan.json";

/// Errors from reading or writing plan documents.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The text is not JSON at all.
    #[error("Error parsing JSON file: {detail}")]
    Parse { detail: String },

    /// Valid JSON, but `config` or `cells` is missing.
    #[error("Invalid factory plan format")]
    InvalidFormat,

    /// `config` and `cells` exist but do not describe a plan.
    #[error("Malformed factory plan: {detail}")]
    Malformed { detail: String },

    #[error("serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[cfg(feature = "plan-io")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Serializable snapshot of a config and its full cell grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryPlan {
    pub config: FactoryConfig,
    pub cells: Vec<GridCell>,
}

impl FactoryPlan {
    /// Flatten `grid` (bottom row first) alongside `config`.
    pub fn from_grid(config: &FactoryConfig, grid: &Grid) -> Self {
        Self {
            config: config.clone(),
            cells: grid.cells().to_vec(),
        }
    }

    /// Rebuild a grid shaped by `config` (normally the editor's current
    /// config, not the one stored in the plan).
    pub fn to_grid(&self, config: &FactoryConfig) -> Grid {
        Grid::from_plan_cells(config, &self.cells)
    }

    /// Pretty-printed JSON, as offered for download.
    pub fn to_json(&self) -> Result<String, PlanError> {
        serde_json::to_string_pretty(self).map_err(PlanError::Serialize)
    }

    /// Parse a plan document, checking that `config` and `cells` are present.
    pub fn from_json(text: &str) -> Result<Self, PlanError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| PlanError::Parse {
                detail: e.to_string(),
            })?;

        let present = |key: &str| value.get(key).is_some_and(|v| !v.is_null());
        if !present("config") || !present("cells") {
            return Err(PlanError::InvalidFormat);
        }

        serde_json::from_value(value).map_err(|e| PlanError::Malformed {
            detail: e.to_string(),
        })
    }

    /// Write the plan as pretty JSON to `path`.
    #[cfg(feature = "plan-io")]
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), PlanError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read and validate a plan from `path`.
    #[cfg(feature = "plan-io")]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, PlanError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
