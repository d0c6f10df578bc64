//! Interactive builder for `factory_config.json` layouts.

use serde::{Deserialize, Serialize};

use crate::config::{FactoryConfig, OutputDock};
use crate::plan::PlanError;
use crate::position::GridPosition;

/// Suggested file name for saved configs.
pub const CONFIG_FILE_NAME: &str = "factory_config.json";

/// What a left click places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatorTool {
    #[default]
    Truck,
    Output,
    Blocked,
    Eraser,
}

/// Editable config under construction.
///
/// Positions are not bounds-checked: trucks and docks normally live in the
/// margin ring around the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigCreator {
    pub width: u32,
    pub height: u32,
    pub tool: CreatorTool,
    /// Comma-separated destinations for the next output dock.
    pub output_types: String,
    trucks: Vec<GridPosition>,
    outputs: Vec<OutputDock>,
    blocked: Vec<GridPosition>,
}

impl Default for ConfigCreator {
    fn default() -> Self {
        Self {
            width: 40,
            height: 20,
            tool: CreatorTool::Truck,
            output_types: "Plane".to_string(),
            trucks: Vec::new(),
            outputs: Vec::new(),
            blocked: Vec::new(),
        }
    }
}

impl ConfigCreator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing config.
    pub fn from_config(config: &FactoryConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            trucks: config.trucks.clone(),
            outputs: config.outputs.clone(),
            blocked: config.blocked.clone(),
            ..Self::default()
        }
    }

    pub fn trucks(&self) -> &[GridPosition] {
        &self.trucks
    }

    pub fn outputs(&self) -> &[OutputDock] {
        &self.outputs
    }

    pub fn blocked(&self) -> &[GridPosition] {
        &self.blocked
    }

    /// The output types field split on commas, each entry trimmed.
    pub fn parsed_output_types(&self) -> Vec<String> {
        self.output_types
            .split(',')
            .map(|s| s.trim().to_string())
            .collect()
    }

    /// Handle a click on `pos`. Right clicks always erase.
    pub fn click(&mut self, pos: GridPosition, right_click: bool) {
        if right_click || self.tool == CreatorTool::Eraser {
            self.erase(pos);
            return;
        }
        match self.tool {
            CreatorTool::Truck => {
                if !self.trucks.contains(&pos) {
                    self.trucks.push(pos);
                }
            }
            CreatorTool::Output => {
                if !self.outputs.iter().any(|o| o.position() == pos) {
                    let types = self.parsed_output_types();
                    self.outputs.push(OutputDock {
                        x: pos.x,
                        y: pos.y,
                        types,
                    });
                }
            }
            CreatorTool::Blocked => {
                if !self.blocked.contains(&pos) {
                    self.blocked.push(pos);
                }
            }
            CreatorTool::Eraser => {}
        }
    }

    /// Remove every truck, dock and block at `pos`.
    pub fn erase(&mut self, pos: GridPosition) {
        self.trucks.retain(|t| *t != pos);
        self.outputs.retain(|o| o.position() != pos);
        self.blocked.retain(|b| *b != pos);
    }

    pub fn clear_all(&mut self) {
        self.trucks.clear();
        self.outputs.clear();
        self.blocked.clear();
    }

    pub fn to_config(&self) -> FactoryConfig {
        FactoryConfig {
            width: self.width,
            height: self.height,
            trucks: self.trucks.clone(),
            outputs: self.outputs.clone(),
            blocked: self.blocked.clone(),
        }
    }

    /// Pretty JSON for [`CONFIG_FILE_NAME`].
    pub fn save_json(&self) -> Result<String, PlanError> {
        serde_json::to_string_pretty(&self.to_config()).map_err(PlanError::Serialize)
    }
}
