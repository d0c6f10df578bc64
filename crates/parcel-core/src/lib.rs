//! Parcel Core -- the editing model behind the parcel factory planner.
//!
//! A factory plan is a bounded grid of cells on which the user places
//! conveyor belts (straight, corners, loaders, unloaders) and inspection
//! scanners, each facing one of eight directions. This crate holds
//! everything except the pixels:
//!
//! - [`config::FactoryConfig`] -- static layout: size, truck bays, output
//!   docks, blocked cells.
//! - [`grid::Grid`] / [`cell::GridCell`] -- the live cell grid.
//! - [`glow`] -- which neighbors each scanner routes parcels to.
//! - [`editor::Editor`] -- paint/rotate/mirror/clear/undo state machine.
//! - [`plan::FactoryPlan`] -- JSON save and load of a whole plan.
//! - [`layout`] -- responsive cell sizing and the visual grid with margins.
//! - [`config_creator::ConfigCreator`] -- builder for new layouts.
//!
//! # Coordinates
//!
//! Origin is bottom-left. Rotation `0` faces `+x`, and angles increase
//! counter-clockwise in 45 degree steps.
//!
//! ```rust,ignore
//! use parcel_core::prelude::*;
//!
//! let mut editor = Editor::new(config);
//! editor.select_tool(ToolKind::WeightScanner);
//! editor.pointer_down(GridPosition::new(5, 5));
//! editor.pointer_up();
//! let glows = editor.glows();
//! let json = editor.save_json()?;
//! ```

pub mod cell;
pub mod config;
pub mod config_creator;
pub mod editor;
pub mod glow;
pub mod grid;
pub mod history;
pub mod layout;
pub mod plan;
pub mod position;
pub mod rotation;
pub mod tool;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// Common imports for hosts driving an editor.
pub mod prelude {
    pub use crate::cell::{Belt, BeltKind, CellContent, CellType, GridCell, Scanner, ScannerKind};
    pub use crate::config::{ConfigError, FactoryConfig, OutputDock};
    pub use crate::editor::{Editor, EditorAction, EditorSettings, InputMode};
    pub use crate::glow::{GlowEffect, GlowMap, GlowType};
    pub use crate::grid::Grid;
    pub use crate::plan::{FactoryPlan, PlanError};
    pub use crate::position::{Direction, GridPosition};
    pub use crate::rotation::Rotation;
    pub use crate::tool::{Tool, ToolKind};
}
