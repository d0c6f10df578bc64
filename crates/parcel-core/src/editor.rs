//! Grid editor state machine.
//!
//! An [`Editor`] owns the live grid, its undo history and the pointer /
//! keyboard input state. Every host event maps onto one method (or one
//! [`EditorAction`] passed to [`Editor::dispatch`]); all of them run to
//! completion synchronously.
//!
//! Input modes:
//!
//! - **Idle** -- pointer-down paints the cell under it and starts painting.
//! - **Painting** -- every cell the pointer enters is painted until the
//!   pointer is released or leaves the grid.
//! - **Edit** -- painting is suspended; arrow keys move a cursor.
//!
//! Every grid mutation first pushes a snapshot of the current grid onto
//! the history, so undo depth always equals the number of mutations, even
//! when a mutation leaves the grid visually unchanged.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FactoryConfig;
use crate::glow::{GlowEffect, GlowMap, all_scanner_glows};
use crate::grid::Grid;
use crate::history::History;
use crate::plan::{FactoryPlan, PlanError};
use crate::position::{Direction, GridPosition};
use crate::tool::{Tool, ToolKind};

/// Window in which repeated rotate requests on the same cell are ignored.
pub const ROTATE_DEBOUNCE_MS: u64 = 150;

/// Pointer/keyboard input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Idle,
    Painting,
    Edit,
}

/// Tunables for an editor instance. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub rotate_debounce_ms: u64,
    /// Maximum undo depth. `None` keeps every snapshot.
    pub history_capacity: Option<usize>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            rotate_debounce_ms: ROTATE_DEBOUNCE_MS,
            history_capacity: None,
        }
    }
}

/// What a rotate request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    /// The cell's belt or scanner turned by 45 degrees.
    Cell,
    /// The cell was empty or blocked; the tool turned by 90 degrees.
    Tool,
    /// Same cell again within the debounce window.
    Debounced,
    OutOfBounds,
}

/// What a mirror request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// A corner belt on the cell swapped handedness.
    Cell,
    /// No corner on the cell; the pending tool was mirrored instead.
    Tool,
    OutOfBounds,
}

/// Host input events, for reducer-style driving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    SelectTool(ToolKind),
    RotateTool,
    MirrorTool,
    PointerDown(GridPosition),
    PointerEnter(GridPosition),
    PointerLeave(GridPosition),
    PointerUp,
    LeaveGrid,
    ContextMenu { pos: GridPosition, now_ms: u64 },
    MirrorCell(GridPosition),
    ToggleEditMode,
    MoveCursor(Direction),
    Undo,
    Clear,
    Import(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RotateGuard {
    pos: GridPosition,
    at_ms: u64,
}

/// The editor: live grid, history and input state for one config.
#[derive(Debug, Clone)]
pub struct Editor {
    config: FactoryConfig,
    grid: Grid,
    history: History,
    tool: Tool,
    mode: InputMode,
    cursor: GridPosition,
    hovered: Option<GridPosition>,
    rotate_guard: Option<RotateGuard>,
    settings: EditorSettings,
}

impl Editor {
    pub fn new(config: FactoryConfig) -> Self {
        Self::with_settings(config, EditorSettings::default())
    }

    pub fn with_settings(config: FactoryConfig, settings: EditorSettings) -> Self {
        let grid = Grid::from_config(&config);
        let history = match settings.history_capacity {
            Some(cap) => History::with_capacity(cap),
            None => History::new(),
        };
        Self {
            config,
            grid,
            history,
            tool: Tool::default(),
            mode: InputMode::Idle,
            cursor: GridPosition::new(0, 0),
            hovered: None,
            rotate_guard: None,
            settings,
        }
    }

    // -- Accessors --

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_painting(&self) -> bool {
        self.mode == InputMode::Painting
    }

    pub fn is_edit_mode(&self) -> bool {
        self.mode == InputMode::Edit
    }

    /// Keyboard cursor position (meaningful in edit mode).
    pub fn cursor(&self) -> GridPosition {
        self.cursor
    }

    pub fn hovered(&self) -> Option<GridPosition> {
        self.hovered
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Every scanner glow on the current grid, unresolved.
    pub fn glows(&self) -> Vec<GlowEffect> {
        all_scanner_glows(&self.grid)
    }

    /// Glows resolved to one per visible cell.
    pub fn glow_map(&self) -> GlowMap {
        GlowMap::for_grid(&self.grid)
    }

    // -- Tool palette --

    /// Switch tool kind, keeping the pending rotation.
    pub fn select_tool(&mut self, kind: ToolKind) {
        self.tool.kind = kind;
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Turn the pending tool by 90 degrees.
    pub fn rotate_tool(&mut self) {
        self.tool.rotation = self.tool.rotation.rotate_90();
    }

    /// Swap the pending tool's corner handedness.
    pub fn mirror_tool(&mut self) {
        self.tool.kind = self.tool.kind.mirrored();
    }

    // -- Pointer input --

    /// Primary button pressed on a cell.
    pub fn pointer_down(&mut self, pos: GridPosition) {
        if self.mode == InputMode::Edit || !self.grid.contains(pos) {
            return;
        }
        self.mode = InputMode::Painting;
        self.apply_tool(pos);
    }

    /// Pointer moved onto a cell.
    pub fn pointer_enter(&mut self, pos: GridPosition) {
        if !self.grid.contains(pos) {
            return;
        }
        self.hovered = Some(pos);
        if self.mode == InputMode::Painting {
            self.apply_tool(pos);
        }
    }

    /// Pointer moved off a cell.
    pub fn pointer_leave(&mut self, pos: GridPosition) {
        if self.hovered == Some(pos) {
            self.hovered = None;
        }
    }

    /// Primary button released anywhere.
    pub fn pointer_up(&mut self) {
        if self.mode == InputMode::Painting {
            self.mode = InputMode::Idle;
        }
    }

    /// Pointer left the grid entirely.
    pub fn leave_grid(&mut self) {
        self.hovered = None;
        self.pointer_up();
    }

    // -- Mutations --

    /// Place the active tool on `pos`.
    ///
    /// No-op (and no history entry) outside the grid, on blocked cells and
    /// in edit mode. Returns whether the grid was mutated.
    pub fn apply_tool(&mut self, pos: GridPosition) -> bool {
        if self.mode == InputMode::Edit {
            return false;
        }
        match self.grid.get(pos) {
            Some(cell) if !cell.is_blocked() => {}
            _ => return false,
        }
        self.snapshot();
        let content = self.tool.placement();
        if let Some(cell) = self.grid.get_mut(pos) {
            cell.content = content;
        }
        true
    }

    /// Right-click on `pos` at host time `now_ms`.
    ///
    /// Turns an occupied cell by 45 degrees, otherwise turns the pending
    /// tool by 90 degrees. A second request for the same cell inside the
    /// debounce window is dropped.
    pub fn rotate_cell(&mut self, pos: GridPosition, now_ms: u64) -> RotateOutcome {
        let Some(cell) = self.grid.get(pos) else {
            return RotateOutcome::OutOfBounds;
        };
        if let Some(guard) = self.rotate_guard
            && guard.pos == pos
            && now_ms.saturating_sub(guard.at_ms) < self.settings.rotate_debounce_ms
        {
            return RotateOutcome::Debounced;
        }
        self.rotate_guard = Some(RotateGuard { pos, at_ms: now_ms });

        if cell.is_occupied() {
            self.snapshot();
            if let Some(cell) = self.grid.get_mut(pos) {
                cell.rotate_45();
            }
            RotateOutcome::Cell
        } else {
            self.rotate_tool();
            RotateOutcome::Tool
        }
    }

    /// Mirror the corner belt on `pos`, or the pending tool if there is none.
    pub fn mirror_cell(&mut self, pos: GridPosition) -> MirrorOutcome {
        let Some(cell) = self.grid.get(pos) else {
            return MirrorOutcome::OutOfBounds;
        };
        let is_corner = cell.belt().is_some_and(|b| b.kind.is_corner());
        if is_corner {
            self.snapshot();
            if let Some(cell) = self.grid.get_mut(pos) {
                cell.mirror_corner();
            }
            MirrorOutcome::Cell
        } else {
            self.mirror_tool();
            MirrorOutcome::Tool
        }
    }

    /// Reset every non-blocked cell to empty.
    pub fn clear(&mut self) {
        self.snapshot();
        self.grid.clear_placements();
        debug!(
            history = self.history.len(),
            snapshots = self.history.total_taken(),
            "grid cleared"
        );
    }

    /// Restore the most recent snapshot. Returns `false` if there was none.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.grid = previous;
                debug!(history = self.history.len(), "undo");
                true
            }
            None => false,
        }
    }

    fn snapshot(&mut self) {
        self.history.push(&self.grid);
    }

    // -- Edit mode --

    /// Enter or leave edit mode. Entering cancels any paint in progress.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.mode = match self.mode {
            InputMode::Edit => InputMode::Idle,
            InputMode::Idle | InputMode::Painting => InputMode::Edit,
        };
        self.is_edit_mode()
    }

    /// Move the edit cursor one cell, clamped to the grid. Ignored outside
    /// edit mode.
    pub fn move_cursor(&mut self, dir: Direction) {
        if self.mode != InputMode::Edit {
            return;
        }
        self.cursor = self
            .cursor
            .step(dir)
            .clamped(self.grid.width(), self.grid.height());
    }

    // -- Save / load --

    pub fn to_plan(&self) -> FactoryPlan {
        FactoryPlan::from_grid(&self.config, &self.grid)
    }

    /// The current plan as pretty JSON.
    pub fn save_json(&self) -> Result<String, PlanError> {
        self.to_plan().to_json()
    }

    /// Replace the grid with `plan`'s cells, laid out on this editor's config.
    pub fn import_plan(&mut self, plan: &FactoryPlan) {
        let grid = plan.to_grid(&self.config);
        self.snapshot();
        self.grid = grid;
        debug!(
            cells = plan.cells.len(),
            history = self.history.len(),
            snapshots = self.history.total_taken(),
            "plan imported"
        );
    }

    /// Parse and import a plan document. On error the grid and history
    /// are left untouched.
    pub fn import_json(&mut self, text: &str) -> Result<(), PlanError> {
        let plan = FactoryPlan::from_json(text).inspect_err(|e| {
            tracing::warn!(error = %e, "plan import rejected");
        })?;
        self.import_plan(&plan);
        Ok(())
    }

    // -- Reducer --

    /// Apply one host event. Only [`EditorAction::Import`] can fail.
    pub fn dispatch(&mut self, action: EditorAction) -> Result<(), PlanError> {
        match action {
            EditorAction::SelectTool(kind) => self.select_tool(kind),
            EditorAction::RotateTool => self.rotate_tool(),
            EditorAction::MirrorTool => self.mirror_tool(),
            EditorAction::PointerDown(pos) => self.pointer_down(pos),
            EditorAction::PointerEnter(pos) => self.pointer_enter(pos),
            EditorAction::PointerLeave(pos) => self.pointer_leave(pos),
            EditorAction::PointerUp => self.pointer_up(),
            EditorAction::LeaveGrid => self.leave_grid(),
            EditorAction::ContextMenu { pos, now_ms } => {
                self.rotate_cell(pos, now_ms);
            }
            EditorAction::MirrorCell(pos) => {
                self.mirror_cell(pos);
            }
            EditorAction::ToggleEditMode => {
                self.toggle_edit_mode();
            }
            EditorAction::MoveCursor(dir) => self.move_cursor(dir),
            EditorAction::Undo => {
                self.undo();
            }
            EditorAction::Clear => self.clear(),
            EditorAction::Import(text) => self.import_json(&text)?,
        }
        Ok(())
    }
}
