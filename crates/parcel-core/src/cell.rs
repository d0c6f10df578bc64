//! Grid cells and the belt/scanner descriptors they carry.

use serde::{Deserialize, Serialize};

use crate::position::GridPosition;
use crate::rotation::Rotation;

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// Conveyor segment kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeltKind {
    Straight,
    CornerCw,
    CornerCcw,
    Loader,
    Unloader,
}

impl BeltKind {
    pub fn is_corner(self) -> bool {
        matches!(self, BeltKind::CornerCw | BeltKind::CornerCcw)
    }

    /// Swap clockwise and counter-clockwise corners. Other kinds are unchanged.
    pub fn mirrored(self) -> Self {
        match self {
            BeltKind::CornerCw => BeltKind::CornerCcw,
            BeltKind::CornerCcw => BeltKind::CornerCw,
            other => other,
        }
    }
}

/// Inspection scanner kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScannerKind {
    StickerChecker,
    WeightScanner,
    SerialScanner,
    CountryScanner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Belt {
    pub kind: BeltKind,
    pub rotation: Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scanner {
    pub kind: ScannerKind,
    pub rotation: Rotation,
}

// ---------------------------------------------------------------------------
// Cell contents
// ---------------------------------------------------------------------------

/// The wire-level `type` tag of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    Empty,
    Conveyor,
    Blocked,
    Scanner,
}

/// What occupies a cell. Descriptors only exist on the variants that
/// own them, so a blocked or empty cell can never carry a belt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellContent {
    #[default]
    Empty,
    Blocked,
    Conveyor(Belt),
    Scanner(Scanner),
}

impl CellContent {
    pub fn cell_type(&self) -> CellType {
        match self {
            CellContent::Empty => CellType::Empty,
            CellContent::Blocked => CellType::Blocked,
            CellContent::Conveyor(_) => CellType::Conveyor,
            CellContent::Scanner(_) => CellType::Scanner,
        }
    }
}

/// A single addressable cell of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "RawCell", try_from = "RawCell")]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
    pub content: CellContent,
}

impl GridCell {
    pub fn new(x: i32, y: i32, content: CellContent) -> Self {
        Self { x, y, content }
    }

    pub fn empty(x: i32, y: i32) -> Self {
        Self::new(x, y, CellContent::Empty)
    }

    pub fn blocked(x: i32, y: i32) -> Self {
        Self::new(x, y, CellContent::Blocked)
    }

    pub fn position(&self) -> GridPosition {
        GridPosition::new(self.x, self.y)
    }

    pub fn cell_type(&self) -> CellType {
        self.content.cell_type()
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self.content, CellContent::Blocked)
    }

    /// Whether a belt or scanner sits here.
    pub fn is_occupied(&self) -> bool {
        matches!(
            self.content,
            CellContent::Conveyor(_) | CellContent::Scanner(_)
        )
    }

    pub fn belt(&self) -> Option<&Belt> {
        match &self.content {
            CellContent::Conveyor(belt) => Some(belt),
            _ => None,
        }
    }

    pub fn scanner(&self) -> Option<&Scanner> {
        match &self.content {
            CellContent::Scanner(scanner) => Some(scanner),
            _ => None,
        }
    }

    /// Turn the belt or scanner on this cell by 45 degrees.
    /// Returns `false` if there is nothing to rotate.
    pub fn rotate_45(&mut self) -> bool {
        match &mut self.content {
            CellContent::Conveyor(belt) => {
                belt.rotation = belt.rotation.rotate_45();
                true
            }
            CellContent::Scanner(scanner) => {
                scanner.rotation = scanner.rotation.rotate_45();
                true
            }
            _ => false,
        }
    }

    /// Swap a corner belt's handedness. Returns `false` for anything else.
    pub fn mirror_corner(&mut self) -> bool {
        match &mut self.content {
            CellContent::Conveyor(belt) if belt.kind.is_corner() => {
                belt.kind = belt.kind.mirrored();
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire form
// ---------------------------------------------------------------------------

/// Errors from converting a wire cell into a [`GridCell`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellError {
    #[error("cell ({x}, {y}) of type {cell_type:?} is missing its descriptor")]
    MissingDescriptor { x: i32, y: i32, cell_type: CellType },
    #[error("cell ({x}, {y}) of type {cell_type:?} carries a descriptor it cannot own")]
    UnexpectedDescriptor { x: i32, y: i32, cell_type: CellType },
}

/// `{x, y, type, belt?, scanner?}` as it appears in plan files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCell {
    x: i32,
    y: i32,
    #[serde(rename = "type")]
    cell_type: CellType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    belt: Option<Belt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scanner: Option<Scanner>,
}

impl From<GridCell> for RawCell {
    fn from(cell: GridCell) -> Self {
        RawCell {
            x: cell.x,
            y: cell.y,
            cell_type: cell.cell_type(),
            belt: cell.belt().copied(),
            scanner: cell.scanner().copied(),
        }
    }
}

impl TryFrom<RawCell> for GridCell {
    type Error = CellError;

    fn try_from(raw: RawCell) -> Result<Self, Self::Error> {
        let RawCell {
            x,
            y,
            cell_type,
            belt,
            scanner,
        } = raw;
        let content = match (cell_type, belt, scanner) {
            (CellType::Empty, None, None) => CellContent::Empty,
            (CellType::Blocked, None, None) => CellContent::Blocked,
            (CellType::Conveyor, Some(belt), None) => CellContent::Conveyor(belt),
            (CellType::Scanner, None, Some(scanner)) => CellContent::Scanner(scanner),
            (CellType::Conveyor, None, _) | (CellType::Scanner, _, None) => {
                return Err(CellError::MissingDescriptor { x, y, cell_type });
            }
            _ => return Err(CellError::UnexpectedDescriptor { x, y, cell_type }),
        };
        Ok(GridCell { x, y, content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner(kind: BeltKind) -> GridCell {
        GridCell::new(
            1,
            2,
            CellContent::Conveyor(Belt {
                kind,
                rotation: Rotation::Deg90,
            }),
        )
    }

    #[test]
    fn empty_cell_wire_form_has_no_descriptors() {
        let json = serde_json::to_value(GridCell::empty(3, 4)).unwrap();
        assert_eq!(json, serde_json::json!({"x": 3, "y": 4, "type": "empty"}));
    }

    #[test]
    fn conveyor_wire_form() {
        let json = serde_json::to_value(corner(BeltKind::CornerCw)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "x": 1, "y": 2, "type": "conveyor",
                "belt": {"kind": "corner_cw", "rotation": 90}
            })
        );
    }

    #[test]
    fn scanner_parses_from_wire() {
        let cell: GridCell = serde_json::from_str(
            r#"{"x":5,"y":5,"type":"scanner","scanner":{"kind":"sticker_checker","rotation":315}}"#,
        )
        .unwrap();
        assert_eq!(
            cell.scanner(),
            Some(&Scanner {
                kind: ScannerKind::StickerChecker,
                rotation: Rotation::Deg315,
            })
        );
        assert!(cell.belt().is_none());
    }

    #[test]
    fn conveyor_without_belt_is_rejected() {
        let result = serde_json::from_str::<GridCell>(r#"{"x":0,"y":0,"type":"conveyor"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn blocked_with_belt_is_rejected() {
        let err = GridCell::try_from(RawCell {
            x: 0,
            y: 0,
            cell_type: CellType::Blocked,
            belt: Some(Belt {
                kind: BeltKind::Straight,
                rotation: Rotation::Deg0,
            }),
            scanner: None,
        })
        .unwrap_err();
        assert!(matches!(err, CellError::UnexpectedDescriptor { .. }));
    }

    #[test]
    fn mirror_twice_is_identity() {
        let mut cell = corner(BeltKind::CornerCw);
        assert!(cell.mirror_corner());
        assert_eq!(cell.belt().unwrap().kind, BeltKind::CornerCcw);
        assert!(cell.mirror_corner());
        assert_eq!(cell.belt().unwrap().kind, BeltKind::CornerCw);
    }

    #[test]
    fn mirror_ignores_straight_belts() {
        let mut cell = corner(BeltKind::Straight);
        assert!(!cell.mirror_corner());
        assert_eq!(cell.belt().unwrap().kind, BeltKind::Straight);
    }

    #[test]
    fn rotate_empty_cell_is_noop() {
        let mut cell = GridCell::empty(0, 0);
        assert!(!cell.rotate_45());
        assert_eq!(cell, GridCell::empty(0, 0));
    }
}
