//! The active placement tool chosen in the palette.

use serde::{Deserialize, Serialize};

use crate::cell::{Belt, BeltKind, CellContent, Scanner, ScannerKind};
use crate::rotation::Rotation;

/// Everything the palette can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Straight,
    CornerCw,
    CornerCcw,
    Loader,
    Unloader,
    StickerChecker,
    WeightScanner,
    SerialScanner,
    CountryScanner,
}

impl ToolKind {
    /// All tools in palette order.
    pub fn all() -> [ToolKind; 9] {
        [
            ToolKind::Straight,
            ToolKind::CornerCw,
            ToolKind::CornerCcw,
            ToolKind::Loader,
            ToolKind::Unloader,
            ToolKind::StickerChecker,
            ToolKind::WeightScanner,
            ToolKind::SerialScanner,
            ToolKind::CountryScanner,
        ]
    }

    pub fn as_belt(self) -> Option<BeltKind> {
        match self {
            ToolKind::Straight => Some(BeltKind::Straight),
            ToolKind::CornerCw => Some(BeltKind::CornerCw),
            ToolKind::CornerCcw => Some(BeltKind::CornerCcw),
            ToolKind::Loader => Some(BeltKind::Loader),
            ToolKind::Unloader => Some(BeltKind::Unloader),
            _ => None,
        }
    }

    pub fn as_scanner(self) -> Option<ScannerKind> {
        match self {
            ToolKind::StickerChecker => Some(ScannerKind::StickerChecker),
            ToolKind::WeightScanner => Some(ScannerKind::WeightScanner),
            ToolKind::SerialScanner => Some(ScannerKind::SerialScanner),
            ToolKind::CountryScanner => Some(ScannerKind::CountryScanner),
            _ => None,
        }
    }

    /// Swap corner handedness; every other tool is unchanged.
    pub fn mirrored(self) -> Self {
        match self {
            ToolKind::CornerCw => ToolKind::CornerCcw,
            ToolKind::CornerCcw => ToolKind::CornerCw,
            other => other,
        }
    }
}

/// The pending kind and facing applied on the next paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tool {
    pub kind: ToolKind,
    pub rotation: Rotation,
}

impl Tool {
    pub fn new(kind: ToolKind, rotation: Rotation) -> Self {
        Self { kind, rotation }
    }

    /// Cell content this tool places.
    pub fn placement(&self) -> CellContent {
        if let Some(kind) = self.kind.as_scanner() {
            CellContent::Scanner(Scanner {
                kind,
                rotation: self.rotation,
            })
        } else {
            let kind = self.kind.as_belt().unwrap_or(BeltKind::Straight);
            CellContent::Conveyor(Belt {
                kind,
                rotation: self.rotation,
            })
        }
    }
}
