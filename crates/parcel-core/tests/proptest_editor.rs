//! Property-based tests for the editor and scanner glows.
//!
//! Generates random edit sequences and checks undo depth, undo
//! restoration, and save/load invariants.

use parcel_core::glow::scanner_glows;
use parcel_core::prelude::*;
use parcel_core::test_utils::*;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_rotation() -> impl Strategy<Value = Rotation> {
    (0..8usize).prop_map(|i| Rotation::all()[i])
}

fn arb_tool_kind() -> impl Strategy<Value = ToolKind> {
    (0..9usize).prop_map(|i| ToolKind::all()[i])
}

fn arb_scanner_kind() -> impl Strategy<Value = ScannerKind> {
    prop_oneof![
        Just(ScannerKind::StickerChecker),
        Just(ScannerKind::WeightScanner),
        Just(ScannerKind::SerialScanner),
        Just(ScannerKind::CountryScanner),
    ]
}

/// Mutating operations on an 8x6 grid.
#[derive(Debug, Clone)]
enum EditOp {
    Paint(i32, i32, ToolKind, Rotation),
    Rotate(i32, i32),
    Mirror(i32, i32),
    Clear,
}

fn arb_edit_ops(max_ops: usize) -> impl Strategy<Value = Vec<EditOp>> {
    proptest::collection::vec(
        prop_oneof![
            4 => (0..8i32, 0..6i32, arb_tool_kind(), arb_rotation())
                .prop_map(|(x, y, k, r)| EditOp::Paint(x, y, k, r)),
            2 => (0..8i32, 0..6i32).prop_map(|(x, y)| EditOp::Rotate(x, y)),
            1 => (0..8i32, 0..6i32).prop_map(|(x, y)| EditOp::Mirror(x, y)),
            1 => Just(EditOp::Clear),
        ],
        1..=max_ops,
    )
}

/// Apply `op`, returning whether it was expected to push history.
fn apply(editor: &mut Editor, op: &EditOp, now_ms: u64) -> bool {
    match *op {
        EditOp::Paint(x, y, kind, rotation) => {
            editor.set_tool(Tool::new(kind, rotation));
            editor.apply_tool(GridPosition::new(x, y))
        }
        EditOp::Rotate(x, y) => {
            let pos = GridPosition::new(x, y);
            let occupied = editor.grid().get(pos).is_some_and(|c| c.is_occupied());
            editor.rotate_cell(pos, now_ms);
            occupied
        }
        EditOp::Mirror(x, y) => {
            let pos = GridPosition::new(x, y);
            let corner = editor
                .grid()
                .get(pos)
                .and_then(|c| c.belt())
                .is_some_and(|b| b.kind.is_corner());
            editor.mirror_cell(pos);
            corner
        }
        EditOp::Clear => {
            editor.clear();
            true
        }
    }
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Undo depth equals the number of mutations, and unwinding all of
    /// them restores the initial grid.
    #[test]
    fn undo_restores_initial_grid(ops in arb_edit_ops(40)) {
        let mut editor = Editor::new(config_with_blocked(&[(0, 0), (4, 3)]));
        let initial = editor.grid().clone();
        let mut expected_depth = 0;

        for (i, op) in ops.iter().enumerate() {
            // Space requests past the debounce window.
            if apply(&mut editor, op, i as u64 * 1_000) {
                expected_depth += 1;
            }
        }
        prop_assert_eq!(editor.history_len(), expected_depth);

        for _ in 0..expected_depth {
            prop_assert!(editor.undo());
        }
        prop_assert_eq!(editor.grid(), &initial);
        prop_assert!(!editor.undo());
    }

    /// Blocked cells never change, whatever is applied to them.
    #[test]
    fn blocked_cells_stay_blocked(ops in arb_edit_ops(40)) {
        let mut editor = Editor::new(config_with_blocked(&[(1, 1), (7, 5)]));
        for (i, op) in ops.iter().enumerate() {
            apply(&mut editor, op, i as u64 * 1_000);
        }
        for (x, y) in [(1, 1), (7, 5)] {
            let cell = editor.grid().get(GridPosition::new(x, y)).unwrap();
            prop_assert!(cell.is_blocked());
        }
    }

    /// Saving and importing reproduces the grid exactly.
    #[test]
    fn save_import_round_trip(ops in arb_edit_ops(30)) {
        let mut editor = Editor::new(config_with_blocked(&[(2, 2)]));
        for (i, op) in ops.iter().enumerate() {
            apply(&mut editor, op, i as u64 * 1_000);
        }
        let saved = editor.save_json().unwrap();
        let grid = editor.grid().clone();

        let mut fresh = Editor::new(config_with_blocked(&[(2, 2)]));
        fresh.import_json(&saved).unwrap();
        prop_assert_eq!(fresh.grid(), &grid);
        prop_assert_eq!(fresh.history_len(), 1);
    }

    /// Every scanner emits one invalid and one valid glow on adjacent
    /// cells, plus one straight-ahead no-sticker glow for sticker checkers.
    #[test]
    fn scanner_glow_shape(
        x in -50..50i32,
        y in -50..50i32,
        rotation in arb_rotation(),
        kind in arb_scanner_kind(),
    ) {
        let origin = GridPosition::new(x, y);
        let glows = scanner_glows(origin, rotation, kind);
        let count = |t: GlowType| glows.iter().filter(|g| g.kind == t).count();

        prop_assert_eq!(count(GlowType::Invalid), 1);
        prop_assert_eq!(count(GlowType::Valid), 1);
        let expected_no_sticker = usize::from(kind == ScannerKind::StickerChecker);
        prop_assert_eq!(count(GlowType::NoSticker), expected_no_sticker);
        for g in &glows {
            prop_assert_eq!(g.position().chebyshev_distance(&origin), 1);
        }
    }

    /// Eight 45 degree turns bring any cell back to where it started.
    #[test]
    fn eight_rotations_identity(kind in arb_tool_kind(), rotation in arb_rotation()) {
        let pos = GridPosition::new(3, 3);
        let mut editor = editor_with(small_config(), &[(3, 3, kind, rotation)]);
        let before = *editor.grid().get(pos).unwrap();
        for i in 0..8u64 {
            editor.rotate_cell(pos, i * 1_000);
        }
        prop_assert_eq!(editor.grid().get(pos).unwrap(), &before);
    }
}
