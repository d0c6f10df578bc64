//! Input event WASM exports: pointer, keyboard and toolbar actions.

use parcel_core::editor::{MirrorOutcome, RotateOutcome};
use parcel_core::position::GridPosition;

use crate::{
    RESULT_OK, RESULT_OUT_OF_BOUNDS, ffi_to_direction, ffi_to_tool_kind, with_editor,
};

// ---------------------------------------------------------------------------
// Toolbar
// ---------------------------------------------------------------------------

/// Select the tool at index `kind` (0 = straight .. 8 = country scanner).
/// The pending rotation is kept.
///
/// Returns [`RESULT_OK`], [`RESULT_OUT_OF_BOUNDS`] for an unknown index,
/// or [`RESULT_INVALID_HANDLE`](crate::RESULT_INVALID_HANDLE).
#[unsafe(no_mangle)]
pub extern "C" fn parcel_select_tool(handle: i32, kind: u32) -> i32 {
    with_editor(handle, |slot| match ffi_to_tool_kind(kind) {
        Some(kind) => {
            slot.editor.select_tool(kind);
            RESULT_OK
        }
        None => RESULT_OUT_OF_BOUNDS,
    })
}

/// Turn the pending tool by 90 degrees.
#[unsafe(no_mangle)]
pub extern "C" fn parcel_rotate_tool(handle: i32) -> i32 {
    with_editor(handle, |slot| {
        slot.editor.rotate_tool();
        RESULT_OK
    })
}

/// Swap the pending tool between the two corner kinds.
#[unsafe(no_mangle)]
pub extern "C" fn parcel_mirror_tool(handle: i32) -> i32 {
    with_editor(handle, |slot| {
        slot.editor.mirror_tool();
        RESULT_OK
    })
}

// ---------------------------------------------------------------------------
// Pointer
// ---------------------------------------------------------------------------

/// Primary button pressed on cell `(x, y)`: paint and start dragging.
#[unsafe(no_mangle)]
pub extern "C" fn parcel_pointer_down(handle: i32, x: i32, y: i32) -> i32 {
    with_editor(handle, |slot| {
        slot.editor.pointer_down(GridPosition::new(x, y));
        RESULT_OK
    })
}

/// Pointer entered cell `(x, y)`; paints while dragging.
#[unsafe(no_mangle)]
pub extern "C" fn parcel_pointer_enter(handle: i32, x: i32, y: i32) -> i32 {
    with_editor(handle, |slot| {
        slot.editor.pointer_enter(GridPosition::new(x, y));
        RESULT_OK
    })
}

/// Pointer left cell `(x, y)`.
#[unsafe(no_mangle)]
pub extern "C" fn parcel_pointer_leave(handle: i32, x: i32, y: i32) -> i32 {
    with_editor(handle, |slot| {
        slot.editor.pointer_leave(GridPosition::new(x, y));
        RESULT_OK
    })
}

/// Primary button released.
#[unsafe(no_mangle)]
pub extern "C" fn parcel_pointer_up(handle: i32) -> i32 {
    with_editor(handle, |slot| {
        slot.editor.pointer_up();
        RESULT_OK
    })
}

/// Pointer left the grid container.
#[unsafe(no_mangle)]
pub extern "C" fn parcel_leave_grid(handle: i32) -> i32 {
    with_editor(handle, |slot| {
        slot.editor.leave_grid();
        RESULT_OK
    })
}

/// Context menu on cell `(x, y)` at host time `now_ms`.
///
/// Writes what happened to `*out_outcome`: 0 = cell rotated, 1 = tool
/// rotated, 2 = debounced. Returns [`RESULT_OUT_OF_BOUNDS`] for cells
/// outside the grid.
///
/// # Safety
///
/// `out_outcome` must be null or a valid, aligned pointer to a `u32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_context_menu(
    handle: i32,
    x: i32,
    y: i32,
    now_ms: u64,
    out_outcome: *mut u32,
) -> i32 {
    with_editor(handle, |slot| {
        let outcome = match slot.editor.rotate_cell(GridPosition::new(x, y), now_ms) {
            RotateOutcome::Cell => 0,
            RotateOutcome::Tool => 1,
            RotateOutcome::Debounced => 2,
            RotateOutcome::OutOfBounds => return RESULT_OUT_OF_BOUNDS,
        };
        if !out_outcome.is_null() {
            unsafe { *out_outcome = outcome };
        }
        RESULT_OK
    })
}

/// Mirror the corner belt on `(x, y)`, or the pending tool if there is none.
///
/// Writes 0 (cell mirrored) or 1 (tool mirrored) to `*out_outcome`.
///
/// # Safety
///
/// `out_outcome` must be null or a valid, aligned pointer to a `u32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_mirror_cell(
    handle: i32,
    x: i32,
    y: i32,
    out_outcome: *mut u32,
) -> i32 {
    with_editor(handle, |slot| {
        let outcome = match slot.editor.mirror_cell(GridPosition::new(x, y)) {
            MirrorOutcome::Cell => 0,
            MirrorOutcome::Tool => 1,
            MirrorOutcome::OutOfBounds => return RESULT_OUT_OF_BOUNDS,
        };
        if !out_outcome.is_null() {
            unsafe { *out_outcome = outcome };
        }
        RESULT_OK
    })
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

/// Enter or leave edit mode. Writes 1 to `*out_edit_mode` when edit mode
/// is now on, 0 otherwise.
///
/// # Safety
///
/// `out_edit_mode` must be null or a valid, aligned pointer to a `u32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_toggle_edit_mode(handle: i32, out_edit_mode: *mut u32) -> i32 {
    with_editor(handle, |slot| {
        let on = slot.editor.toggle_edit_mode();
        if !out_edit_mode.is_null() {
            unsafe { *out_edit_mode = u32::from(on) };
        }
        RESULT_OK
    })
}

/// Move the edit cursor: 0 = up, 1 = right, 2 = down, 3 = left.
#[unsafe(no_mangle)]
pub extern "C" fn parcel_move_cursor(handle: i32, direction: u32) -> i32 {
    with_editor(handle, |slot| match ffi_to_direction(direction) {
        Some(dir) => {
            slot.editor.move_cursor(dir);
            RESULT_OK
        }
        None => RESULT_OUT_OF_BOUNDS,
    })
}

/// Undo the most recent change. Writes 1 to `*out_undone` if a snapshot
/// was restored, 0 if the history was empty.
///
/// # Safety
///
/// `out_undone` must be null or a valid, aligned pointer to a `u32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_undo(handle: i32, out_undone: *mut u32) -> i32 {
    with_editor(handle, |slot| {
        let undone = slot.editor.undo();
        if !out_undone.is_null() {
            unsafe { *out_undone = u32::from(undone) };
        }
        RESULT_OK
    })
}

/// Reset every non-blocked cell to empty.
#[unsafe(no_mangle)]
pub extern "C" fn parcel_clear(handle: i32) -> i32 {
    with_editor(handle, |slot| {
        slot.editor.clear();
        RESULT_OK
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{parcel_cell_at, parcel_undo_depth};
    use crate::test_support::{cleanup, create_small};
    use crate::{FlatCell, RESULT_INVALID_HANDLE};

    fn cell(h: i32, x: i32, y: i32) -> FlatCell {
        let mut out = FlatCell::default();
        assert_eq!(unsafe { parcel_cell_at(h, x, y, &mut out) }, RESULT_OK);
        out
    }

    fn depth(h: i32) -> u32 {
        let mut out = 0;
        assert_eq!(unsafe { parcel_undo_depth(h, &mut out) }, RESULT_OK);
        out
    }

    #[test]
    fn drag_paints_and_undo_reverts() {
        cleanup();
        let h = create_small();
        assert_eq!(parcel_select_tool(h, 6), RESULT_OK); // weight scanner
        parcel_pointer_down(h, 1, 1);
        parcel_pointer_enter(h, 2, 1);
        parcel_pointer_up(h);
        parcel_pointer_enter(h, 3, 1);

        assert_eq!(cell(h, 1, 1).cell_type, 3);
        assert_eq!(cell(h, 2, 1).kind, 6);
        assert_eq!(cell(h, 3, 1).cell_type, 0);
        assert_eq!(depth(h), 2);

        let mut undone = 0;
        unsafe { parcel_undo(h, &mut undone) };
        assert_eq!(undone, 1);
        assert_eq!(cell(h, 2, 1).cell_type, 0);
        cleanup();
    }

    #[test]
    fn context_menu_rotates_and_debounces() {
        cleanup();
        let h = create_small();
        parcel_pointer_down(h, 0, 0);
        parcel_pointer_up(h);

        let mut outcome = u32::MAX;
        unsafe { parcel_context_menu(h, 0, 0, 1_000, &mut outcome) };
        assert_eq!(outcome, 0);
        assert_eq!(cell(h, 0, 0).rotation, 45);

        unsafe { parcel_context_menu(h, 0, 0, 1_100, &mut outcome) };
        assert_eq!(outcome, 2);
        assert_eq!(cell(h, 0, 0).rotation, 45);

        unsafe { parcel_context_menu(h, 4, 4, 1_100, &mut outcome) };
        assert_eq!(outcome, 1);

        let code = unsafe { parcel_context_menu(h, 99, 0, 5_000, std::ptr::null_mut()) };
        assert_eq!(code, RESULT_OUT_OF_BOUNDS);
        cleanup();
    }

    #[test]
    fn mirror_cell_swaps_corner() {
        cleanup();
        let h = create_small();
        parcel_select_tool(h, 1); // corner_cw
        parcel_pointer_down(h, 2, 2);
        parcel_pointer_up(h);

        let mut outcome = u32::MAX;
        unsafe { parcel_mirror_cell(h, 2, 2, &mut outcome) };
        assert_eq!(outcome, 0);
        assert_eq!(cell(h, 2, 2).kind, 2);
        cleanup();
    }

    #[test]
    fn edit_mode_blocks_painting() {
        cleanup();
        let h = create_small();
        let mut on = 0;
        unsafe { parcel_toggle_edit_mode(h, &mut on) };
        assert_eq!(on, 1);
        assert_eq!(parcel_move_cursor(h, 1), RESULT_OK);
        assert_eq!(parcel_move_cursor(h, 7), RESULT_OUT_OF_BOUNDS);
        parcel_pointer_down(h, 1, 1);
        assert_eq!(cell(h, 1, 1).cell_type, 0);
        assert_eq!(depth(h), 0);
        cleanup();
    }

    #[test]
    fn clear_records_history() {
        cleanup();
        let h = create_small();
        parcel_pointer_down(h, 0, 0);
        parcel_pointer_up(h);
        assert_eq!(parcel_clear(h), RESULT_OK);
        assert_eq!(cell(h, 0, 0).cell_type, 0);
        assert_eq!(depth(h), 2);
        cleanup();
    }

    #[test]
    fn unknown_tool_and_dead_handle() {
        cleanup();
        let h = create_small();
        assert_eq!(parcel_select_tool(h, 9), RESULT_OUT_OF_BOUNDS);
        assert_eq!(parcel_rotate_tool(7), RESULT_INVALID_HANDLE);
        assert_eq!(parcel_pointer_up(-3), RESULT_INVALID_HANDLE);
        cleanup();
    }
}
