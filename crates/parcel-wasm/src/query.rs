//! Query WASM exports.

use parcel_core::editor::InputMode;
use parcel_core::position::GridPosition;

use crate::{
    FlatCell, FlatGlow, RESULT_BUFFER_TOO_SMALL, RESULT_INTERNAL_ERROR, RESULT_OK,
    RESULT_OUT_OF_BOUNDS, convert_cell, convert_glow, glow_type_to_ffi, tool_kind_to_ffi,
    with_editor, write_bytes,
};

/// Value written by [`parcel_glow_at`] for a cell without a glow.
pub const GLOW_NONE: u32 = 3;

/// Write the grid dimensions to `*out_width` / `*out_height`.
///
/// # Safety
///
/// Both pointers must be valid, aligned pointers to `u32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_grid_size(handle: i32, out_width: *mut u32, out_height: *mut u32) -> i32 {
    if out_width.is_null() || out_height.is_null() {
        return RESULT_INTERNAL_ERROR;
    }
    with_editor(handle, |slot| {
        let grid = slot.editor.grid();
        unsafe {
            *out_width = grid.width();
            *out_height = grid.height();
        }
        RESULT_OK
    })
}

/// Write the cell at `(x, y)` to `*out_cell`.
///
/// Returns [`RESULT_OUT_OF_BOUNDS`] for positions outside the grid.
///
/// # Safety
///
/// `out_cell` must be a valid, aligned pointer to a [`FlatCell`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_cell_at(handle: i32, x: i32, y: i32, out_cell: *mut FlatCell) -> i32 {
    if out_cell.is_null() {
        return RESULT_INTERNAL_ERROR;
    }
    with_editor(handle, |slot| match slot.editor.grid().get(GridPosition::new(x, y)) {
        Some(cell) => {
            unsafe { *out_cell = convert_cell(cell) };
            RESULT_OK
        }
        None => RESULT_OUT_OF_BOUNDS,
    })
}

/// Recompute every scanner glow and copy the [`FlatGlow`] records into the
/// caller buffer at `out_ptr` (capacity `out_len` bytes).
///
/// The total number of glows is written to `*out_count_ptr`. Glows may lie
/// outside the grid and may overlap; use [`parcel_glow_at`] for the
/// resolved glow of a single cell.
///
/// Returns [`RESULT_BUFFER_TOO_SMALL`] (with the count still written) if
/// the buffer cannot hold them all.
///
/// # Safety
///
/// `out_ptr` must point to a valid buffer of at least `out_len` bytes,
/// aligned for [`FlatGlow`]. `out_count_ptr` must be a valid, aligned
/// pointer to a `u32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_glows(
    handle: i32,
    out_ptr: *mut u8,
    out_len: i32,
    out_count_ptr: *mut u32,
) -> i32 {
    if out_ptr.is_null() || out_count_ptr.is_null() {
        return RESULT_INTERNAL_ERROR;
    }
    with_editor(handle, |slot| {
        slot.glow_cache.clear();
        slot.glow_cache
            .extend(slot.editor.glows().iter().map(convert_glow));

        let count = slot.glow_cache.len();
        unsafe { *out_count_ptr = count as u32 };

        let byte_count = count * std::mem::size_of::<FlatGlow>();
        if byte_count > usize::try_from(out_len).unwrap_or(0) {
            return RESULT_BUFFER_TOO_SMALL;
        }
        if byte_count > 0 {
            let src = slot.glow_cache.as_ptr() as *const u8;
            unsafe { std::ptr::copy_nonoverlapping(src, out_ptr, byte_count) };
        }
        RESULT_OK
    })
}

/// Write the resolved glow of cell `(x, y)` to `*out_kind`: 0 = invalid,
/// 1 = no sticker, 2 = valid, [`GLOW_NONE`] = no glow.
///
/// # Safety
///
/// `out_kind` must be a valid, aligned pointer to a `u32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_glow_at(handle: i32, x: i32, y: i32, out_kind: *mut u32) -> i32 {
    if out_kind.is_null() {
        return RESULT_INTERNAL_ERROR;
    }
    with_editor(handle, |slot| {
        let pos = GridPosition::new(x, y);
        if !slot.editor.grid().contains(pos) {
            return RESULT_OUT_OF_BOUNDS;
        }
        let kind = slot
            .editor
            .glow_map()
            .get(pos)
            .map_or(GLOW_NONE, glow_type_to_ffi);
        unsafe { *out_kind = kind };
        RESULT_OK
    })
}

/// Write the number of undo snapshots to `*out_depth`.
///
/// # Safety
///
/// `out_depth` must be a valid, aligned pointer to a `u32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_undo_depth(handle: i32, out_depth: *mut u32) -> i32 {
    if out_depth.is_null() {
        return RESULT_INTERNAL_ERROR;
    }
    with_editor(handle, |slot| {
        unsafe { *out_depth = slot.editor.history_len() as u32 };
        RESULT_OK
    })
}

/// Write the pending tool to `*out_kind` (tool index) and `*out_rotation`
/// (degrees).
///
/// # Safety
///
/// Both pointers must be valid, aligned pointers to `u32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_tool(handle: i32, out_kind: *mut u32, out_rotation: *mut u32) -> i32 {
    if out_kind.is_null() || out_rotation.is_null() {
        return RESULT_INTERNAL_ERROR;
    }
    with_editor(handle, |slot| {
        let tool = slot.editor.tool();
        unsafe {
            *out_kind = tool_kind_to_ffi(tool.kind);
            *out_rotation = u32::from(tool.rotation.degrees());
        }
        RESULT_OK
    })
}

/// Write the input mode (0 = idle, 1 = painting, 2 = edit) and the edit
/// cursor position.
///
/// # Safety
///
/// All pointers must be valid and aligned.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_input_state(
    handle: i32,
    out_mode: *mut u32,
    out_cursor_x: *mut i32,
    out_cursor_y: *mut i32,
) -> i32 {
    if out_mode.is_null() || out_cursor_x.is_null() || out_cursor_y.is_null() {
        return RESULT_INTERNAL_ERROR;
    }
    with_editor(handle, |slot| {
        let mode = match slot.editor.mode() {
            InputMode::Idle => 0,
            InputMode::Painting => 1,
            InputMode::Edit => 2,
        };
        let cursor = slot.editor.cursor();
        unsafe {
            *out_mode = mode;
            *out_cursor_x = cursor.x;
            *out_cursor_y = cursor.y;
        }
        RESULT_OK
    })
}

/// Copy the last user-facing error message (UTF-8) into the caller buffer.
/// Writes 0 bytes when there is none.
///
/// # Safety
///
/// `out_ptr` must point to a valid byte buffer of at least `out_len` bytes.
/// `out_written_ptr` must be a valid, aligned pointer to an `i32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_last_error(
    handle: i32,
    out_ptr: *mut u8,
    out_len: i32,
    out_written_ptr: *mut i32,
) -> i32 {
    with_editor(handle, |slot| {
        let message = slot.last_error.as_deref().unwrap_or_default();
        unsafe { write_bytes(message.as_bytes(), out_ptr, out_len, out_written_ptr) }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
