//! Plan save/load WASM exports.

use tracing::debug;

use crate::{
    RESULT_INTERNAL_ERROR, RESULT_OK, plan_error_code, read_utf8, with_editor, write_bytes,
};

/// Write the current plan as pretty JSON into the caller buffer at
/// `out_ptr` (capacity `out_len` bytes). The byte count is written to
/// `*out_written_ptr`, including when the buffer is too small, so the host
/// can retry with a larger buffer.
///
/// Returns [`RESULT_OK`], [`RESULT_BUFFER_TOO_SMALL`](crate::RESULT_BUFFER_TOO_SMALL)
/// or [`RESULT_INTERNAL_ERROR`].
///
/// # Safety
///
/// `out_ptr` must point to a valid byte buffer of at least `out_len` bytes.
/// `out_written_ptr` must be a valid, aligned pointer to an `i32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_save_json(
    handle: i32,
    out_ptr: *mut u8,
    out_len: i32,
    out_written_ptr: *mut i32,
) -> i32 {
    with_editor(handle, |slot| match slot.editor.save_json() {
        Ok(json) => unsafe { write_bytes(json.as_bytes(), out_ptr, out_len, out_written_ptr) },
        Err(e) => slot.fail(RESULT_INTERNAL_ERROR, e.to_string()),
    })
}

/// Import a plan document from the bytes at `data_ptr` (length `data_len`).
///
/// On success the grid is replaced (after an undo snapshot) and the last
/// error is cleared. On failure the grid is untouched and the user-facing
/// message is available through `parcel_last_error`.
///
/// Returns [`RESULT_OK`], [`RESULT_PARSE_ERROR`](crate::RESULT_PARSE_ERROR)
/// for text that is not JSON, or [`RESULT_FORMAT_ERROR`](crate::RESULT_FORMAT_ERROR)
/// for JSON that is not a factory plan.
///
/// # Safety
///
/// `data_ptr` must point to at least `data_len` valid bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_import_json(handle: i32, data_ptr: *const u8, data_len: i32) -> i32 {
    with_editor(handle, |slot| {
        let text = match unsafe { read_utf8(data_ptr, data_len) } {
            Ok(text) => text,
            Err(code) => return slot.fail(code, "Error parsing JSON file: invalid UTF-8"),
        };
        match slot.editor.import_json(text) {
            Ok(()) => {
                slot.last_error = None;
                debug!(handle, "plan imported through wasm");
                RESULT_OK
            }
            Err(e) => slot.fail(plan_error_code(&e), e.to_string()),
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
