//! WASM bindings for the parcel factory planner.
//!
//! This crate exposes a C-compatible, integer-handle-based API over
//! [`parcel_core::editor::Editor`] instances, suitable for a JavaScript
//! host that owns the DOM and forwards pointer and keyboard events. The
//! same API also works as a plain `cdylib` on native targets.
//!
//! # Handle Table
//!
//! Editors are referenced by integer handles (indices into a fixed-size
//! handle table). Up to [`MAX_EDITORS`] editors may exist simultaneously.
//!
//! # Errors
//!
//! Every export returns one of the `RESULT_*` codes. When an operation is
//! rejected with a message the user should see (a bad import, for
//! example), the message is kept on the editor's slot and can be fetched
//! with `parcel_last_error`.

pub mod editor;
pub mod input;
pub mod plan;
pub mod query;

use std::cell::RefCell;

use parcel_core::cell::{BeltKind, CellContent, GridCell, ScannerKind};
use parcel_core::editor::Editor;
use parcel_core::glow::{GlowEffect, GlowType};
use parcel_core::plan::PlanError;
use parcel_core::position::Direction;
use parcel_core::tool::ToolKind;

// ---------------------------------------------------------------------------
// Result codes
// ---------------------------------------------------------------------------

/// Success.
pub const RESULT_OK: i32 = 0;
/// The editor handle is invalid.
pub const RESULT_INVALID_HANDLE: i32 = 1;
/// The input was not valid JSON (or not UTF-8).
pub const RESULT_PARSE_ERROR: i32 = 2;
/// Valid JSON that is not a factory plan or config.
pub const RESULT_FORMAT_ERROR: i32 = 3;
/// The coordinates or enum value are outside the accepted range.
pub const RESULT_OUT_OF_BOUNDS: i32 = 4;
/// The caller-provided buffer cannot hold the output.
pub const RESULT_BUFFER_TOO_SMALL: i32 = 5;
/// An internal error occurred (null pointer, serialization failure).
pub const RESULT_INTERNAL_ERROR: i32 = 6;

// ---------------------------------------------------------------------------
// Handle table
// ---------------------------------------------------------------------------

/// Maximum number of simultaneous editor instances.
pub const MAX_EDITORS: usize = 16;

/// Per-editor state held in the handle table.
pub struct EditorSlot {
    pub editor: Editor,
    pub glow_cache: Vec<FlatGlow>,
    pub last_error: Option<String>,
}

impl EditorSlot {
    fn new(editor: Editor) -> Self {
        Self {
            editor,
            glow_cache: Vec::new(),
            last_error: None,
        }
    }

    /// Remember `message` for the host and return `code`.
    fn fail(&mut self, code: i32, message: impl Into<String>) -> i32 {
        self.last_error = Some(message.into());
        code
    }
}

/// Flat, `repr(C)` glow record.
///
/// `kind`: 0 = invalid, 1 = no sticker, 2 = valid.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatGlow {
    pub x: i32,
    pub y: i32,
    pub kind: u32,
}

/// Flat, `repr(C)` cell record.
///
/// `cell_type`: 0 = empty, 1 = blocked, 2 = conveyor, 3 = scanner.
/// `kind` is the [`ToolKind`] index of the placed belt or scanner (0 for
/// empty and blocked cells); `rotation` is in degrees.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatCell {
    pub x: i32,
    pub y: i32,
    pub cell_type: u32,
    pub kind: u32,
    pub rotation: u32,
}

thread_local! {
    static HANDLE_TABLE: RefCell<Vec<Option<EditorSlot>>> = RefCell::new({
        let mut v = Vec::with_capacity(MAX_EDITORS);
        v.resize_with(MAX_EDITORS, || None);
        v
    });
}

/// Run a closure with mutable access to the handle table.
fn with_table<F, R>(f: F) -> R
where
    F: FnOnce(&mut Vec<Option<EditorSlot>>) -> R,
{
    HANDLE_TABLE.with(|table| f(&mut table.borrow_mut()))
}

/// Run a closure with mutable access to the [`EditorSlot`] at `handle`.
/// Returns [`RESULT_INVALID_HANDLE`] if the handle is out of range or empty.
fn with_editor<F>(handle: i32, f: F) -> i32
where
    F: FnOnce(&mut EditorSlot) -> i32,
{
    with_table(|table| {
        let Ok(idx) = usize::try_from(handle) else {
            return RESULT_INVALID_HANDLE;
        };
        match table.get_mut(idx).and_then(Option::as_mut) {
            Some(slot) => f(slot),
            None => RESULT_INVALID_HANDLE,
        }
    })
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn ffi_to_tool_kind(kind: u32) -> Option<ToolKind> {
    ToolKind::all().get(kind as usize).copied()
}

fn tool_kind_to_ffi(kind: ToolKind) -> u32 {
    ToolKind::all()
        .iter()
        .position(|k| *k == kind)
        .unwrap_or_default() as u32
}

/// 0 = up (+y), 1 = right, 2 = down, 3 = left.
fn ffi_to_direction(dir: u32) -> Option<Direction> {
    Direction::all().get(dir as usize).copied()
}

fn glow_type_to_ffi(kind: GlowType) -> u32 {
    match kind {
        GlowType::Invalid => 0,
        GlowType::NoSticker => 1,
        GlowType::Valid => 2,
    }
}

fn convert_glow(glow: &GlowEffect) -> FlatGlow {
    FlatGlow {
        x: glow.x,
        y: glow.y,
        kind: glow_type_to_ffi(glow.kind),
    }
}

fn belt_to_tool(kind: BeltKind) -> ToolKind {
    match kind {
        BeltKind::Straight => ToolKind::Straight,
        BeltKind::CornerCw => ToolKind::CornerCw,
        BeltKind::CornerCcw => ToolKind::CornerCcw,
        BeltKind::Loader => ToolKind::Loader,
        BeltKind::Unloader => ToolKind::Unloader,
    }
}

fn scanner_to_tool(kind: ScannerKind) -> ToolKind {
    match kind {
        ScannerKind::StickerChecker => ToolKind::StickerChecker,
        ScannerKind::WeightScanner => ToolKind::WeightScanner,
        ScannerKind::SerialScanner => ToolKind::SerialScanner,
        ScannerKind::CountryScanner => ToolKind::CountryScanner,
    }
}

fn convert_cell(cell: &GridCell) -> FlatCell {
    let (cell_type, kind, rotation) = match cell.content {
        CellContent::Empty => (0, 0, 0),
        CellContent::Blocked => (1, 0, 0),
        CellContent::Conveyor(belt) => (
            2,
            tool_kind_to_ffi(belt_to_tool(belt.kind)),
            u32::from(belt.rotation.degrees()),
        ),
        CellContent::Scanner(scanner) => (
            3,
            tool_kind_to_ffi(scanner_to_tool(scanner.kind)),
            u32::from(scanner.rotation.degrees()),
        ),
    };
    FlatCell {
        x: cell.x,
        y: cell.y,
        cell_type,
        kind,
        rotation,
    }
}

fn plan_error_code(err: &PlanError) -> i32 {
    match err {
        PlanError::Parse { .. } => RESULT_PARSE_ERROR,
        PlanError::InvalidFormat | PlanError::Malformed { .. } => RESULT_FORMAT_ERROR,
        _ => RESULT_INTERNAL_ERROR,
    }
}

/// Borrow `len` bytes at `ptr` as UTF-8 text.
///
/// # Safety
///
/// `ptr` must point to at least `len` valid bytes that outlive the
/// returned slice.
unsafe fn read_utf8<'a>(ptr: *const u8, len: i32) -> Result<&'a str, i32> {
    let Ok(len) = usize::try_from(len) else {
        return Err(RESULT_INTERNAL_ERROR);
    };
    if ptr.is_null() {
        return Err(RESULT_INTERNAL_ERROR);
    }
    let bytes = unsafe { std::slice::from_raw_parts(ptr, len) };
    std::str::from_utf8(bytes).map_err(|_| RESULT_PARSE_ERROR)
}

/// Copy `data` into the caller buffer and store the byte count.
///
/// # Safety
///
/// `out_ptr` must point to at least `out_len` writable bytes and
/// `out_written_ptr` must be a valid, aligned pointer to an `i32`.
unsafe fn write_bytes(data: &[u8], out_ptr: *mut u8, out_len: i32, out_written_ptr: *mut i32) -> i32 {
    if out_ptr.is_null() || out_written_ptr.is_null() {
        return RESULT_INTERNAL_ERROR;
    }
    // Report the required size even when the buffer is too small.
    unsafe { *out_written_ptr = data.len() as i32 };
    if data.len() > usize::try_from(out_len).unwrap_or(0) {
        return RESULT_BUFFER_TOO_SMALL;
    }
    unsafe { std::ptr::copy_nonoverlapping(data.as_ptr(), out_ptr, data.len()) };
    RESULT_OK
}

// ---------------------------------------------------------------------------
// Linear-memory allocator exports
// ---------------------------------------------------------------------------

/// Allocate `size` bytes aligned to `align` in the WASM linear memory.
/// Returns a pointer to the allocated region, or null on failure.
///
/// # Safety
///
/// The caller must ensure `size` and `align` are valid (align must be a
/// power of two and non-zero).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_alloc(size: usize, align: usize) -> *mut u8 {
    if size == 0 || align == 0 || !align.is_power_of_two() {
        return std::ptr::null_mut();
    }
    let layout = match std::alloc::Layout::from_size_align(size, align) {
        Ok(l) => l,
        Err(_) => return std::ptr::null_mut(),
    };
    // SAFETY: layout has a non-zero size.
    unsafe { std::alloc::alloc(layout) }
}

/// Free a region previously allocated by [`parcel_alloc`].
///
/// # Safety
///
/// `ptr` must have been returned by `parcel_alloc` with the same `size`
/// and `align` values. Calling this with invalid arguments is undefined
/// behaviour.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn parcel_free(ptr: *mut u8, size: usize, align: usize) {
    if ptr.is_null() || size == 0 || align == 0 || !align.is_power_of_two() {
        return;
    }
    // SAFETY: caller guarantees ptr/size/align match a previous alloc call.
    if let Ok(layout) = std::alloc::Layout::from_size_align(size, align) {
        unsafe { std::alloc::dealloc(ptr, layout) };
    }
}
