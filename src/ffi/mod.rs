//! Flat C exports.
//!
//! These functions are exported as C symbols for use from Swift/Objective-C
//! or any other foreign caller. Conventions:
//!
//! - Factories return owned handles, null on failure. Paired
//!   `quill_*_release` functions must be called exactly once per non-null
//!   handle and ignore null.
//! - All other pointer arguments are borrowed for the duration of the call.
//! - Failures never unwind; they become null handles or sentinel values and
//!   are logged.

pub mod canvas;
pub mod context;
pub mod gpu;
pub mod image;
pub mod paint;
pub mod paragraph;
pub mod path;
pub mod typeface;

use std::ffi::{c_char, CStr};

/// Sentinel byte index for "no position".
pub const QUILL_INDEX_NONE: usize = usize::MAX;

#[repr(C)]
#[derive(Clone, Copy)]
pub struct QuillPoint {
    pub x: f32,
    pub y: f32,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct QuillRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Row-major 2x3 affine matrix: [sx kx tx; ky sy ty].
#[repr(C)]
#[derive(Clone, Copy)]
pub struct QuillMatrix {
    pub sx: f32,
    pub kx: f32,
    pub ky: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct QuillRange {
    pub start: usize,
    pub end: usize,
}

/// Hit-test result: byte index plus edge affinity (0 = leading edge,
/// 1 = trailing edge). `index` is `QUILL_INDEX_NONE` when nothing was hit.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct QuillPosition {
    pub index: usize,
    pub affinity: i32,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct QuillLineMetrics {
    pub start: usize,
    pub end: usize,
    pub top: f32,
    pub baseline: f32,
    pub height: f32,
    pub width: f32,
}

/// Borrow a NUL-terminated UTF-8 string for the duration of a call.
pub(crate) unsafe fn cstr<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Borrow a caller byte buffer for the duration of a call.
pub(crate) unsafe fn byte_slice<'a>(ptr: *const u8, len: usize) -> Option<&'a [u8]> {
    if ptr.is_null() || len == 0 {
        return None;
    }
    Some(unsafe { std::slice::from_raw_parts(ptr, len) })
}

/// Copy `s` into a caller buffer as a NUL-terminated string, truncating to
/// fit. Returns the full (untruncated) byte length, so callers can detect
/// truncation and resize.
pub(crate) fn write_str(s: &str, buf: *mut c_char, cap: usize) -> usize {
    if !buf.is_null() && cap > 0 {
        let n = s.len().min(cap - 1);
        unsafe {
            std::ptr::copy_nonoverlapping(s.as_ptr(), buf as *mut u8, n);
            *buf.add(n) = 0;
        }
    }
    s.len()
}

/// Owned handles currently alive, for leak checks in debug builds. Always
/// zero in release builds.
#[unsafe(no_mangle)]
pub extern "C" fn quill_debug_live_handle_count() -> usize {
    crate::handle::live_owned()
}
