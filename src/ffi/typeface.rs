//! Typeface and text-run exports.

use std::ffi::c_char;

use crate::handle;
use crate::typeface::{TextRun, Typeface};

use super::{byte_slice, write_str, QuillPoint};

/// Parse font bytes into an owned typeface, independent of any context.
///
/// # Returns
/// An owned handle, or null when the bytes are not a usable font.
#[unsafe(no_mangle)]
pub extern "C" fn quill_typeface_from_data(
    data: *const u8,
    len: usize,
    index: u32,
) -> *mut Typeface {
    let Some(bytes) = (unsafe { byte_slice(data, len) }) else {
        return std::ptr::null_mut();
    };
    match Typeface::from_bytes(bytes.to_vec(), index) {
        Some(typeface) => handle::into_owned(typeface),
        None => {
            log::warn!("quill_typeface_from_data: unparsable font ({len} bytes)");
            std::ptr::null_mut()
        }
    }
}

/// Copy the family name into `buf` (NUL-terminated, truncated to fit).
/// Returns the full name length in bytes.
#[unsafe(no_mangle)]
pub extern "C" fn quill_typeface_family_name(
    typeface: *const Typeface,
    buf: *mut c_char,
    cap: usize,
) -> usize {
    unsafe { handle::borrow(typeface) }.map_or(0, |t| write_str(t.family_name(), buf, cap))
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_typeface_glyph_count(typeface: *const Typeface) -> u16 {
    unsafe { handle::borrow(typeface) }.map_or(0, |t| t.glyph_count())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_typeface_units_per_em(typeface: *const Typeface) -> u16 {
    unsafe { handle::borrow(typeface) }.map_or(0, |t| t.units_per_em())
}

/// Glyph id for a Unicode scalar value; 0 when unmapped or invalid.
#[unsafe(no_mangle)]
pub extern "C" fn quill_typeface_glyph_for_char(typeface: *const Typeface, codepoint: u32) -> u16 {
    let (Some(typeface), Some(c)) = (unsafe { handle::borrow(typeface) }, char::from_u32(codepoint))
    else {
        return 0;
    };
    typeface.glyph_for_char(c)
}

/// Map `count` Unicode scalar values to glyph ids. Returns the number of
/// entries written to `out`.
#[unsafe(no_mangle)]
pub extern "C" fn quill_typeface_glyphs(
    typeface: *const Typeface,
    codepoints: *const u32,
    count: usize,
    out: *mut u16,
) -> usize {
    let Some(typeface) = (unsafe { handle::borrow(typeface) }) else {
        return 0;
    };
    if codepoints.is_null() || out.is_null() || count == 0 {
        return 0;
    }
    let cps = unsafe { std::slice::from_raw_parts(codepoints, count) };
    let dst = unsafe { std::slice::from_raw_parts_mut(out, count) };
    for (dst, &cp) in dst.iter_mut().zip(cps) {
        *dst = char::from_u32(cp).map_or(0, |c| typeface.glyph_for_char(c));
    }
    count
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_typeface_release(typeface: *mut Typeface) {
    unsafe { handle::release(typeface) };
}

/// Build a self-contained text run by copying `count` glyph ids and
/// positions. The typeface is borrowed; the run keeps its own reference to
/// the font data.
///
/// # Returns
/// An owned handle, or null when any required argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn quill_text_run_new(
    typeface: *const Typeface,
    glyphs: *const u16,
    positions: *const QuillPoint,
    count: usize,
    size: f32,
) -> *mut TextRun {
    let Some(typeface) = (unsafe { handle::borrow(typeface) }) else {
        return std::ptr::null_mut();
    };
    if count > 0 && (glyphs.is_null() || positions.is_null()) {
        return std::ptr::null_mut();
    }
    let (glyphs, positions) = if count == 0 {
        (&[][..], Vec::new())
    } else {
        let g = unsafe { std::slice::from_raw_parts(glyphs, count) };
        let p = unsafe { std::slice::from_raw_parts(positions, count) };
        (g, p.iter().map(|p| [p.x, p.y]).collect())
    };
    handle::into_owned(TextRun::new(typeface, glyphs, &positions, size))
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_text_run_glyph_count(run: *const TextRun) -> usize {
    unsafe { handle::borrow(run) }.map_or(0, |r| r.glyph_count())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_text_run_release(run: *mut TextRun) {
    unsafe { handle::release(run) };
}
