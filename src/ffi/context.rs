//! Engine context exports.

use std::ffi::c_char;

use crate::context::EngineContext;
use crate::handle;
use crate::typeface::Typeface;

use super::{byte_slice, cstr};

/// Create the shared engine context backed by the host's system fonts.
///
/// The host should create exactly one context at startup and pass it into
/// every call that shapes text. Also initializes logging on first use.
///
/// # Returns
/// An owned handle; release with `quill_context_release`.
#[unsafe(no_mangle)]
pub extern "C" fn quill_context_new() -> *mut EngineContext {
    let _ = env_logger::try_init();
    log::info!("quill_context_new: loading system fonts");
    handle::into_owned(EngineContext::new())
}

/// Create a context seeded with the given font bytes instead of a system
/// font scan.
///
/// # Returns
/// An owned handle, or null when `data` is null or empty.
#[unsafe(no_mangle)]
pub extern "C" fn quill_context_new_with_fonts(data: *const u8, len: usize) -> *mut EngineContext {
    let _ = env_logger::try_init();
    let Some(bytes) = (unsafe { byte_slice(data, len) }) else {
        log::error!("quill_context_new_with_fonts: null or empty font data");
        return std::ptr::null_mut();
    };
    log::info!("quill_context_new_with_fonts: {} bytes", bytes.len());
    handle::into_owned(EngineContext::with_fonts(bytes))
}

/// Register font bytes with the context's database.
///
/// # Returns
/// An owned typeface for the first face in the data, or null when the bytes
/// are not a usable font.
#[unsafe(no_mangle)]
pub extern "C" fn quill_context_register_font(
    ctx: *const EngineContext,
    data: *const u8,
    len: usize,
) -> *mut Typeface {
    let (Some(ctx), Some(bytes)) = (unsafe { handle::borrow(ctx) }, unsafe {
        byte_slice(data, len)
    }) else {
        return std::ptr::null_mut();
    };
    match ctx.register_font(bytes) {
        Ok(typeface) => handle::into_owned(typeface),
        Err(e) => {
            log::warn!("quill_context_register_font: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Match a family name against the context's database.
///
/// # Returns
/// An owned typeface, or null when no face matches.
#[unsafe(no_mangle)]
pub extern "C" fn quill_context_match_family(
    ctx: *const EngineContext,
    family: *const c_char,
    weight: u16,
    italic: bool,
) -> *mut Typeface {
    let (Some(ctx), Some(family)) = (unsafe { handle::borrow(ctx) }, unsafe { cstr(family) })
    else {
        return std::ptr::null_mut();
    };
    match ctx.match_family(family, weight, italic) {
        Ok(typeface) => handle::into_owned(typeface),
        Err(e) => {
            log::debug!("quill_context_match_family: {family:?}: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Number of faces known to the context's database.
#[unsafe(no_mangle)]
pub extern "C" fn quill_context_face_count(ctx: *const EngineContext) -> usize {
    unsafe { handle::borrow(ctx) }.map_or(0, |c| c.face_count())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_context_release(ctx: *mut EngineContext) {
    unsafe { handle::release(ctx) };
}
