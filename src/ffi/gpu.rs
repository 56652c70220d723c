//! GPU context exports.

use std::ffi::c_char;

use crate::gpu::GpuContext;
use crate::handle;

use super::write_str;

/// Bring up a GPU adapter and device.
///
/// # Returns
/// An owned handle, or null when no suitable adapter exists (headless CI,
/// driverless containers). A null result is recoverable; CPU raster
/// surfaces keep working without it.
#[unsafe(no_mangle)]
pub extern "C" fn quill_gpu_context_new() -> *mut GpuContext {
    match GpuContext::new() {
        Ok(ctx) => handle::into_owned(ctx),
        Err(e) => {
            log::warn!("quill_gpu_context_new: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Flush queued GPU work; when `wait` is true, block until the device is
/// idle.
#[unsafe(no_mangle)]
pub extern "C" fn quill_gpu_context_flush_and_submit(ctx: *const GpuContext, wait: bool) {
    if let Some(ctx) = unsafe { handle::borrow(ctx) } {
        ctx.flush_and_submit(wait);
    }
}

/// Copy the adapter name into `buf` (NUL-terminated, truncated to fit).
/// Returns the full name length in bytes.
#[unsafe(no_mangle)]
pub extern "C" fn quill_gpu_context_adapter_name(
    ctx: *const GpuContext,
    buf: *mut c_char,
    cap: usize,
) -> usize {
    unsafe { handle::borrow(ctx) }.map_or(0, |c| write_str(&c.adapter_name(), buf, cap))
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_gpu_context_release(ctx: *mut GpuContext) {
    unsafe { handle::release(ctx) };
}
