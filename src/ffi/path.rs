//! Path exports.

use crate::handle;
use crate::path::Path;

#[unsafe(no_mangle)]
pub extern "C" fn quill_path_new() -> *mut Path {
    handle::into_owned(Path::new())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_path_move_to(path: *mut Path, x: f32, y: f32) {
    if let Some(path) = unsafe { handle::borrow_mut(path) } {
        path.move_to(x, y);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_path_line_to(path: *mut Path, x: f32, y: f32) {
    if let Some(path) = unsafe { handle::borrow_mut(path) } {
        path.line_to(x, y);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_path_quad_to(path: *mut Path, cx: f32, cy: f32, x: f32, y: f32) {
    if let Some(path) = unsafe { handle::borrow_mut(path) } {
        path.quad_to(cx, cy, x, y);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_path_cubic_to(
    path: *mut Path,
    c1x: f32,
    c1y: f32,
    c2x: f32,
    c2y: f32,
    x: f32,
    y: f32,
) {
    if let Some(path) = unsafe { handle::borrow_mut(path) } {
        path.cubic_to(c1x, c1y, c2x, c2y, x, y);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_path_close(path: *mut Path) {
    if let Some(path) = unsafe { handle::borrow_mut(path) } {
        path.close();
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_path_reset(path: *mut Path) {
    if let Some(path) = unsafe { handle::borrow_mut(path) } {
        path.reset();
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_path_release(path: *mut Path) {
    unsafe { handle::release(path) };
}
