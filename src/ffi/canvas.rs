//! Surface, canvas, and encoded-byte-buffer exports.
//!
//! The canvas pointer returned by `quill_surface_get_canvas` is *borrowed*:
//! it is valid exactly as long as its surface and must not be released.

use crate::canvas::{Canvas, Surface};
use crate::handle::{self, OwnedBytes};
use crate::image_data::Image;
use crate::paint::Paint;
use crate::path::Path;
use crate::typeface::TextRun;

use super::{QuillMatrix, QuillRect};

// Surface

/// Allocate a CPU raster surface.
///
/// # Returns
/// An owned handle, or null when either dimension is zero or allocation
/// fails.
#[unsafe(no_mangle)]
pub extern "C" fn quill_surface_new_raster(width: u32, height: u32) -> *mut Surface {
    match Surface::new_raster(width, height) {
        Ok(surface) => handle::into_owned(surface),
        Err(e) => {
            log::warn!("quill_surface_new_raster: {e}");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_surface_width(surface: *const Surface) -> u32 {
    unsafe { handle::borrow(surface) }.map_or(0, |s| s.width())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_surface_height(surface: *const Surface) -> u32 {
    unsafe { handle::borrow(surface) }.map_or(0, |s| s.height())
}

/// Borrow the surface's canvas. Do not release; it lives and dies with the
/// surface.
#[unsafe(no_mangle)]
pub extern "C" fn quill_surface_get_canvas(surface: *mut Surface) -> *mut Canvas {
    unsafe { handle::borrow_mut(surface) }
        .map_or(std::ptr::null_mut(), |s| s.canvas_mut() as *mut Canvas)
}

/// Encode the surface contents as PNG.
///
/// # Returns
/// An owned byte buffer (release with `quill_data_release`), or null on
/// encoding failure.
#[unsafe(no_mangle)]
pub extern "C" fn quill_surface_encode_png(surface: *const Surface) -> *mut OwnedBytes {
    let Some(surface) = (unsafe { handle::borrow(surface) }) else {
        return std::ptr::null_mut();
    };
    match surface.encode_png() {
        Ok(bytes) => handle::into_owned(OwnedBytes::new(bytes)),
        Err(e) => {
            log::warn!("quill_surface_encode_png: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Premultiplied RGBA of one pixel, packed 0xRRGGBBAA; 0 when out of bounds.
#[unsafe(no_mangle)]
pub extern "C" fn quill_surface_pixel(surface: *const Surface, x: u32, y: u32) -> u32 {
    unsafe { handle::borrow(surface) }
        .and_then(|s| s.pixel(x, y))
        .unwrap_or(0)
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_surface_release(surface: *mut Surface) {
    unsafe { handle::release(surface) };
}

// Data

#[unsafe(no_mangle)]
pub extern "C" fn quill_data_bytes(data: *const OwnedBytes) -> *const u8 {
    unsafe { handle::borrow(data) }.map_or(std::ptr::null(), |d| d.as_ptr())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_data_size(data: *const OwnedBytes) -> usize {
    unsafe { handle::borrow(data) }.map_or(0, |d| d.len())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_data_release(data: *mut OwnedBytes) {
    unsafe { handle::release(data) };
}

// Canvas state

#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_save(canvas: *mut Canvas) {
    if let Some(canvas) = unsafe { handle::borrow_mut(canvas) } {
        canvas.save();
    }
}

/// Redirect subsequent drawing into an offscreen layer composited back by
/// the matching `quill_canvas_restore`. `paint` may be null; when given, its
/// alpha modulates the layer.
#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_save_layer(canvas: *mut Canvas, paint: *const Paint) {
    if let Some(canvas) = unsafe { handle::borrow_mut(canvas) } {
        let opacity = unsafe { handle::borrow(paint) }
            .map(|p| p.color[3] as f32 / 255.0)
            .unwrap_or(1.0);
        canvas.save_layer(opacity);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_restore(canvas: *mut Canvas) {
    if let Some(canvas) = unsafe { handle::borrow_mut(canvas) } {
        canvas.restore();
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_save_count(canvas: *const Canvas) -> usize {
    unsafe { handle::borrow(canvas) }.map_or(0, |c| c.save_count())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_translate(canvas: *mut Canvas, dx: f32, dy: f32) {
    if let Some(canvas) = unsafe { handle::borrow_mut(canvas) } {
        canvas.translate(dx, dy);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_scale(canvas: *mut Canvas, sx: f32, sy: f32) {
    if let Some(canvas) = unsafe { handle::borrow_mut(canvas) } {
        canvas.scale(sx, sy);
    }
}

/// Rotate about the origin, in degrees.
#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_rotate(canvas: *mut Canvas, degrees: f32) {
    if let Some(canvas) = unsafe { handle::borrow_mut(canvas) } {
        canvas.rotate(degrees);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_concat(canvas: *mut Canvas, matrix: QuillMatrix) {
    if let Some(canvas) = unsafe { handle::borrow_mut(canvas) } {
        canvas.concat([
            matrix.sx, matrix.kx, matrix.ky, matrix.sy, matrix.tx, matrix.ty,
        ]);
    }
}

/// Replace the pixels inside the current clip with `rgba` (packed
/// 0xRRGGBBAA), ignoring the transform. Without a clip the whole surface is
/// filled.
#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_clear(canvas: *mut Canvas, rgba: u32) {
    if let Some(canvas) = unsafe { handle::borrow_mut(canvas) } {
        canvas.clear(rgba);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_clip_rect(canvas: *mut Canvas, rect: QuillRect, anti_alias: bool) {
    if let Some(canvas) = unsafe { handle::borrow_mut(canvas) } {
        canvas.clip_rect(rect.x, rect.y, rect.width, rect.height, anti_alias);
    }
}

// Canvas drawing

#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_draw_line(
    canvas: *mut Canvas,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    paint: *const Paint,
) {
    let (Some(canvas), Some(paint)) = (unsafe { handle::borrow_mut(canvas) }, unsafe {
        handle::borrow(paint)
    }) else {
        return;
    };
    canvas.draw_line(x0, y0, x1, y1, paint);
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_draw_rect(canvas: *mut Canvas, rect: QuillRect, paint: *const Paint) {
    let (Some(canvas), Some(paint)) = (unsafe { handle::borrow_mut(canvas) }, unsafe {
        handle::borrow(paint)
    }) else {
        return;
    };
    canvas.draw_rect(rect.x, rect.y, rect.width, rect.height, paint);
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_draw_circle(
    canvas: *mut Canvas,
    cx: f32,
    cy: f32,
    radius: f32,
    paint: *const Paint,
) {
    let (Some(canvas), Some(paint)) = (unsafe { handle::borrow_mut(canvas) }, unsafe {
        handle::borrow(paint)
    }) else {
        return;
    };
    canvas.draw_circle(cx, cy, radius, paint);
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_draw_path(
    canvas: *mut Canvas,
    path: *const Path,
    paint: *const Paint,
) {
    let (Some(canvas), Some(path), Some(paint)) = (
        unsafe { handle::borrow_mut(canvas) },
        unsafe { handle::borrow(path) },
        unsafe { handle::borrow(paint) },
    ) else {
        return;
    };
    canvas.draw_path(path, paint);
}

/// Draw an image with its top-left corner at (x, y). `paint` may be null;
/// when given, its alpha and blend mode apply.
#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_draw_image(
    canvas: *mut Canvas,
    image: *const Image,
    x: f32,
    y: f32,
    paint: *const Paint,
) {
    let (Some(canvas), Some(image)) = (unsafe { handle::borrow_mut(canvas) }, unsafe {
        handle::borrow(image)
    }) else {
        return;
    };
    canvas.draw_image(image, x, y, unsafe { handle::borrow(paint) });
}

/// Draw the `src` portion of an image scaled into `dst`. `paint` may be
/// null.
#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_draw_image_rect(
    canvas: *mut Canvas,
    image: *const Image,
    src: QuillRect,
    dst: QuillRect,
    paint: *const Paint,
) {
    let (Some(canvas), Some(image)) = (unsafe { handle::borrow_mut(canvas) }, unsafe {
        handle::borrow(image)
    }) else {
        return;
    };
    canvas.draw_image_rect(
        image,
        [src.x, src.y, src.width, src.height],
        [dst.x, dst.y, dst.width, dst.height],
        unsafe { handle::borrow(paint) },
    );
}

/// Draw `image` as a nine-patch: split by the `center` rectangle (in image
/// pixels), corners at natural size, edges and middle stretched to fill
/// `dst`. `paint` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_draw_image_nine(
    canvas: *mut Canvas,
    image: *const Image,
    center: QuillRect,
    dst: QuillRect,
    paint: *const Paint,
) {
    let (Some(canvas), Some(image)) = (unsafe { handle::borrow_mut(canvas) }, unsafe {
        handle::borrow(image)
    }) else {
        return;
    };
    canvas.draw_image_nine(
        image,
        [center.x, center.y, center.width, center.height],
        [dst.x, dst.y, dst.width, dst.height],
        unsafe { handle::borrow(paint) },
    );
}

/// Rasterize a positioned glyph run at (x, y), tinted by the paint color.
#[unsafe(no_mangle)]
pub extern "C" fn quill_canvas_draw_text_run(
    canvas: *mut Canvas,
    run: *const TextRun,
    x: f32,
    y: f32,
    paint: *const Paint,
) {
    let (Some(canvas), Some(run), Some(paint)) = (
        unsafe { handle::borrow_mut(canvas) },
        unsafe { handle::borrow(run) },
        unsafe { handle::borrow(paint) },
    ) else {
        return;
    };
    canvas.draw_text_run(run, x, y, paint);
}
