//! Still and animated image exports.

use crate::handle;
use crate::image_data::{AnimatedImage, Image};

use super::byte_slice;

/// Decode encoded image bytes (PNG, JPEG, GIF, WebP).
///
/// # Returns
/// An owned handle, or null when the bytes cannot be decoded. A null result
/// allocates nothing.
#[unsafe(no_mangle)]
pub extern "C" fn quill_image_decode(data: *const u8, len: usize) -> *mut Image {
    let Some(bytes) = (unsafe { byte_slice(data, len) }) else {
        return std::ptr::null_mut();
    };
    match Image::decode(bytes) {
        Ok(image) => handle::into_owned(image),
        Err(e) => {
            log::warn!("quill_image_decode: {e}");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_image_width(image: *const Image) -> u32 {
    unsafe { handle::borrow(image) }.map_or(0, |i| i.width())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_image_height(image: *const Image) -> u32 {
    unsafe { handle::borrow(image) }.map_or(0, |i| i.height())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_image_release(image: *mut Image) {
    unsafe { handle::release(image) };
}

/// Decode animated GIF/WebP bytes; still images decode as a single frame.
///
/// # Returns
/// An owned handle, or null when the bytes cannot be decoded.
#[unsafe(no_mangle)]
pub extern "C" fn quill_animated_image_decode(data: *const u8, len: usize) -> *mut AnimatedImage {
    let Some(bytes) = (unsafe { byte_slice(data, len) }) else {
        return std::ptr::null_mut();
    };
    match AnimatedImage::decode(bytes) {
        Ok(anim) => handle::into_owned(anim),
        Err(e) => {
            log::warn!("quill_animated_image_decode: {e}");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_animated_image_frame_count(anim: *const AnimatedImage) -> usize {
    unsafe { handle::borrow(anim) }.map_or(0, |a| a.frame_count())
}

/// Loop count; -1 means repeat forever.
#[unsafe(no_mangle)]
pub extern "C" fn quill_animated_image_repetition_count(anim: *const AnimatedImage) -> i32 {
    unsafe { handle::borrow(anim) }.map_or(0, |a| a.repetition_count())
}

/// Advance to the next frame. Returns the new current frame's duration in
/// milliseconds, or -1 for single-frame images.
#[unsafe(no_mangle)]
pub extern "C" fn quill_animated_image_decode_next_frame(anim: *mut AnimatedImage) -> i32 {
    unsafe { handle::borrow_mut(anim) }.map_or(-1, |a| a.decode_next_frame())
}

/// A detached copy of the current frame, as an owned image.
#[unsafe(no_mangle)]
pub extern "C" fn quill_animated_image_current_frame(anim: *const AnimatedImage) -> *mut Image {
    unsafe { handle::borrow(anim) }
        .map_or(std::ptr::null_mut(), |a| handle::into_owned(a.current_frame()))
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_animated_image_release(anim: *mut AnimatedImage) {
    unsafe { handle::release(anim) };
}
