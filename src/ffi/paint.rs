//! Paint exports.

use tiny_skia::BlendMode;

use crate::handle;
use crate::paint::{Paint, PaintStyle};

#[unsafe(no_mangle)]
pub extern "C" fn quill_paint_new() -> *mut Paint {
    handle::into_owned(Paint::default())
}

/// Color, packed 0xRRGGBBAA.
#[unsafe(no_mangle)]
pub extern "C" fn quill_paint_set_color(paint: *mut Paint, rgba: u32) {
    if let Some(paint) = unsafe { handle::borrow_mut(paint) } {
        paint.set_color_rgba(rgba);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paint_set_anti_alias(paint: *mut Paint, anti_alias: bool) {
    if let Some(paint) = unsafe { handle::borrow_mut(paint) } {
        paint.anti_alias = anti_alias;
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paint_set_stroke(paint: *mut Paint, stroke: bool) {
    if let Some(paint) = unsafe { handle::borrow_mut(paint) } {
        paint.style = if stroke {
            PaintStyle::Stroke
        } else {
            PaintStyle::Fill
        };
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paint_set_stroke_width(paint: *mut Paint, width: f32) {
    if let Some(paint) = unsafe { handle::borrow_mut(paint) } {
        paint.stroke_width = width;
    }
}

/// Blend mode by code; unknown codes fall back to source-over.
#[unsafe(no_mangle)]
pub extern "C" fn quill_paint_set_blend_mode(paint: *mut Paint, mode: u32) {
    if let Some(paint) = unsafe { handle::borrow_mut(paint) } {
        paint.blend_mode = blend_mode_from(mode);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paint_release(paint: *mut Paint) {
    unsafe { handle::release(paint) };
}

fn blend_mode_from(mode: u32) -> BlendMode {
    match mode {
        0 => BlendMode::Clear,
        1 => BlendMode::Source,
        2 => BlendMode::Destination,
        3 => BlendMode::SourceOver,
        4 => BlendMode::DestinationOver,
        5 => BlendMode::SourceIn,
        6 => BlendMode::DestinationIn,
        7 => BlendMode::SourceOut,
        8 => BlendMode::DestinationOut,
        9 => BlendMode::SourceAtop,
        10 => BlendMode::DestinationAtop,
        11 => BlendMode::Xor,
        12 => BlendMode::Plus,
        13 => BlendMode::Modulate,
        14 => BlendMode::Screen,
        15 => BlendMode::Overlay,
        16 => BlendMode::Darken,
        17 => BlendMode::Lighten,
        18 => BlendMode::ColorDodge,
        19 => BlendMode::ColorBurn,
        20 => BlendMode::HardLight,
        21 => BlendMode::SoftLight,
        22 => BlendMode::Difference,
        23 => BlendMode::Exclusion,
        24 => BlendMode::Multiply,
        25 => BlendMode::Hue,
        26 => BlendMode::Saturation,
        27 => BlendMode::Color,
        28 => BlendMode::Luminosity,
        _ => BlendMode::SourceOver,
    }
}
