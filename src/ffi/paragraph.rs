//! Paragraph style, builder, and paragraph exports.

use std::ffi::c_char;

use crate::canvas::Canvas;
use crate::context::EngineContext;
use crate::handle;
use crate::paragraph::{Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

use super::{cstr, QuillLineMetrics, QuillPosition, QuillRange, QuillRect, QUILL_INDEX_NONE};

// ParagraphStyle

#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_style_new() -> *mut ParagraphStyle {
    handle::into_owned(ParagraphStyle::default())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_style_set_font_family(
    style: *mut ParagraphStyle,
    family: *const c_char,
) {
    if let Some(style) = unsafe { handle::borrow_mut(style) } {
        style.family = unsafe { cstr(family) }.map(str::to_owned);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_style_set_font_size(style: *mut ParagraphStyle, size: f32) {
    if let Some(style) = unsafe { handle::borrow_mut(style) } {
        style.font_size = size;
    }
}

/// Line height as a multiple of the font size.
#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_style_set_line_height(style: *mut ParagraphStyle, factor: f32) {
    if let Some(style) = unsafe { handle::borrow_mut(style) } {
        style.line_height = factor;
    }
}

/// Alignment: 0 left, 1 right, 2 center, 3 justified, 4 end. Unknown values
/// keep the current alignment.
#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_style_set_align(style: *mut ParagraphStyle, align: i32) {
    if let Some(style) = unsafe { handle::borrow_mut(style) } {
        style.align = match align {
            0 => TextAlign::Left,
            1 => TextAlign::Right,
            2 => TextAlign::Center,
            3 => TextAlign::Justified,
            4 => TextAlign::End,
            _ => style.align,
        };
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_style_release(style: *mut ParagraphStyle) {
    unsafe { handle::release(style) };
}

// TextStyle

#[unsafe(no_mangle)]
pub extern "C" fn quill_text_style_new() -> *mut TextStyle {
    handle::into_owned(TextStyle::default())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_text_style_set_font_family(style: *mut TextStyle, family: *const c_char) {
    if let Some(style) = unsafe { handle::borrow_mut(style) } {
        style.family = unsafe { cstr(family) }.map(str::to_owned);
    }
}

/// Span color, packed 0xRRGGBBAA.
#[unsafe(no_mangle)]
pub extern "C" fn quill_text_style_set_color(style: *mut TextStyle, rgba: u32) {
    if let Some(style) = unsafe { handle::borrow_mut(style) } {
        style.color = Some(rgba);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_text_style_set_weight(style: *mut TextStyle, weight: u16) {
    if let Some(style) = unsafe { handle::borrow_mut(style) } {
        style.weight = Some(weight);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_text_style_set_italic(style: *mut TextStyle, italic: bool) {
    if let Some(style) = unsafe { handle::borrow_mut(style) } {
        style.italic = italic;
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_text_style_release(style: *mut TextStyle) {
    unsafe { handle::release(style) };
}

// ParagraphBuilder

/// Create a builder with the given paragraph style (copied).
///
/// # Returns
/// An owned handle, or null when `style` is null.
#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_builder_new(
    style: *const ParagraphStyle,
) -> *mut ParagraphBuilder {
    let Some(style) = (unsafe { handle::borrow(style) }) else {
        return std::ptr::null_mut();
    };
    handle::into_owned(ParagraphBuilder::new(style))
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_builder_add_text(
    builder: *mut ParagraphBuilder,
    text: *const c_char,
) {
    let (Some(builder), Some(text)) = (unsafe { handle::borrow_mut(builder) }, unsafe {
        cstr(text)
    }) else {
        return;
    };
    builder.add_text(text);
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_builder_push_style(
    builder: *mut ParagraphBuilder,
    style: *const TextStyle,
) {
    let (Some(builder), Some(style)) = (unsafe { handle::borrow_mut(builder) }, unsafe {
        handle::borrow(style)
    }) else {
        return;
    };
    builder.push_style(style);
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_builder_pop(builder: *mut ParagraphBuilder) {
    if let Some(builder) = unsafe { handle::borrow_mut(builder) } {
        builder.pop();
    }
}

/// Shape the accumulated spans into an owned paragraph. The builder is
/// drained and may be reused.
///
/// # Returns
/// An owned handle, or null when `builder` or `ctx` is null.
#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_builder_build(
    builder: *mut ParagraphBuilder,
    ctx: *const EngineContext,
) -> *mut Paragraph {
    let (Some(builder), Some(ctx)) = (unsafe { handle::borrow_mut(builder) }, unsafe {
        handle::borrow(ctx)
    }) else {
        return std::ptr::null_mut();
    };
    handle::into_owned(builder.build(ctx))
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_builder_release(builder: *mut ParagraphBuilder) {
    unsafe { handle::release(builder) };
}

// Paragraph

/// Re-wrap the paragraph to `width` and reshape.
#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_layout(
    paragraph: *mut Paragraph,
    ctx: *const EngineContext,
    width: f32,
) {
    let (Some(paragraph), Some(ctx)) = (unsafe { handle::borrow_mut(paragraph) }, unsafe {
        handle::borrow(ctx)
    }) else {
        return;
    };
    paragraph.layout(ctx, width);
}

/// Composite the paragraph into a borrowed canvas with its origin at (x, y).
/// `default_rgba` colors spans that did not set their own color.
#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_paint(
    paragraph: *const Paragraph,
    ctx: *const EngineContext,
    canvas: *mut Canvas,
    x: f32,
    y: f32,
    default_rgba: u32,
) {
    let (Some(paragraph), Some(ctx), Some(canvas)) = (
        unsafe { handle::borrow(paragraph) },
        unsafe { handle::borrow(ctx) },
        unsafe { handle::borrow_mut(canvas) },
    ) else {
        return;
    };
    paragraph.paint(ctx, canvas, x, y, default_rgba);
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_line_count(paragraph: *const Paragraph) -> usize {
    unsafe { handle::borrow(paragraph) }.map_or(0, |p| p.line_count())
}

/// Metrics of a laid-out line. Returns false when `line` is out of range.
#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_line_metrics_at(
    paragraph: *const Paragraph,
    line: usize,
    out: *mut QuillLineMetrics,
) -> bool {
    let Some(paragraph) = (unsafe { handle::borrow(paragraph) }) else {
        return false;
    };
    let (Some(metrics), false) = (paragraph.line_metrics_at(line), out.is_null()) else {
        return false;
    };
    unsafe {
        *out = QuillLineMetrics {
            start: metrics.start,
            end: metrics.end,
            top: metrics.top,
            baseline: metrics.baseline,
            height: metrics.height,
            width: metrics.width,
        };
    }
    true
}

/// Line containing the given byte index, or -1.
#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_line_number_at(paragraph: *const Paragraph, index: usize) -> i32 {
    unsafe { handle::borrow(paragraph) }
        .and_then(|p| p.line_number_at(index))
        .map_or(-1, |n| n as i32)
}

/// Hit-test paragraph-local coordinates. `index` is `QUILL_INDEX_NONE` when
/// nothing was hit (e.g. unshaped or empty paragraph).
#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_hit(paragraph: *const Paragraph, x: f32, y: f32) -> QuillPosition {
    let miss = QuillPosition {
        index: QUILL_INDEX_NONE,
        affinity: 0,
    };
    unsafe { handle::borrow(paragraph) }
        .and_then(|p| p.hit(x, y))
        .map_or(miss, |hit| QuillPosition {
            index: hit.index,
            affinity: hit.after as i32,
        })
}

/// Byte range of the word containing `index`.
#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_word_boundary(
    paragraph: *const Paragraph,
    index: usize,
) -> QuillRange {
    let (start, end) = unsafe { handle::borrow(paragraph) }
        .map_or((0, 0), |p| p.word_boundary(index));
    QuillRange { start, end }
}

/// Bounding rectangles of the glyphs covering `[start, end)`. Writes up to
/// `cap` rectangles to `out` and returns the total count, so a null `out`
/// sizes the result.
#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_rects_for_range(
    paragraph: *const Paragraph,
    start: usize,
    end: usize,
    out: *mut QuillRect,
    cap: usize,
) -> usize {
    let Some(paragraph) = (unsafe { handle::borrow(paragraph) }) else {
        return 0;
    };
    let rects = paragraph.rects_for_range(start, end);
    if !out.is_null() {
        for (i, [x, y, w, h]) in rects.iter().copied().take(cap).enumerate() {
            unsafe {
                *out.add(i) = QuillRect {
                    x,
                    y,
                    width: w,
                    height: h,
                };
            }
        }
    }
    rects.len()
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_max_intrinsic_width(paragraph: *const Paragraph) -> f32 {
    unsafe { handle::borrow(paragraph) }.map_or(0.0, |p| p.max_intrinsic_width())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_height(paragraph: *const Paragraph) -> f32 {
    unsafe { handle::borrow(paragraph) }.map_or(0.0, |p| p.height())
}

#[unsafe(no_mangle)]
pub extern "C" fn quill_paragraph_release(paragraph: *mut Paragraph) {
    unsafe { handle::release(paragraph) };
}
