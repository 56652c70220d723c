//! Paragraph building, layout, and query behavior through the C surface.
//!
//! Glyph geometry depends on whichever fonts the host exposes, so the
//! geometric assertions run only when the context actually found faces.

use std::ffi::CString;

use quill_ffi::ffi::context::*;
use quill_ffi::ffi::paragraph::*;
use quill_ffi::ffi::{QuillLineMetrics, QuillRect, QUILL_INDEX_NONE};

struct Session {
    ctx: *mut quill_ffi::EngineContext,
}

impl Session {
    fn new() -> Self {
        let ctx = quill_context_new();
        assert!(!ctx.is_null());
        Self { ctx }
    }

    fn has_fonts(&self) -> bool {
        quill_context_face_count(self.ctx) > 0
    }

    fn paragraph(&self, text: &str, width: f32) -> *mut quill_ffi::Paragraph {
        let style = quill_paragraph_style_new();
        let builder = quill_paragraph_builder_new(style);
        let text = CString::new(text).unwrap();
        quill_paragraph_builder_add_text(builder, text.as_ptr());
        let paragraph = quill_paragraph_builder_build(builder, self.ctx);
        assert!(!paragraph.is_null());
        quill_paragraph_layout(paragraph, self.ctx, width);
        quill_paragraph_builder_release(builder);
        quill_paragraph_style_release(style);
        paragraph
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        quill_context_release(self.ctx);
    }
}

#[test]
fn builder_requires_a_style() {
    assert!(quill_paragraph_builder_new(std::ptr::null()).is_null());
}

#[test]
fn build_requires_a_context() {
    let style = quill_paragraph_style_new();
    let builder = quill_paragraph_builder_new(style);
    assert!(quill_paragraph_builder_build(builder, std::ptr::null()).is_null());
    quill_paragraph_builder_release(builder);
    quill_paragraph_style_release(style);
}

#[test]
fn explicit_newlines_always_break_lines() {
    let session = Session::new();
    let paragraph = session.paragraph("one\ntwo\nthree", 10_000.0);
    assert_eq!(quill_paragraph_line_count(paragraph), 3);
    quill_paragraph_release(paragraph);
}

#[test]
fn narrow_width_wraps_when_fonts_exist() {
    let session = Session::new();
    if !session.has_fonts() {
        return;
    }
    let paragraph = session.paragraph("alpha beta gamma delta epsilon", 40.0);
    assert!(quill_paragraph_line_count(paragraph) > 1);
    assert!(quill_paragraph_height(paragraph) > 0.0);
    assert!(quill_paragraph_max_intrinsic_width(paragraph) > 0.0);
    quill_paragraph_release(paragraph);
}

#[test]
fn line_metrics_cover_the_text_in_order() {
    let session = Session::new();
    if !session.has_fonts() {
        return;
    }
    let paragraph = session.paragraph("first line\nsecond line", 10_000.0);
    let lines = quill_paragraph_line_count(paragraph);
    assert_eq!(lines, 2);

    let mut m0 = QuillLineMetrics {
        start: 0,
        end: 0,
        top: 0.0,
        baseline: 0.0,
        height: 0.0,
        width: 0.0,
    };
    let mut m1 = m0;
    assert!(quill_paragraph_line_metrics_at(paragraph, 0, &mut m0));
    assert!(quill_paragraph_line_metrics_at(paragraph, 1, &mut m1));
    assert!(!quill_paragraph_line_metrics_at(paragraph, 2, &mut m1));

    assert_eq!(m0.start, 0);
    assert!(m0.end <= 10);
    // "second line" starts after the newline at byte 10.
    assert!(m1.start >= 11);
    assert!(m1.top >= m0.top + m0.height - 0.5);
    assert!(m0.baseline > m0.top);
    assert!(m0.width > 0.0);

    assert_eq!(quill_paragraph_line_number_at(paragraph, 0), 0);
    assert_eq!(quill_paragraph_line_number_at(paragraph, 12), 1);
    assert_eq!(quill_paragraph_line_number_at(paragraph, 9_999), -1);
    quill_paragraph_release(paragraph);
}

#[test]
fn hit_testing_round_trips_through_line_metrics() {
    let session = Session::new();
    if !session.has_fonts() {
        return;
    }
    let paragraph = session.paragraph("hit me", 10_000.0);
    let hit = quill_paragraph_hit(paragraph, 1.0, 2.0);
    assert_ne!(hit.index, QUILL_INDEX_NONE);
    assert!(hit.index <= 6);
    assert!(hit.affinity == 0 || hit.affinity == 1);

    // Far below the last line still resolves to some position in the text.
    let below = quill_paragraph_hit(paragraph, 1.0, 10_000.0);
    assert_ne!(below.index, QUILL_INDEX_NONE);
    quill_paragraph_release(paragraph);
}

#[test]
fn sentinel_index_maps_to_no_line() {
    let session = Session::new();
    // A blank middle line produces a layout run with no glyphs; feeding the
    // miss sentinel back from a failed hit test must answer -1, not abort.
    let paragraph = session.paragraph("a\n\nb", 10_000.0);
    assert_eq!(
        quill_paragraph_line_number_at(paragraph, QUILL_INDEX_NONE),
        -1
    );
    quill_paragraph_release(paragraph);
}

#[test]
fn word_boundaries_split_on_whitespace() {
    let session = Session::new();
    let paragraph = session.paragraph("alpha beta", 10_000.0);
    let word = quill_paragraph_word_boundary(paragraph, 2);
    assert_eq!((word.start, word.end), (0, 5));
    let word = quill_paragraph_word_boundary(paragraph, 7);
    assert_eq!((word.start, word.end), (6, 10));
    quill_paragraph_release(paragraph);
}

#[test]
fn rects_for_range_reports_total_before_copying() {
    let session = Session::new();
    if !session.has_fonts() {
        return;
    }
    let paragraph = session.paragraph("selection target", 10_000.0);

    // Sizing call: null out, zero cap.
    let total = quill_paragraph_rects_for_range(paragraph, 0, 9, std::ptr::null_mut(), 0);
    assert!(total >= 1);

    let mut rects = vec![
        QuillRect {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        };
        total
    ];
    let again = quill_paragraph_rects_for_range(paragraph, 0, 9, rects.as_mut_ptr(), rects.len());
    assert_eq!(again, total);
    assert!(rects[0].width > 0.0);
    assert!(rects[0].height > 0.0);

    // Empty and inverted ranges select nothing.
    assert_eq!(
        quill_paragraph_rects_for_range(paragraph, 3, 3, std::ptr::null_mut(), 0),
        0
    );
    assert_eq!(
        quill_paragraph_rects_for_range(paragraph, 9, 3, std::ptr::null_mut(), 0),
        0
    );
    quill_paragraph_release(paragraph);
}

#[test]
fn borrowed_queries_are_stable_across_repetition() {
    let session = Session::new();
    let paragraph = session.paragraph("steady state", 10_000.0);
    let first_hit = quill_paragraph_hit(paragraph, 3.0, 3.0);
    let first_word = quill_paragraph_word_boundary(paragraph, 1);
    let first_count = quill_paragraph_line_count(paragraph);
    for _ in 0..100 {
        let hit = quill_paragraph_hit(paragraph, 3.0, 3.0);
        assert_eq!((hit.index, hit.affinity), (first_hit.index, first_hit.affinity));
        let word = quill_paragraph_word_boundary(paragraph, 1);
        assert_eq!((word.start, word.end), (first_word.start, first_word.end));
        assert_eq!(quill_paragraph_line_count(paragraph), first_count);
    }
    quill_paragraph_release(paragraph);
}

#[test]
fn styled_spans_survive_the_builder_stack() {
    let session = Session::new();
    let style = quill_paragraph_style_new();
    quill_paragraph_style_set_font_size(style, 20.0);
    quill_paragraph_style_set_align(style, 2);

    let bold = quill_text_style_new();
    quill_text_style_set_weight(bold, 700);
    quill_text_style_set_color(bold, 0xcc0000ff);

    let builder = quill_paragraph_builder_new(style);
    let plain = CString::new("plain ").unwrap();
    let strong = CString::new("strong").unwrap();
    quill_paragraph_builder_add_text(builder, plain.as_ptr());
    quill_paragraph_builder_push_style(builder, bold);
    quill_paragraph_builder_add_text(builder, strong.as_ptr());
    quill_paragraph_builder_pop(builder);

    let paragraph = quill_paragraph_builder_build(builder, session.ctx);
    assert!(!paragraph.is_null());
    let word = quill_paragraph_word_boundary(paragraph, 8);
    assert_eq!((word.start, word.end), (6, 12));

    quill_paragraph_release(paragraph);
    quill_paragraph_builder_release(builder);
    quill_text_style_release(bold);
    quill_paragraph_style_release(style);
}
