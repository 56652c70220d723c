//! Font registration and database visibility through the C surface, using a
//! small checked-in test face (family "Quill Test", one box glyph at 'A').

use std::ffi::{c_char, CStr, CString};

use quill_ffi::ffi::context::*;
use quill_ffi::ffi::typeface::*;

static QUILL_TEST_TTF: &[u8] = include_bytes!("fonts/quilltest.ttf");

fn family_of(typeface: *const quill_ffi::Typeface) -> String {
    let mut buf = [0 as c_char; 64];
    let n = quill_typeface_family_name(typeface, buf.as_mut_ptr(), buf.len());
    assert!(n < buf.len());
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_str()
        .unwrap()
        .to_owned()
}

#[test]
fn registered_face_is_visible_to_matching() {
    let ctx = quill_context_new();
    let before = quill_context_face_count(ctx);

    let typeface =
        quill_context_register_font(ctx, QUILL_TEST_TTF.as_ptr(), QUILL_TEST_TTF.len());
    assert!(!typeface.is_null());
    assert_eq!(quill_context_face_count(ctx), before + 1);

    // The same context resolves the family it just learned about.
    let family = CString::new("Quill Test").unwrap();
    let matched = quill_context_match_family(ctx, family.as_ptr(), 400, false);
    assert!(!matched.is_null());
    assert_eq!(family_of(matched), "Quill Test");

    quill_typeface_release(matched);
    quill_typeface_release(typeface);
    quill_context_release(ctx);
}

#[test]
fn seeded_context_resolves_its_fonts() {
    let ctx = quill_context_new_with_fonts(QUILL_TEST_TTF.as_ptr(), QUILL_TEST_TTF.len());
    assert!(!ctx.is_null());
    assert!(quill_context_face_count(ctx) >= 1);

    let family = CString::new("Quill Test").unwrap();
    let matched = quill_context_match_family(ctx, family.as_ptr(), 400, false);
    assert!(!matched.is_null());
    quill_typeface_release(matched);
    quill_context_release(ctx);
}

#[test]
fn typeface_reports_face_properties() {
    let typeface =
        quill_typeface_from_data(QUILL_TEST_TTF.as_ptr(), QUILL_TEST_TTF.len(), 0);
    assert!(!typeface.is_null());
    assert_eq!(family_of(typeface), "Quill Test");
    assert_eq!(quill_typeface_glyph_count(typeface), 2);
    assert_eq!(quill_typeface_units_per_em(typeface), 1000);
    assert_eq!(quill_typeface_glyph_for_char(typeface, 'A' as u32), 1);
    assert_eq!(quill_typeface_glyph_for_char(typeface, 'B' as u32), 0);

    let cps = ['A' as u32, 'B' as u32, 'A' as u32];
    let mut glyphs = [0u16; 3];
    assert_eq!(
        quill_typeface_glyphs(typeface, cps.as_ptr(), cps.len(), glyphs.as_mut_ptr()),
        3
    );
    assert_eq!(glyphs, [1, 0, 1]);

    quill_typeface_release(typeface);
}
