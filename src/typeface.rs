//! Typeface handles and caller-built text runs.
//!
//! A typeface keeps its own copy of the font bytes so the handle is
//! self-contained: it stays valid regardless of what happens to the caller's
//! buffer or to the shared font database. Glyph and name access goes through
//! swash.

use std::sync::Arc;

use swash::{FontRef, StringId};

/// An exclusively-owned face: font bytes plus a face index.
#[derive(Clone)]
pub struct Typeface {
    data: Arc<Vec<u8>>,
    index: u32,
    family: String,
    glyph_count: u16,
    units_per_em: u16,
}

impl Typeface {
    /// Parse `data` as a font and take ownership of it. Returns `None` when
    /// the bytes are not a usable font.
    pub fn from_bytes(data: Vec<u8>, index: u32) -> Option<Self> {
        let font = FontRef::from_index(&data, index as usize)?;
        let metrics = font.metrics(&[]);
        let family = font
            .localized_strings()
            .find(|s| s.id() == StringId::Family)
            .map(|s| s.chars().collect())
            .unwrap_or_default();
        Some(Self {
            glyph_count: metrics.glyph_count,
            units_per_em: metrics.units_per_em,
            family,
            data: Arc::new(data),
            index,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family
    }

    pub fn glyph_count(&self) -> u16 {
        self.glyph_count
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Map a character to a glyph id; 0 (`.notdef`) when unmapped.
    pub fn glyph_for_char(&self, c: char) -> u16 {
        self.as_font().map(|f| f.charmap().map(c)).unwrap_or(0)
    }

    pub(crate) fn as_font(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.index as usize)
    }
}

/// A self-contained run of positioned glyphs.
///
/// Construction copies the caller's glyph and position arrays, so the run
/// has no ownership ties back to the caller's memory; the typeface it
/// references is shared by cheap clone of its byte buffer.
pub struct TextRun {
    typeface: Typeface,
    glyphs: Vec<u16>,
    positions: Vec<[f32; 2]>,
    size: f32,
}

impl TextRun {
    pub fn new(typeface: &Typeface, glyphs: &[u16], positions: &[[f32; 2]], size: f32) -> Self {
        debug_assert_eq!(glyphs.len(), positions.len());
        Self {
            typeface: typeface.clone(),
            glyphs: glyphs.to_vec(),
            positions: positions.to_vec(),
            size,
        }
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub(crate) fn typeface(&self) -> &Typeface {
        &self.typeface
    }

    pub(crate) fn glyphs(&self) -> impl Iterator<Item = (u16, [f32; 2])> + '_ {
        self.glyphs
            .iter()
            .copied()
            .zip(self.positions.iter().copied())
    }
}
