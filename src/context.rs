//! Explicit engine context shared by all text-shaping operations.
//!
//! The boundary protocol has no per-call slot for font configuration, so a
//! single long-lived context object carries it instead: the host constructs
//! one `EngineContext` at startup and passes it by borrowed reference into
//! every factory call that shapes text. Construction is explicit and the
//! interior state is lock-guarded, so there is no hidden global and no racy
//! lazy initialization.

use cosmic_text::{fontdb, FontSystem, SwashCache};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

use crate::error::EngineError;
use crate::typeface::Typeface;

pub struct EngineContext {
    font_system: Mutex<FontSystem>,
    swash_cache: Mutex<SwashCache>,
}

impl EngineContext {
    /// Build a context backed by the host's system fonts.
    pub fn new() -> Self {
        Self {
            font_system: Mutex::new(FontSystem::new()),
            swash_cache: Mutex::new(SwashCache::new()),
        }
    }

    /// Build a context seeded with caller-provided font bytes instead of a
    /// system font scan. Fallback still goes through the font database.
    pub fn with_fonts(bytes: &[u8]) -> Self {
        let src = fontdb::Source::Binary(Arc::new(bytes.to_vec()));
        Self {
            font_system: Mutex::new(FontSystem::new_with_fonts([src])),
            swash_cache: Mutex::new(SwashCache::new()),
        }
    }

    /// Register font bytes with the shared database and return a typeface
    /// for the first face in the data.
    pub fn register_font(&self, bytes: &[u8]) -> Result<Typeface, EngineError> {
        let typeface = Typeface::from_bytes(bytes.to_vec(), 0).ok_or(EngineError::BadFontData)?;
        self.font_system
            .lock()
            .db_mut()
            .load_font_data(bytes.to_vec());
        Ok(typeface)
    }

    /// Query the font database for a face matching `family` with the given
    /// weight and slant, copying the matched face out as a typeface.
    pub fn match_family(
        &self,
        family: &str,
        weight: u16,
        italic: bool,
    ) -> Result<Typeface, EngineError> {
        let query = fontdb::Query {
            families: &[fontdb::Family::Name(family)],
            weight: fontdb::Weight(weight),
            stretch: fontdb::Stretch::Normal,
            style: if italic {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };
        let fs = self.font_system.lock();
        let id = fs.db().query(&query).ok_or(EngineError::NoMatchingFace)?;
        fs.db()
            .with_face_data(id, |data, index| Typeface::from_bytes(data.to_vec(), index))
            .flatten()
            .ok_or(EngineError::BadFontData)
    }

    /// Number of faces currently known to the shared database.
    pub fn face_count(&self) -> usize {
        self.font_system.lock().db().len()
    }

    pub(crate) fn font_system(&self) -> MutexGuard<'_, FontSystem> {
        self.font_system.lock()
    }

    /// Lock both the font system and the glyph cache, in a fixed order.
    pub(crate) fn text_locks(&self) -> (MutexGuard<'_, FontSystem>, MutexGuard<'_, SwashCache>) {
        (self.font_system.lock(), self.swash_cache.lock())
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_garbage() {
        let ctx = EngineContext::new();
        assert!(ctx.register_font(b"definitely not a font").is_err());
    }

    #[test]
    fn face_count_is_stable_across_queries() {
        let ctx = EngineContext::new();
        let n = ctx.face_count();
        let _ = ctx.match_family("no-such-family-xyz", 400, false);
        assert_eq!(ctx.face_count(), n);
    }
}
