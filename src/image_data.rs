//! Still and animated image handles.
//!
//! Decoding is the image crate's; decoded frames are stored premultiplied in
//! engine pixmaps so canvases can composite them directly.

use image::{AnimationDecoder, RgbaImage};
use std::io::Cursor;
use tiny_skia::{ColorU8, Pixmap};

use crate::error::EngineError;

/// A decoded, immutable RGBA image.
#[derive(Clone)]
pub struct Image {
    pixmap: Pixmap,
}

impl Image {
    /// Decode from encoded bytes (PNG, JPEG, GIF, WebP).
    pub fn decode(bytes: &[u8]) -> Result<Self, EngineError> {
        let decoded = image::load_from_memory(bytes)?;
        Self::from_rgba(decoded.to_rgba8())
    }

    fn from_rgba(buf: RgbaImage) -> Result<Self, EngineError> {
        let (width, height) = buf.dimensions();
        let mut pixmap =
            Pixmap::new(width, height).ok_or(EngineError::PixmapAlloc { width, height })?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(buf.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// A multi-frame image with a current-frame cursor.
pub struct AnimatedImage {
    frames: Vec<(Image, u32)>,
    current: usize,
}

impl AnimatedImage {
    /// Decode animated GIF or WebP bytes; anything else that decodes as a
    /// still image becomes a single-frame animation.
    pub fn decode(bytes: &[u8]) -> Result<Self, EngineError> {
        if bytes.starts_with(b"GIF8") {
            let decoder = image::codecs::gif::GifDecoder::new(Cursor::new(bytes))?;
            return Self::from_frames(decoder.into_frames().collect_frames()?);
        }
        if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
            let decoder = image::codecs::webp::WebPDecoder::new(Cursor::new(bytes))?;
            if decoder.has_animation() {
                return Self::from_frames(decoder.into_frames().collect_frames()?);
            }
        }
        let still = Image::decode(bytes)?;
        Ok(Self {
            frames: vec![(still, 0)],
            current: 0,
        })
    }

    fn from_frames(frames: Vec<image::Frame>) -> Result<Self, EngineError> {
        let mut out = Vec::with_capacity(frames.len());
        for frame in frames {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let duration_ms = if denom == 0 { 0 } else { numer / denom };
            out.push((Image::from_rgba(frame.into_buffer())?, duration_ms));
        }
        if out.is_empty() {
            return Err(EngineError::EmptyAnimation);
        }
        Ok(Self {
            frames: out,
            current: 0,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Loop count. The decoders do not surface it, so animations report
    /// infinite repetition (-1).
    pub fn repetition_count(&self) -> i32 {
        if self.frames.len() > 1 {
            -1
        } else {
            0
        }
    }

    /// Advance to the next frame, wrapping at the end. Returns the new
    /// current frame's duration in milliseconds, or -1 for still images.
    pub fn decode_next_frame(&mut self) -> i32 {
        if self.frames.len() <= 1 {
            return -1;
        }
        self.current = (self.current + 1) % self.frames.len();
        self.frames[self.current].1 as i32
    }

    /// A detached copy of the current frame.
    pub fn current_frame(&self) -> Image {
        self.frames[self.current].0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest valid GIF89a: one 1x1 transparent frame.
    const TINY_GIF: &[u8] = &[
        0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
        0x00, 0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00,
        0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
    ];

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(Image::decode(b"not an image").is_err());
        assert!(AnimatedImage::decode(b"not an image").is_err());
        assert!(Image::decode(&[]).is_err());
    }

    #[test]
    fn single_frame_gif_decodes() {
        let anim = AnimatedImage::decode(TINY_GIF).unwrap();
        assert_eq!(anim.frame_count(), 1);
        assert_eq!(anim.repetition_count(), 0);
        let frame = anim.current_frame();
        assert_eq!((frame.width(), frame.height()), (1, 1));
    }

    #[test]
    fn still_image_never_advances() {
        let mut anim = AnimatedImage::decode(TINY_GIF).unwrap();
        assert_eq!(anim.decode_next_frame(), -1);
        assert_eq!(anim.decode_next_frame(), -1);
    }
}
