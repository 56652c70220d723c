//! Error type for the safe core layer.
//!
//! The FFI layer never surfaces these values directly; it converts every
//! failure into a null handle or a sentinel value and logs the cause.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("font data could not be parsed")]
    BadFontData,

    #[error("no face matched the requested family")]
    NoMatchingFace,

    #[error("image data could not be decoded: {0}")]
    BadImageData(#[from] image::ImageError),

    #[error("animation contained no frames")]
    EmptyAnimation,

    #[error("pixmap allocation failed ({width}x{height})")]
    PixmapAlloc { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    #[error("no suitable GPU adapter")]
    NoAdapter,

    #[error("GPU device request failed: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
}
