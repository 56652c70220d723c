//! Flat C bindings for embedding a 2D raster canvas and paragraph layout
//! stack in native applications.
//!
//! This crate exposes a C-compatible function surface over a set of engine
//! crates: cosmic-text for shaping, line breaking, and font fallback,
//! tiny-skia for path rasterization, swash for glyph access, the image crate
//! for still/animated decoding, and wgpu for GPU context acquisition. The
//! crate itself contains no layout or rasterization logic; every export
//! forwards into one of those engines.
//!
//! The genuinely local concern is the ownership protocol at the boundary:
//!
//! - Factory functions return *owned handles* (`Box::into_raw`); the caller
//!   must pass each one to its paired `quill_*_release` exactly once. A null
//!   result signals a recoverable construction failure (bad bytes, no GPU
//!   adapter, zero-sized surface) and owns nothing.
//! - Accessors and mutators take *borrowed references* and never extend the
//!   lifetime of their arguments.
//! - Shared font configuration lives in an explicit [`EngineContext`] handle
//!   created once by the host and threaded into every call that shapes text,
//!   with its interior state behind locks.

pub mod canvas;
pub mod context;
pub mod error;
pub mod ffi;
pub mod gpu;
pub mod handle;
pub mod image_data;
pub mod paint;
pub mod paragraph;
pub mod path;
pub mod typeface;

pub use canvas::{Canvas, Surface};
pub use context::EngineContext;
pub use error::EngineError;
pub use gpu::GpuContext;
pub use image_data::{AnimatedImage, Image};
pub use paint::{Paint, PaintStyle};
pub use paragraph::{Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};
pub use path::Path;
pub use typeface::{TextRun, Typeface};
