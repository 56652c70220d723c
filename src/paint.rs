//! Paint state applied to canvas draw calls.

use tiny_skia::{BlendMode, Color, Shader, Stroke};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaintStyle {
    Fill,
    Stroke,
}

/// Color, style, and blending for a draw call. Colors are non-premultiplied
/// RGBA, one byte per channel.
#[derive(Clone, Debug)]
pub struct Paint {
    pub color: [u8; 4],
    pub anti_alias: bool,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub blend_mode: BlendMode,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: [0, 0, 0, 255],
            anti_alias: true,
            style: PaintStyle::Fill,
            stroke_width: 1.0,
            blend_mode: BlendMode::SourceOver,
        }
    }
}

impl Paint {
    /// Set the color from a packed 0xRRGGBBAA value.
    pub fn set_color_rgba(&mut self, rgba: u32) {
        self.color = rgba.to_be_bytes();
    }

    pub(crate) fn ts_color(&self) -> Color {
        let [r, g, b, a] = self.color;
        Color::from_rgba8(r, g, b, a)
    }

    pub(crate) fn ts_paint(&self) -> tiny_skia::Paint<'static> {
        tiny_skia::Paint {
            shader: Shader::SolidColor(self.ts_color()),
            blend_mode: self.blend_mode,
            anti_alias: self.anti_alias,
            ..Default::default()
        }
    }

    pub(crate) fn ts_stroke(&self) -> Stroke {
        Stroke {
            width: self.stroke_width.max(0.0),
            ..Default::default()
        }
    }
}
