//! CPU raster surface and its canvas.
//!
//! A [`Surface`] owns the pixel buffer; its [`Canvas`] is only ever handed
//! out as a borrowed reference and carries the save/restore stack of
//! transform + clip state. All rasterization is tiny-skia's; glyph coverage
//! for text runs comes from swash.

use tiny_skia::{
    ColorU8, FillRule, FilterQuality, Mask, PathBuilder, Pixmap, PixmapPaint, Rect, Shader,
    Transform,
};

use crate::error::EngineError;
use crate::image_data::Image;
use crate::paint::{Paint, PaintStyle};
use crate::path::Path;
use crate::typeface::TextRun;

#[derive(Clone)]
struct CanvasState {
    transform: Transform,
    clip: Option<Mask>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            clip: None,
        }
    }
}

enum Saved {
    State(CanvasState),
    Layer {
        state: CanvasState,
        below: Pixmap,
        opacity: f32,
    },
}

pub struct Canvas {
    pixmap: Pixmap,
    current: CanvasState,
    saved: Vec<Saved>,
}

pub struct Surface {
    canvas: Canvas,
}

impl Surface {
    /// Allocate a raster surface. Zero dimensions are a recoverable failure.
    pub fn new_raster(width: u32, height: u32) -> Result<Self, EngineError> {
        let pixmap = Pixmap::new(width, height).ok_or(EngineError::PixmapAlloc { width, height })?;
        Ok(Self {
            canvas: Canvas {
                pixmap,
                current: CanvasState::default(),
                saved: Vec::new(),
            },
        })
    }

    pub fn width(&self) -> u32 {
        self.canvas.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.pixmap.height()
    }

    /// Borrow the surface's canvas. The canvas lives exactly as long as the
    /// surface; it is never owned by the caller.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, EngineError> {
        self.canvas
            .pixmap
            .encode_png()
            .map_err(|e| EngineError::PngEncode(e.to_string()))
    }

    /// Premultiplied RGBA of one pixel, packed big-endian. `None` when out
    /// of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.canvas
            .pixmap
            .pixel(x, y)
            .map(|c| u32::from_be_bytes([c.red(), c.green(), c.blue(), c.alpha()]))
    }
}

impl Canvas {
    pub fn save(&mut self) {
        self.saved.push(Saved::State(self.current.clone()));
    }

    /// Redirect subsequent drawing into a transparent offscreen layer; the
    /// matching `restore` composites it back modulated by `opacity`.
    pub fn save_layer(&mut self, opacity: f32) {
        let Some(blank) = Pixmap::new(self.pixmap.width(), self.pixmap.height()) else {
            self.save();
            return;
        };
        let below = std::mem::replace(&mut self.pixmap, blank);
        self.saved.push(Saved::Layer {
            state: self.current.clone(),
            below,
            opacity: opacity.clamp(0.0, 1.0),
        });
    }

    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(Saved::State(state)) => self.current = state,
            Some(Saved::Layer {
                state,
                below,
                opacity,
            }) => {
                let layer = std::mem::replace(&mut self.pixmap, below);
                self.pixmap.draw_pixmap(
                    0,
                    0,
                    layer.as_ref(),
                    &PixmapPaint {
                        opacity,
                        blend_mode: tiny_skia::BlendMode::SourceOver,
                        quality: FilterQuality::Nearest,
                    },
                    Transform::identity(),
                    None,
                );
                self.current = state;
            }
            None => {}
        }
    }

    /// Number of states on the stack, including the active one.
    pub fn save_count(&self) -> usize {
        self.saved.len() + 1
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.current.transform = self.current.transform.pre_translate(dx, dy);
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.current.transform = self
            .current
            .transform
            .pre_concat(Transform::from_scale(sx, sy));
    }

    /// Rotate about the origin, in degrees.
    pub fn rotate(&mut self, degrees: f32) {
        self.current.transform = self
            .current
            .transform
            .pre_concat(Transform::from_rotate(degrees));
    }

    /// Concatenate a row-major 2x3 affine matrix.
    pub fn concat(&mut self, m: [f32; 6]) {
        let [sx, kx, ky, sy, tx, ty] = m;
        self.current.transform = self
            .current
            .transform
            .pre_concat(Transform::from_row(sx, ky, kx, sy, tx, ty));
    }

    /// Replace the pixels inside the current clip with `rgba`. The transform
    /// is ignored; without a clip the whole surface is filled.
    pub fn clear(&mut self, rgba: u32) {
        let [r, g, b, a] = rgba.to_be_bytes();
        let color = tiny_skia::Color::from_rgba8(r, g, b, a);
        let Some(mask) = self.current.clip.as_ref() else {
            self.pixmap.fill(color);
            return;
        };
        let Some(full) = Rect::from_xywh(
            0.0,
            0.0,
            self.pixmap.width() as f32,
            self.pixmap.height() as f32,
        ) else {
            return;
        };
        let paint = tiny_skia::Paint {
            shader: Shader::SolidColor(color),
            blend_mode: tiny_skia::BlendMode::Source,
            anti_alias: false,
            ..Default::default()
        };
        self.pixmap
            .fill_rect(full, &paint, Transform::identity(), Some(mask));
    }

    /// Intersect the clip with a rectangle in user space.
    pub fn clip_rect(&mut self, x: f32, y: f32, w: f32, h: f32, anti_alias: bool) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let transform = self.current.transform;
        match self.current.clip.as_mut() {
            Some(mask) => mask.intersect_path(&path, FillRule::Winding, anti_alias, transform),
            None => {
                if let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) {
                    mask.fill_path(&path, FillRule::Winding, anti_alias, transform);
                    self.current.clip = Some(mask);
                }
            }
        }
    }

    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint) {
        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);
        let Some(path) = pb.finish() else {
            return;
        };
        // Lines are always stroked, whatever the paint style says.
        self.pixmap.stroke_path(
            &path,
            &paint.ts_paint(),
            &paint.ts_stroke(),
            self.current.transform,
            self.current.clip.as_ref(),
        );
    }

    pub fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: &Paint) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        self.draw_ts_path(&path, paint);
    }

    pub fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        let Some(path) = PathBuilder::from_circle(cx, cy, radius) else {
            return;
        };
        self.draw_ts_path(&path, paint);
    }

    pub fn draw_path(&mut self, path: &Path, paint: &Paint) {
        let Some(path) = path.snapshot() else {
            return;
        };
        self.draw_ts_path(&path, paint);
    }

    pub fn draw_image(&mut self, image: &Image, x: f32, y: f32, paint: Option<&Paint>) {
        let transform = self.current.transform.pre_translate(x, y);
        self.blit(image.pixmap().as_ref(), transform, paint, FilterQuality::Nearest);
    }

    /// Draw the `src` portion of `image` scaled into the `dst` rectangle,
    /// both given as (x, y, w, h). Only `dst` is touched: the mapped image
    /// extends past it whenever `src` is a sub-rectangle, so the blit is
    /// constrained by a mask over `dst`.
    pub fn draw_image_rect(
        &mut self,
        image: &Image,
        src: [f32; 4],
        dst: [f32; 4],
        paint: Option<&Paint>,
    ) {
        let [sx, sy, sw, sh] = src;
        let [dx, dy, dw, dh] = dst;
        if sw <= 0.0 || sh <= 0.0 || dw <= 0.0 || dh <= 0.0 {
            return;
        }
        let Some(dst_rect) = Rect::from_xywh(dx, dy, dw, dh) else {
            return;
        };
        let constraint = PathBuilder::from_rect(dst_rect);
        let mask = match self.current.clip.clone() {
            Some(mut m) => {
                m.intersect_path(&constraint, FillRule::Winding, false, self.current.transform);
                m
            }
            None => {
                let Some(mut m) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
                    return;
                };
                m.fill_path(&constraint, FillRule::Winding, false, self.current.transform);
                m
            }
        };
        let scale_x = dw / sw;
        let scale_y = dh / sh;
        let map = Transform::from_row(scale_x, 0.0, 0.0, scale_y, dx - sx * scale_x, dy - sy * scale_y);
        let transform = self.current.transform.pre_concat(map);
        self.pixmap.draw_pixmap(
            0,
            0,
            image.pixmap().as_ref(),
            &pixmap_paint(paint, FilterQuality::Bilinear),
            transform,
            Some(&mask),
        );
    }

    /// Draw `image` split by the `center` rectangle into nine patches:
    /// corners at their natural size, edges stretched along one axis, the
    /// middle stretched in both. `center` is in image pixels.
    pub fn draw_image_nine(
        &mut self,
        image: &Image,
        center: [f32; 4],
        dst: [f32; 4],
        paint: Option<&Paint>,
    ) {
        let (iw, ih) = (image.width() as f32, image.height() as f32);
        let [cx, cy, cw, ch] = center;
        let [dx, dy, dw, dh] = dst;
        if iw <= 0.0 || ih <= 0.0 || dw <= 0.0 || dh <= 0.0 {
            return;
        }
        let (sxs, dxs) = nine_stops(iw, cx, cx + cw, dw, dx);
        let (sys, dys) = nine_stops(ih, cy, cy + ch, dh, dy);
        for row in 0..3 {
            for col in 0..3 {
                self.draw_image_rect(
                    image,
                    [
                        sxs[col],
                        sys[row],
                        sxs[col + 1] - sxs[col],
                        sys[row + 1] - sys[row],
                    ],
                    [
                        dxs[col],
                        dys[row],
                        dxs[col + 1] - dxs[col],
                        dys[row + 1] - dys[row],
                    ],
                    paint,
                );
            }
        }
    }

    /// Rasterize a positioned glyph run through swash and composite it at
    /// (x, y), tinted by the paint color.
    pub fn draw_text_run(&mut self, run: &TextRun, x: f32, y: f32, paint: &Paint) {
        use swash::scale::{Render, ScaleContext, Source};

        let Some(font) = run.typeface().as_font() else {
            return;
        };
        let mut context = ScaleContext::new();
        let mut scaler = context
            .builder(font)
            .size(run.size().max(1.0))
            .hint(true)
            .build();
        let [r, g, b, a] = paint.color;

        for (glyph_id, [gx, gy]) in run.glyphs() {
            let Some(img) = Render::new(&[
                Source::ColorBitmap(swash::scale::StrikeWith::BestFit),
                Source::ColorOutline(0),
                Source::Outline,
            ])
            .render(&mut scaler, glyph_id)
            else {
                continue;
            };
            let (w, h) = (img.placement.width, img.placement.height);
            if w == 0 || h == 0 {
                continue;
            }
            let Some(mut pm) = Pixmap::new(w, h) else {
                continue;
            };
            match img.content {
                swash::scale::image::Content::Mask => {
                    for (dst, &coverage) in pm.pixels_mut().iter_mut().zip(img.data.iter()) {
                        let alpha = ((coverage as u16 * a as u16) / 255) as u8;
                        *dst = ColorU8::from_rgba(r, g, b, alpha).premultiply();
                    }
                }
                swash::scale::image::Content::Color => {
                    for (dst, px) in pm.pixels_mut().iter_mut().zip(img.data.chunks_exact(4)) {
                        *dst = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
                    }
                }
                swash::scale::image::Content::SubpixelMask => {
                    // Collapse subpixel coverage to its green channel.
                    for (dst, px) in pm.pixels_mut().iter_mut().zip(img.data.chunks_exact(4)) {
                        let alpha = ((px[1] as u16 * a as u16) / 255) as u8;
                        *dst = ColorU8::from_rgba(r, g, b, alpha).premultiply();
                    }
                }
            }
            let ox = x + gx + img.placement.left as f32;
            let oy = y + gy - img.placement.top as f32;
            let transform = self.current.transform.pre_translate(ox, oy);
            self.pixmap.draw_pixmap(
                0,
                0,
                pm.as_ref(),
                &PixmapPaint {
                    opacity: 1.0,
                    blend_mode: paint.blend_mode,
                    quality: FilterQuality::Nearest,
                },
                transform,
                self.current.clip.as_ref(),
            );
        }
    }

    /// Fill an axis-aligned rectangle with a solid color under the current
    /// transform and clip. Used by paragraph painting for glyph coverage.
    pub(crate) fn fill_glyph_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: tiny_skia::Color) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let paint = tiny_skia::Paint {
            shader: Shader::SolidColor(color),
            anti_alias: false,
            ..Default::default()
        };
        self.pixmap.fill_rect(
            rect,
            &paint,
            self.current.transform,
            self.current.clip.as_ref(),
        );
    }

    fn draw_ts_path(&mut self, path: &tiny_skia::Path, paint: &Paint) {
        match paint.style {
            PaintStyle::Fill => self.pixmap.fill_path(
                path,
                &paint.ts_paint(),
                FillRule::Winding,
                self.current.transform,
                self.current.clip.as_ref(),
            ),
            PaintStyle::Stroke => self.pixmap.stroke_path(
                path,
                &paint.ts_paint(),
                &paint.ts_stroke(),
                self.current.transform,
                self.current.clip.as_ref(),
            ),
        }
    }

    fn blit(
        &mut self,
        src: tiny_skia::PixmapRef<'_>,
        transform: Transform,
        paint: Option<&Paint>,
        quality: FilterQuality,
    ) {
        self.pixmap.draw_pixmap(
            0,
            0,
            src,
            &pixmap_paint(paint, quality),
            transform,
            self.current.clip.as_ref(),
        );
    }
}

fn pixmap_paint(paint: Option<&Paint>, quality: FilterQuality) -> PixmapPaint {
    PixmapPaint {
        opacity: paint.map(|p| p.color[3] as f32 / 255.0).unwrap_or(1.0),
        blend_mode: paint
            .map(|p| p.blend_mode)
            .unwrap_or(tiny_skia::BlendMode::SourceOver),
        quality,
    }
}

/// Patch stops along one axis: the source splits at the center rectangle,
/// the destination keeps the fixed margins at natural size unless together
/// they overflow the target span.
fn nine_stops(total: f32, c0: f32, c1: f32, dst_total: f32, dst_start: f32) -> ([f32; 4], [f32; 4]) {
    let c0 = c0.clamp(0.0, total);
    let c1 = c1.clamp(c0, total);
    let (lead, trail) = (c0, total - c1);
    let fixed = lead + trail;
    let scale = if fixed > dst_total && fixed > 0.0 {
        dst_total / fixed
    } else {
        1.0
    };
    let src = [0.0, c0, c1, total];
    let dst = [
        dst_start,
        dst_start + lead * scale,
        dst_start + dst_total - trail * scale,
        dst_start + dst_total,
    ];
    (src, dst)
}
