//! Paragraph styles, rich-text building, and laid-out paragraphs.
//!
//! Shaping, line breaking, and font fallback are cosmic-text's; this module
//! only assembles spans, threads the shared [`EngineContext`] through, and
//! converts between the engine's per-line cursors and the flat byte indices
//! the boundary exposes.

use cosmic_text::{Affinity, Align, Attrs, Buffer, Color, Cursor, Family, Metrics, Shaping, Style,
    Weight};
use unicode_segmentation::UnicodeSegmentation;

use crate::canvas::Canvas;
use crate::context::EngineContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
    Center,
    Justified,
    End,
}

impl TextAlign {
    fn to_align(self) -> Align {
        match self {
            TextAlign::Left => Align::Left,
            TextAlign::Right => Align::Right,
            TextAlign::Center => Align::Center,
            TextAlign::Justified => Align::Justified,
            TextAlign::End => Align::End,
        }
    }
}

/// Paragraph-wide defaults applied before any span styles.
#[derive(Clone, Debug)]
pub struct ParagraphStyle {
    pub family: Option<String>,
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    pub align: TextAlign,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            family: None,
            font_size: 16.0,
            line_height: 1.2,
            align: TextAlign::Left,
        }
    }
}

impl ParagraphStyle {
    fn metrics(&self) -> Metrics {
        let px = self.font_size.max(1.0);
        // Keep a little breathing room even for tiny line-height factors.
        let line = (px * self.line_height).max(px + 2.0);
        Metrics::new(px, line)
    }
}

/// Per-span character style. Unset fields inherit the paragraph defaults.
#[derive(Clone, Debug, Default)]
pub struct TextStyle {
    pub family: Option<String>,
    /// Non-premultiplied RGBA, packed 0xRRGGBBAA.
    pub color: Option<u32>,
    pub weight: Option<u16>,
    pub italic: bool,
}

impl TextStyle {
    fn as_attrs<'a>(&'a self, paragraph: &'a ParagraphStyle) -> Attrs<'a> {
        let mut attrs = Attrs::new();
        if let Some(family) = self.family.as_deref().or(paragraph.family.as_deref()) {
            attrs = attrs.family(Family::Name(family));
        }
        if let Some(rgba) = self.color {
            let [r, g, b, a] = rgba.to_be_bytes();
            attrs = attrs.color(Color::rgba(r, g, b, a));
        }
        if let Some(weight) = self.weight {
            attrs = attrs.weight(Weight(weight));
        }
        if self.italic {
            attrs = attrs.style(Style::Italic);
        }
        attrs
    }
}

struct Span {
    text: String,
    style: TextStyle,
}

/// Accumulates styled spans and shapes them into a [`Paragraph`].
///
/// The builder stays usable after `build`; its spans are drained but the
/// style stack is kept.
pub struct ParagraphBuilder {
    style: ParagraphStyle,
    stack: Vec<TextStyle>,
    spans: Vec<Span>,
}

impl ParagraphBuilder {
    pub fn new(style: &ParagraphStyle) -> Self {
        Self {
            style: style.clone(),
            stack: vec![TextStyle::default()],
            spans: Vec::new(),
        }
    }

    pub fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let style = self.stack.last().cloned().unwrap_or_default();
        self.spans.push(Span {
            text: text.to_owned(),
            style,
        });
    }

    pub fn push_style(&mut self, style: &TextStyle) {
        self.stack.push(style.clone());
    }

    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Shape the accumulated spans into a paragraph, draining them.
    pub fn build(&mut self, ctx: &EngineContext) -> Paragraph {
        let text: String = self.spans.iter().map(|s| s.text.as_str()).collect();

        let mut fs = ctx.font_system();
        let mut buffer = Buffer::new(&mut fs, self.style.metrics());
        let default_attrs = Attrs::new();
        let rich: Vec<(&str, Attrs)> = self
            .spans
            .iter()
            .map(|s| (s.text.as_str(), s.style.as_attrs(&self.style)))
            .collect();
        buffer.set_rich_text(
            &mut fs,
            rich,
            &default_attrs,
            Shaping::Advanced,
            Some(self.style.align.to_align()),
        );
        buffer.shape_until_scroll(&mut fs, true);
        drop(fs);

        self.spans.clear();
        Paragraph::new(buffer, text)
    }
}

/// Byte index plus affinity of a hit-test result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitPosition {
    pub index: usize,
    /// Leading edge (`false`) or trailing edge (`true`) of the hit cluster.
    pub after: bool,
}

/// One laid-out line, in paragraph coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub start: usize,
    pub end: usize,
    pub top: f32,
    pub baseline: f32,
    pub height: f32,
    pub width: f32,
}

/// A shaped paragraph. Layout state lives in the engine buffer; the original
/// text is retained for index mapping and word-boundary queries.
pub struct Paragraph {
    buffer: Buffer,
    text: String,
    line_starts: Vec<usize>,
}

impl Paragraph {
    fn new(buffer: Buffer, text: String) -> Self {
        // Byte offset of each buffer line (cosmic-text splits on '\n').
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            buffer,
            text,
            line_starts,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Re-wrap to `width` and reshape.
    pub fn layout(&mut self, ctx: &EngineContext, width: f32) {
        let mut fs = ctx.font_system();
        self.buffer.set_size(&mut fs, Some(width.max(0.0)), None);
        self.buffer.shape_until_scroll(&mut fs, true);
    }

    pub fn line_count(&self) -> usize {
        self.buffer.layout_runs().count()
    }

    pub fn line_metrics_at(&self, line: usize) -> Option<LineMetrics> {
        let run = self.buffer.layout_runs().nth(line)?;
        let line_start = self.line_starts.get(run.line_i).copied().unwrap_or(0);
        let (start, end) = run
            .glyphs
            .iter()
            .fold(None::<(usize, usize)>, |acc, g| match acc {
                None => Some((g.start, g.end)),
                Some((s, e)) => Some((s.min(g.start), e.max(g.end))),
            })
            .unwrap_or((0, 0));
        Some(LineMetrics {
            start: line_start + start,
            end: line_start + end,
            top: run.line_top,
            baseline: run.line_y,
            height: run.line_height,
            width: run.line_w,
        })
    }

    /// Line containing the given byte index, or `None` when out of range.
    pub fn line_number_at(&self, index: usize) -> Option<usize> {
        for (n, run) in self.buffer.layout_runs().enumerate() {
            // Empty lines carry a run with no glyphs and no byte coverage.
            if run.glyphs.is_empty() {
                continue;
            }
            let line_start = self.line_starts.get(run.line_i).copied().unwrap_or(0);
            let mut lo = usize::MAX;
            let mut hi = 0;
            for g in run.glyphs.iter() {
                lo = lo.min(line_start + g.start);
                hi = hi.max(line_start + g.end);
            }
            if lo <= index && index < hi {
                return Some(n);
            }
        }
        None
    }

    /// Hit-test paragraph-local coordinates to a byte index.
    pub fn hit(&self, x: f32, y: f32) -> Option<HitPosition> {
        let cursor = self.buffer.hit(x, y)?;
        let line_start = self.line_starts.get(cursor.line).copied().unwrap_or(0);
        Some(HitPosition {
            index: line_start + cursor.index,
            after: cursor.affinity == Affinity::After,
        })
    }

    /// Word containing the given byte index, as a byte range. Indices past
    /// the end clamp to the final word boundary.
    pub fn word_boundary(&self, index: usize) -> (usize, usize) {
        let mut last = (self.text.len(), self.text.len());
        for (start, word) in self.text.split_word_bound_indices() {
            let end = start + word.len();
            if index >= start && index < end {
                return (start, end);
            }
            last = (start, end);
        }
        last
    }

    /// Bounding rectangles of the glyphs covering `[start, end)`, one per
    /// affected line.
    pub fn rects_for_range(&self, start: usize, end: usize) -> Vec<[f32; 4]> {
        let mut rects = Vec::new();
        if start >= end {
            return rects;
        }
        for run in self.buffer.layout_runs() {
            let line_start = self.line_starts.get(run.line_i).copied().unwrap_or(0);
            let line_len = run.text.len();
            // Clamp the global range onto this buffer line.
            let lo = start.saturating_sub(line_start).min(line_len);
            let hi = end.saturating_sub(line_start).min(line_len);
            if lo >= hi {
                continue;
            }
            let c0 = Cursor::new(run.line_i, lo);
            let c1 = Cursor::new(run.line_i, hi);
            if let Some((x, w)) = run.highlight(c0, c1) {
                if w > 0.0 {
                    rects.push([x, run.line_top, w, run.line_height]);
                }
            }
        }
        rects
    }

    /// Widest laid-out line.
    pub fn max_intrinsic_width(&self) -> f32 {
        self.buffer
            .layout_runs()
            .fold(0.0f32, |acc, run| acc.max(run.line_w))
    }

    /// Total height of the laid-out lines.
    pub fn height(&self) -> f32 {
        self.buffer
            .layout_runs()
            .fold(0.0f32, |acc, run| acc.max(run.line_top + run.line_height))
    }

    /// Composite glyph coverage into `canvas` with the paragraph origin at
    /// (x, y). Span colors set at build time win over `default_rgba`.
    pub fn paint(&self, ctx: &EngineContext, canvas: &mut Canvas, x: f32, y: f32, default_rgba: u32) {
        let [r, g, b, a] = default_rgba.to_be_bytes();
        let default_color = Color::rgba(r, g, b, a);
        let (mut fs, mut cache) = ctx.text_locks();
        self.buffer.draw(
            &mut fs,
            &mut cache,
            default_color,
            |gx, gy, w, h, color| {
                if w == 0 || h == 0 || color.a() == 0 {
                    return;
                }
                let ts_color = tiny_skia::Color::from_rgba8(color.r(), color.g(), color.b(), color.a());
                canvas.fill_glyph_rect(x + gx as f32, y + gy as f32, w as f32, h as f32, ts_color);
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> EngineContext {
        EngineContext::new()
    }

    #[test]
    fn builder_drains_spans_and_stays_reusable() {
        let ctx = ctx();
        let style = ParagraphStyle::default();
        let mut builder = ParagraphBuilder::new(&style);
        builder.add_text("hello world");
        let p1 = builder.build(&ctx);
        assert_eq!(p1.text(), "hello world");
        let p2 = builder.build(&ctx);
        assert_eq!(p2.text(), "");
    }

    #[test]
    fn pop_never_drops_base_style() {
        let style = ParagraphStyle::default();
        let mut builder = ParagraphBuilder::new(&style);
        builder.pop();
        builder.pop();
        builder.add_text("still works");
        assert_eq!(builder.spans.len(), 1);
    }

    #[test]
    fn word_boundary_is_text_based() {
        let ctx = ctx();
        let mut builder = ParagraphBuilder::new(&ParagraphStyle::default());
        builder.add_text("alpha beta");
        let p = builder.build(&ctx);
        assert_eq!(p.word_boundary(0), (0, 5));
        assert_eq!(p.word_boundary(6), (6, 10));
        // Past-the-end clamps to the final boundary.
        assert_eq!(p.word_boundary(999), (6, 10));
    }

    #[test]
    fn line_number_handles_empty_lines_and_huge_indices() {
        let ctx = ctx();
        let mut builder = ParagraphBuilder::new(&ParagraphStyle::default());
        // The blank middle line yields a layout run with no glyphs.
        builder.add_text("a\n\nb");
        let mut p = builder.build(&ctx);
        p.layout(&ctx, 100.0);
        assert_eq!(p.line_number_at(usize::MAX), None);
        assert_eq!(p.line_number_at(9_999), None);
    }

    #[test]
    fn empty_range_has_no_rects() {
        let ctx = ctx();
        let mut builder = ParagraphBuilder::new(&ParagraphStyle::default());
        builder.add_text("abc");
        let mut p = builder.build(&ctx);
        p.layout(&ctx, 100.0);
        assert!(p.rects_for_range(2, 2).is_empty());
    }
}
