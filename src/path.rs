//! Mutable path handle built over the engine's path builder.

use tiny_skia::PathBuilder;

pub struct Path {
    builder: PathBuilder,
}

impl Path {
    pub fn new() -> Self {
        Self {
            builder: PathBuilder::new(),
        }
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.builder.quad_to(cx, cy, x, y);
    }

    pub fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.builder.cubic_to(c1x, c1y, c2x, c2y, x, y);
    }

    pub fn close(&mut self) {
        self.builder.close();
    }

    pub fn reset(&mut self) {
        self.builder = PathBuilder::new();
    }

    /// Finish a copy of the current contours. `None` when the path is empty
    /// or degenerate.
    pub(crate) fn snapshot(&self) -> Option<tiny_skia::Path> {
        self.builder.clone().finish()
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}
