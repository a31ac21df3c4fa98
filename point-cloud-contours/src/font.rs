/// Label typeface: bundled DejaVu Sans outlines laid out with ttf-parser
use crate::error::Result;
use tiny_skia::{Path, PathBuilder};
use ttf_parser::{Face, OutlineBuilder};

const DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Feeds glyph outlines into a tiny-skia path, flipping font y-up into pixel y-down.
struct PathSink<'a> {
    builder: &'a mut PathBuilder,
    scale: f32,
    offset: (f32, f32),
}

impl PathSink<'_> {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.offset.0 + x * self.scale, self.offset.1 - y * self.scale)
    }
}

impl OutlineBuilder for PathSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

pub struct LabelFont<'a> {
    face: Face<'a>,
}

impl LabelFont<'static> {
    /// The typeface shipped with the crate.
    pub fn bundled() -> Result<Self> {
        LabelFont::parse(DEJAVU_SANS)
    }
}

impl<'a> LabelFont<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        Ok(Self {
            face: Face::parse(data, 0)?,
        })
    }

    fn scale(&self, size_px: f32) -> f32 {
        size_px / self.face.units_per_em().max(1) as f32
    }

    /// Horizontal advance of `text` at `size_px` per em.
    pub fn text_width(&self, text: &str, size_px: f32) -> f32 {
        let scale = self.scale(size_px);
        text.chars()
            .filter_map(|c| self.face.glyph_index(c))
            .map(|gid| self.face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale)
            .sum()
    }

    /// Height of digits above the baseline.
    pub fn cap_height(&self, size_px: f32) -> f32 {
        let units = self
            .face
            .glyph_index('0')
            .and_then(|gid| self.face.glyph_bounding_box(gid))
            .map(|bbox| bbox.y_max)
            .or_else(|| self.face.capital_height())
            .unwrap_or_else(|| self.face.ascender());
        units as f32 * self.scale(size_px)
    }

    /// Outline of `text` centred on the origin, running along +x in pixel space.
    /// `None` when no character has an outline.
    pub fn centred_path(&self, text: &str, size_px: f32) -> Option<Path> {
        let scale = self.scale(size_px);
        let mut builder = PathBuilder::new();
        let mut pen = -self.text_width(text, size_px) * 0.5;
        let baseline = self.cap_height(size_px) * 0.5;

        for c in text.chars() {
            let Some(gid) = self.face.glyph_index(c) else {
                continue;
            };
            let mut sink = PathSink {
                builder: &mut builder,
                scale,
                offset: (pen, baseline),
            };
            // Spaces have no outline; the advance still applies.
            let _ = self.face.outline_glyph(gid, &mut sink);
            pen += self.face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale;
        }

        builder.finish()
    }
}
