//! Raster surface shared by every contour layer of a request.
//!
//! The canvas owns the pixel buffer, the background and the single
//! data-to-pixel frame. Layers are stroked in the order they arrive, each
//! covering whatever was drawn before it.

use crate::bounds::PointCloudBounds;
use crate::contour::{Contour, ContourSet};
use crate::error::{ContourError, Result};
use crate::font::LabelFont;
use crate::labels::{LabelAnchor, offset_of, path_length, split_around};
use crate::style::Rgb;
use constants::render_settings::{
    BACKGROUND_COLOUR, DEFAULT_DPI, DEFAULT_FIGURE_HEIGHT_IN, DEFAULT_FIGURE_WIDTH_IN,
    LABEL_COLOUR, LABEL_FONT_SIZE_PT, LABEL_INLINE_SPACING, POINTS_PER_INCH,
};
use tiny_skia::{Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Physical output size; pixel dimensions follow from inches times dpi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSpec {
    pub width_in: f32,
    pub height_in: f32,
    pub dpi: f32,
    pub background: Rgb,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width_in: DEFAULT_FIGURE_WIDTH_IN,
            height_in: DEFAULT_FIGURE_HEIGHT_IN,
            dpi: DEFAULT_DPI,
            background: Rgb::from_array(BACKGROUND_COLOUR),
        }
    }
}

impl CanvasSpec {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width_in),
            ("height", self.height_in),
            ("dpi", self.dpi),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ContourError::invalid(format!(
                    "canvas {} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round().max(1.0) as u32,
            (self.height_in * self.dpi).round().max(1.0) as u32,
        )
    }

    /// Convert a typographic size (1/72 inch) to pixels.
    pub fn points_to_pixels(&self, points: f32) -> f32 {
        points * self.dpi / POINTS_PER_INCH
    }
}

/// Mapping from point cloud coordinates to pixels.
/// The extent fills the raster edge to edge with y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFrame {
    bounds: PointCloudBounds,
    width_px: f64,
    height_px: f64,
}

impl CanvasFrame {
    pub fn new(bounds: &PointCloudBounds, width_px: u32, height_px: u32) -> Self {
        Self {
            bounds: *bounds,
            width_px: width_px as f64,
            height_px: height_px as f64,
        }
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.bounds.normalize_x(x) * self.width_px,
            (1.0 - self.bounds.normalize_y(y)) * self.height_px,
        )
    }

    /// Carry a data-space anchor into pixels, renormalising its direction.
    /// `None` when the direction collapses on a flat extent.
    pub fn map_anchor(&self, anchor: LabelAnchor) -> Option<LabelAnchor> {
        let (x, y) = self.to_pixel(anchor.x, anchor.y);
        let (tx, ty) = self.to_pixel(anchor.x + anchor.dx, anchor.y + anchor.dy);
        let (dx, dy) = (tx - x, ty - y);
        let length = (dx * dx + dy * dy).sqrt();
        if !length.is_finite() || length <= 0.0 {
            return None;
        }

        Some(LabelAnchor {
            x,
            y,
            dx: dx / length,
            dy: dy / length,
        })
    }
}

/// A class's contours with the stroke style they are drawn in.
#[derive(Debug, Clone, Copy)]
pub struct Layer<'a> {
    pub contours: &'a ContourSet,
    pub colour: Rgb,
    /// Stroke width in points.
    pub line_width: f32,
}

pub struct Canvas {
    pixmap: Pixmap,
    spec: CanvasSpec,
    frame: Option<CanvasFrame>,
    font: LabelFont<'static>,
    layers_drawn: usize,
}

impl Canvas {
    /// Allocate the raster and paint the background.
    pub fn new(spec: CanvasSpec) -> Result<Self> {
        spec.validate()?;
        let (width, height) = spec.pixel_size();
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ContourError::invalid(format!("cannot allocate {}x{} canvas", width, height))
        })?;

        let bg = spec.background;
        pixmap.fill(Color::from_rgba8(bg.r, bg.g, bg.b, 255));

        Ok(Self {
            pixmap,
            spec,
            frame: None,
            font: LabelFont::bundled()?,
            layers_drawn: 0,
        })
    }

    /// Fix the coordinate frame every subsequent layer is drawn in.
    pub fn set_frame(&mut self, bounds: &PointCloudBounds) {
        self.frame = Some(CanvasFrame::new(bounds, self.width(), self.height()));
    }

    pub fn frame(&self) -> Option<CanvasFrame> {
        self.frame
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn layers_drawn(&self) -> usize {
        self.layers_drawn
    }

    /// Colour at pixel (`x`, `y`), `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgb::new(c.red(), c.green(), c.blue()))
    }

    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixmap.pixels().iter().map(|p| {
            let c = p.demultiply();
            Rgb::new(c.red(), c.green(), c.blue())
        })
    }

    /// Stroke every contour of `layer`, then its inline labels, over the current content.
    pub fn draw_layer(&mut self, layer: &Layer) -> Result<()> {
        let frame = self
            .frame
            .ok_or_else(|| ContourError::invalid("canvas frame not established"))?;
        if !(layer.line_width.is_finite() && layer.line_width > 0.0) {
            return Err(ContourError::invalid(format!(
                "line width must be positive, got {}",
                layer.line_width
            )));
        }

        let mut line_paint = Paint::default();
        line_paint.set_color_rgba8(layer.colour.r, layer.colour.g, layer.colour.b, 255);
        line_paint.anti_alias = true;

        let line_stroke = Stroke {
            width: self.spec.points_to_pixels(layer.line_width),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        let font_px = self.spec.points_to_pixels(LABEL_FONT_SIZE_PT);
        let mut labels = Vec::new();

        for contour in &layer.contours.contours {
            let pixels = to_pixels(&frame, contour);
            match self.place_label(&frame, contour, &pixels, font_px) {
                Some((anchor, centre, gap)) => {
                    let (before, after) =
                        split_around(&pixels, centre - gap * 0.5, centre + gap * 0.5);
                    self.stroke_polyline(&before, false, &line_paint, &line_stroke);
                    self.stroke_polyline(&after, false, &line_paint, &line_stroke);
                    labels.push((anchor, contour.label.as_str()));
                }
                None => {
                    self.stroke_polyline(&pixels, contour.closed, &line_paint, &line_stroke);
                }
            }
        }

        for (anchor, text) in labels {
            self.draw_label(anchor, text, font_px);
        }

        self.layers_drawn += 1;
        Ok(())
    }

    /// Flatten to an RGB image for export.
    pub fn into_image(self) -> Result<image::RgbImage> {
        let (width, height) = (self.width(), self.height());
        let mut buffer = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in self.pixels() {
            buffer.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
        }

        image::RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ContourError::invalid("canvas buffer does not match its dimensions"))
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], closed: bool, paint: &Paint, stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(points[0].0 as f32, points[0].1 as f32);
        for point in &points[1..] {
            pb.line_to(point.0 as f32, point.1 as f32);
        }
        if closed {
            pb.close();
        }

        if let Some(path) = pb.finish() {
            self.pixmap
                .stroke_path(&path, paint, stroke, Transform::identity(), None);
        }
    }

    /// Pixel anchor, arc-length centre and gap length for a contour's label.
    /// Lines shorter than a few label widths stay unlabelled.
    fn place_label(
        &self,
        frame: &CanvasFrame,
        contour: &Contour,
        pixels: &[(f64, f64)],
        font_px: f32,
    ) -> Option<(LabelAnchor, f64, f64)> {
        let gap = self.font.text_width(&contour.label, font_px) as f64
            + 2.0 * (LABEL_INLINE_SPACING * font_px) as f64;
        if gap <= 0.0 || path_length(pixels) < gap * 3.0 {
            return None;
        }

        let anchor = frame.map_anchor(contour.label_anchor()?)?;
        let centre = offset_of(pixels, (anchor.x, anchor.y));
        Some((anchor, centre, gap))
    }

    /// Fill `text` centred on `anchor`, running along its direction.
    fn draw_label(&mut self, anchor: LabelAnchor, text: &str, font_px: f32) {
        let Some(path) = self.font.centred_path(text, font_px) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(LABEL_COLOUR[0], LABEL_COLOUR[1], LABEL_COLOUR[2], 255);
        paint.anti_alias = true;

        let a = anchor.upright();
        let (dx, dy) = (a.dx as f32, a.dy as f32);
        let transform = Transform::from_row(dx, dy, -dy, dx, a.x as f32, a.y as f32);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, transform, None);
    }
}

fn to_pixels(frame: &CanvasFrame, contour: &Contour) -> Vec<(f64, f64)> {
    let mut pixels: Vec<(f64, f64)> = contour
        .points
        .iter()
        .map(|&(x, y)| frame.to_pixel(x, y))
        .collect();
    if contour.closed {
        pixels.extend(pixels.first().copied());
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_spec() -> CanvasSpec {
        CanvasSpec {
            width_in: 2.0,
            height_in: 1.0,
            dpi: 50.0,
            ..CanvasSpec::default()
        }
    }

    fn unit_bounds(size: f64) -> PointCloudBounds {
        let mut bounds = PointCloudBounds::new();
        bounds.update(0.0, 0.0, 0.0);
        bounds.update(size, size, 1.0);
        bounds
    }

    #[test]
    fn default_spec_matches_figure_size() {
        let spec = CanvasSpec::default();
        assert_eq!(spec.pixel_size(), (6000, 3000));
        assert!((spec.points_to_pixels(0.6) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn new_canvas_is_uniform_background() {
        let canvas = Canvas::new(small_spec()).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (100, 50));
        assert!(canvas.pixels().all(|p| p == Rgb::new(0, 0, 0)));
    }

    #[test]
    fn invalid_spec_is_rejected() {
        let spec = CanvasSpec {
            dpi: 0.0,
            ..small_spec()
        };
        assert!(matches!(Canvas::new(spec), Err(ContourError::InvalidParameter(_))));
    }

    #[test]
    fn frame_maps_extent_to_raster_with_y_up() {
        let frame = CanvasFrame::new(&unit_bounds(10.0), 100, 50);
        assert_eq!(frame.to_pixel(0.0, 0.0), (0.0, 50.0));
        assert_eq!(frame.to_pixel(10.0, 10.0), (100.0, 0.0));
        assert_eq!(frame.to_pixel(5.0, 5.0), (50.0, 25.0));
    }

    #[test]
    fn flat_extent_maps_to_centre() {
        let mut bounds = PointCloudBounds::new();
        bounds.update(3.0, 0.0, 0.0);
        bounds.update(3.0, 4.0, 0.0);
        let frame = CanvasFrame::new(&bounds, 100, 50);
        assert_eq!(frame.to_pixel(3.0, 4.0), (50.0, 0.0));
    }

    #[test]
    fn anchors_map_into_pixel_space() {
        let frame = CanvasFrame::new(&unit_bounds(10.0), 100, 50);
        let north = LabelAnchor {
            x: 5.0,
            y: 5.0,
            dx: 0.0,
            dy: 1.0,
        };
        let mapped = frame.map_anchor(north).unwrap();
        assert_eq!((mapped.x, mapped.y), (50.0, 25.0));
        assert_eq!((mapped.dx, mapped.dy), (0.0, -1.0));

        let mut flat = PointCloudBounds::new();
        flat.update(3.0, 0.0, 0.0);
        flat.update(3.0, 4.0, 0.0);
        let east = LabelAnchor {
            dx: 1.0,
            dy: 0.0,
            ..north
        };
        assert!(CanvasFrame::new(&flat, 100, 50).map_anchor(east).is_none());
    }

    #[test]
    fn drawing_requires_frame() {
        let mut canvas = Canvas::new(small_spec()).unwrap();
        let contours = ContourSet::default();
        let layer = Layer {
            contours: &contours,
            colour: Rgb::new(255, 0, 0),
            line_width: 1.0,
        };
        assert!(canvas.draw_layer(&layer).is_err());
    }

    #[test]
    fn layer_strokes_in_its_colour() {
        let mut canvas = Canvas::new(small_spec()).unwrap();
        canvas.set_frame(&unit_bounds(10.0));

        let contours = ContourSet {
            contours: vec![Contour {
                level: 1.0,
                label: "1.00".to_string(),
                points: vec![(0.0, 5.0), (10.0, 5.0)],
                closed: false,
            }],
        };
        let layer = Layer {
            contours: &contours,
            colour: Rgb::new(255, 0, 0),
            line_width: 4.0,
        };
        canvas.draw_layer(&layer).unwrap();

        assert_eq!(canvas.layers_drawn(), 1);
        assert_eq!(canvas.pixel(5, 25), Some(Rgb::new(255, 0, 0)));
        assert_eq!(canvas.pixel(5, 5), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn long_contours_get_inline_labels() {
        let mut canvas = Canvas::new(CanvasSpec {
            width_in: 4.0,
            height_in: 2.0,
            dpi: 100.0,
            ..CanvasSpec::default()
        })
        .unwrap();
        canvas.set_frame(&unit_bounds(10.0));

        let contours = ContourSet {
            contours: vec![Contour {
                level: 3.0,
                label: "3.00".to_string(),
                points: vec![(0.0, 5.0), (10.0, 5.0)],
                closed: false,
            }],
        };
        let layer = Layer {
            contours: &contours,
            colour: Rgb::new(0, 0, 255),
            line_width: 2.0,
        };
        canvas.draw_layer(&layer).unwrap();

        // Label glyphs blend white over the black background.
        let label_pixels = canvas
            .pixels()
            .filter(|p| p.r > 0 && p.r == p.g && p.g == p.b)
            .count();
        assert!(label_pixels > 0);
        // The stroke is interrupted under the label.
        assert_ne!(canvas.pixel(200, 100), Some(Rgb::new(0, 0, 255)));
        assert_eq!(canvas.pixel(20, 100), Some(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn short_contours_stay_unlabelled_and_unbroken() {
        let mut canvas = Canvas::new(small_spec()).unwrap();
        canvas.set_frame(&unit_bounds(10.0));

        let contours = ContourSet {
            contours: vec![Contour {
                level: 1.0,
                label: "1.00".to_string(),
                points: vec![(2.0, 5.0), (4.0, 5.0)],
                closed: false,
            }],
        };
        let layer = Layer {
            contours: &contours,
            colour: Rgb::new(255, 0, 0),
            line_width: 4.0,
        };
        canvas.draw_layer(&layer).unwrap();

        // Only red strokes blended over black; no white label.
        assert!(canvas.pixels().all(|p| p.g == 0 && p.b == 0));
        for x in 21..39 {
            assert_eq!(canvas.pixel(x, 24), Some(Rgb::new(255, 0, 0)), "x = {}", x);
        }
    }
}
