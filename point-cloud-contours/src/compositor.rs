//! Multi-class contour compositing.
//!
//! Each selected class runs filter → grid → interpolate → levels → extract
//! independently (in parallel across classes). The resulting layers are then
//! drawn strictly in selection order onto the shared canvas, so later classes
//! cover earlier ones, and progress is reported once per class.

use crate::bounds::PointCloudBounds;
use crate::canvas::{Canvas, Layer};
use crate::contour::{ContourSet, extract};
use crate::error::{ContourError, InsufficientData, Result};
use crate::grid::Grid;
use crate::interpolation::interpolate;
use crate::levels::levels;
use crate::point_cloud::PointCloud;
use crate::style::{Rgb, StyleMap};
use constants::contour::MIN_CLASS_POINTS;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Receives the completed fraction of a request after every class.
pub trait ProgressSink {
    fn report(&mut self, fraction: f32);
}

impl<F: FnMut(f32)> ProgressSink for F {
    fn report(&mut self, fraction: f32) {
        self(fraction)
    }
}

/// Progress sink that discards every notification.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _fraction: f32) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ClassStatus {
    Drawn,
    Skipped(InsufficientData),
}

/// What happened to one selected class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassOutcome {
    pub code: u8,
    pub label: String,
    pub colour: Rgb,
    pub point_count: usize,
    #[serde(flatten)]
    pub status: ClassStatus,
    pub level_count: usize,
    pub contour_count: usize,
}

/// Finished canvas plus the per-class outcomes, in selection order.
pub struct Composite {
    pub canvas: Canvas,
    pub outcomes: Vec<ClassOutcome>,
}

/// Derived per-class data, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedClass {
    pub code: u8,
    pub point_count: usize,
    pub bounds: Option<PointCloudBounds>,
    pub level_count: usize,
    pub contours: std::result::Result<ContourSet, InsufficientData>,
}

pub struct LayerCompositor<'a> {
    styles: &'a StyleMap,
    spacing: f64,
    line_width: f32,
}

impl<'a> LayerCompositor<'a> {
    /// Validate the request-wide parameters up front.
    pub fn new(styles: &'a StyleMap, spacing: f64, line_width: f32) -> Result<Self> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(ContourError::invalid(format!(
                "grid spacing must be positive, got {}",
                spacing
            )));
        }
        if !(line_width.is_finite() && line_width > 0.0) {
            return Err(ContourError::invalid(format!(
                "line width must be positive, got {}",
                line_width
            )));
        }

        Ok(Self {
            styles,
            spacing,
            line_width,
        })
    }

    /// Run the per-class pipeline for `code` without touching any canvas.
    pub fn prepare_class(&self, cloud: &PointCloud, code: u8) -> Result<PreparedClass> {
        let subset = cloud.filter(code);
        let point_count = subset.len();
        let bounds = subset.bounds();

        let mut prepared = PreparedClass {
            code,
            point_count,
            bounds,
            level_count: 0,
            contours: Err(InsufficientData::TooFewPoints),
        };

        if point_count < MIN_CLASS_POINTS {
            return Ok(prepared);
        }

        let grid = Grid::build(&subset, self.spacing)?;
        let field = match interpolate(&subset, &grid) {
            Ok(field) => field,
            Err(ContourError::InsufficientData(reason)) => {
                prepared.contours = Err(reason);
                return Ok(prepared);
            }
            Err(e) => return Err(e),
        };

        if field.is_fully_masked() {
            prepared.contours = Err(InsufficientData::FullyMasked);
            return Ok(prepared);
        }

        let level_set = levels(&subset);
        debug!(
            "Class {}: {}x{} grid, {} valid cells, {} levels",
            code,
            grid.width(),
            grid.height(),
            field.valid_count(),
            level_set.len()
        );

        prepared.level_count = level_set.len();
        prepared.contours = Ok(extract(&field, &level_set));
        Ok(prepared)
    }

    /// Draw every class of `classes` onto `canvas` in order.
    pub fn composite(
        &self,
        mut canvas: Canvas,
        cloud: &PointCloud,
        classes: &[u8],
        progress: &mut dyn ProgressSink,
    ) -> Result<Composite> {
        info!(
            "Compositing {} classes from {} points",
            classes.len(),
            cloud.len()
        );

        // Collecting from an indexed parallel iterator keeps selection order.
        let prepared: Vec<PreparedClass> = classes
            .par_iter()
            .map(|&code| self.prepare_class(cloud, code))
            .collect::<Result<Vec<_>>>()?;

        // Only classes that produce a layer contribute to the view.
        if canvas.frame().is_none() {
            let mut extent = PointCloudBounds::new();
            for bounds in prepared
                .iter()
                .filter(|p| p.contours.is_ok())
                .filter_map(|p| p.bounds.as_ref())
            {
                extent.merge(bounds);
            }
            canvas.set_frame(&extent);
        }

        if classes.is_empty() {
            progress.report(1.0);
        }

        let mut outcomes = Vec::with_capacity(prepared.len());
        for (i, class) in prepared.iter().enumerate() {
            let style = self.styles.style(class.code);

            let (status, contour_count) = match &class.contours {
                Ok(contours) => {
                    canvas.draw_layer(&Layer {
                        contours,
                        colour: style.colour,
                        line_width: self.line_width,
                    })?;
                    debug!(
                        "Class {} ({}): drew {} contours",
                        class.code,
                        style.label,
                        contours.len()
                    );
                    (ClassStatus::Drawn, contours.len())
                }
                Err(reason) => {
                    warn!(
                        "Skipping class {} ({}): {} ({} points)",
                        class.code, style.label, reason, class.point_count
                    );
                    (ClassStatus::Skipped(*reason), 0)
                }
            };

            outcomes.push(ClassOutcome {
                code: class.code,
                label: style.label,
                colour: style.colour,
                point_count: class.point_count,
                status,
                level_count: class.level_count,
                contour_count,
            });

            progress.report((i + 1) as f32 / classes.len() as f32);
        }

        let drawn = outcomes
            .iter()
            .filter(|o| o.status == ClassStatus::Drawn)
            .count();
        info!(
            "Composited {} of {} classes ({} skipped)",
            drawn,
            outcomes.len(),
            outcomes.len() - drawn
        );

        Ok(Composite { canvas, outcomes })
    }
}

/// Contract-level entry point mirroring the request shape.
pub fn composite(
    canvas: Canvas,
    cloud: &PointCloud,
    classes: &[u8],
    styles: &StyleMap,
    spacing: f64,
    line_width: f32,
    progress: &mut dyn ProgressSink,
) -> Result<Composite> {
    LayerCompositor::new(styles, spacing, line_width)?.composite(canvas, cloud, classes, progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasSpec;

    fn plane_points(code: u8, n: usize) -> Vec<(f64, f64, f64, u8)> {
        (0..n)
            .map(|i| {
                let x = (i % 10) as f64;
                let y = (i / 10) as f64;
                (x, y, x + y * 0.5, code)
            })
            .collect()
    }

    fn canvas() -> Canvas {
        Canvas::new(CanvasSpec {
            width_in: 2.0,
            height_in: 2.0,
            dpi: 32.0,
            ..CanvasSpec::default()
        })
        .unwrap()
    }

    #[test]
    fn invalid_parameters_fail_before_processing() {
        let styles = StyleMap::new();
        assert!(matches!(
            LayerCompositor::new(&styles, 0.0, 1.0),
            Err(ContourError::InvalidParameter(_))
        ));
        assert!(matches!(
            LayerCompositor::new(&styles, 1.0, -0.5),
            Err(ContourError::InvalidParameter(_))
        ));
    }

    #[test]
    fn sparse_class_is_skipped_but_advances_progress() {
        let mut points = plane_points(2, 99);
        points.extend(plane_points(3, 100));
        let cloud = PointCloud::from_points(points);
        let styles = StyleMap::new();

        let mut reported = Vec::new();
        let mut sink = |f: f32| reported.push(f);
        let result = composite(canvas(), &cloud, &[2, 3], &styles, 1.0, 1.0, &mut sink).unwrap();

        assert_eq!(reported, vec![0.5, 1.0]);
        assert_eq!(
            result.outcomes[0].status,
            ClassStatus::Skipped(InsufficientData::TooFewPoints)
        );
        assert_eq!(result.outcomes[1].status, ClassStatus::Drawn);
        assert!(result.outcomes[1].contour_count > 0);
        assert_eq!(result.canvas.layers_drawn(), 1);
    }

    #[test]
    fn skipped_class_does_not_widen_frame() {
        let mut points = plane_points(2, 100);
        points.extend((0..5).map(|i| (1000.0 + i as f64, 1000.0, 0.0, 7u8)));
        let cloud = PointCloud::from_points(points);
        let styles = StyleMap::new();

        let result =
            composite(canvas(), &cloud, &[2, 7], &styles, 1.0, 1.0, &mut NoProgress).unwrap();
        assert_eq!(
            result.outcomes[1].status,
            ClassStatus::Skipped(InsufficientData::TooFewPoints)
        );

        let frame = result.canvas.frame().unwrap();
        assert_eq!(frame.to_pixel(0.0, 0.0), (0.0, 64.0));
        assert_eq!(frame.to_pixel(9.0, 9.0), (64.0, 0.0));
    }

    #[test]
    fn collinear_class_is_skipped() {
        let points: Vec<_> = (0..150).map(|i| (i as f64, i as f64, 1.0, 6u8)).collect();
        let cloud = PointCloud::from_points(points);
        let styles = StyleMap::new();
        let compositor = LayerCompositor::new(&styles, 1.0, 1.0).unwrap();

        let prepared = compositor.prepare_class(&cloud, 6).unwrap();
        assert_eq!(
            prepared.contours,
            Err(InsufficientData::DegenerateTriangulation)
        );
    }

    #[test]
    fn empty_selection_completes_immediately() {
        let cloud = PointCloud::from_points(plane_points(2, 120));
        let styles = StyleMap::new();
        let mut reported = Vec::new();
        let mut sink = |f: f32| reported.push(f);

        let result = composite(canvas(), &cloud, &[], &styles, 1.0, 1.0, &mut sink).unwrap();
        assert_eq!(reported, vec![1.0]);
        assert!(result.outcomes.is_empty());
    }

    #[test]
    fn outcome_serialises_with_status() {
        let outcome = ClassOutcome {
            code: 7,
            label: "Low Point (noise)".to_string(),
            colour: Rgb::new(255, 0, 0),
            point_count: 12,
            status: ClassStatus::Skipped(InsufficientData::TooFewPoints),
            level_count: 0,
            contour_count: 0,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "too_few_points");
        assert_eq!(json["colour"], "#ff0000");
    }
}
