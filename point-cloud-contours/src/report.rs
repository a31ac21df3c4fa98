/// JSON run report describing what a generation request produced.
use crate::compositor::{ClassOutcome, ClassStatus};
use crate::config::GenerationRequest;
use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub input: String,
    pub output: String,
    pub spacing: f64,
    pub line_width: f32,
    pub canvas: CanvasInfo,
    pub point_count: usize,
    pub classes: Vec<ClassOutcome>,
}

#[derive(Debug, Serialize)]
pub struct CanvasInfo {
    pub width_px: u32,
    pub height_px: u32,
    pub dpi: f32,
}

impl RunReport {
    pub fn new(
        input: &Path,
        output: &Path,
        request: &GenerationRequest,
        point_count: usize,
        classes: Vec<ClassOutcome>,
    ) -> Self {
        let (width_px, height_px) = request.canvas.pixel_size();
        Self {
            input: input.display().to_string(),
            output: output.display().to_string(),
            spacing: request.spacing,
            line_width: request.line_width,
            canvas: CanvasInfo {
                width_px,
                height_px,
                dpi: request.canvas.dpi,
            },
            point_count,
            classes,
        }
    }

    pub fn drawn_count(&self) -> usize {
        self.classes
            .iter()
            .filter(|c| c.status == ClassStatus::Drawn)
            .count()
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        info!("Generated run report: {}", path.display());
        self.log_summary();
        Ok(())
    }

    fn log_summary(&self) {
        info!("Report Summary:");
        info!("  Points: {}", self.point_count);
        info!(
            "  Classes drawn: {} of {}",
            self.drawn_count(),
            self.classes.len()
        );
        for class in &self.classes {
            match class.status {
                ClassStatus::Drawn => info!(
                    "  Class {} ({}): {} contours over {} levels",
                    class.code, class.label, class.contour_count, class.level_count
                ),
                ClassStatus::Skipped(reason) => info!(
                    "  Class {} ({}): skipped, {}",
                    class.code, class.label, reason
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InsufficientData;
    use crate::style::Rgb;

    #[test]
    fn report_round_trips_through_json_file() {
        let outcomes = vec![
            ClassOutcome {
                code: 2,
                label: "Ground".to_string(),
                colour: Rgb::new(255, 255, 255),
                point_count: 500,
                status: ClassStatus::Drawn,
                level_count: 40,
                contour_count: 52,
            },
            ClassOutcome {
                code: 9,
                label: "Water".to_string(),
                colour: Rgb::new(0, 0, 255),
                point_count: 10,
                status: ClassStatus::Skipped(InsufficientData::TooFewPoints),
                level_count: 0,
                contour_count: 0,
            },
        ];
        let report = RunReport::new(
            Path::new("tile.laz"),
            Path::new("tile.png"),
            &GenerationRequest::default(),
            510,
            outcomes,
        );
        assert_eq!(report.drawn_count(), 1);

        let path = std::env::temp_dir().join(format!("contour-report-{}.json", std::process::id()));
        report.write(&path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(value["canvas"]["width_px"], 6000);
        assert_eq!(value["classes"][0]["status"], "drawn");
        assert_eq!(value["classes"][1]["reason"], "too_few_points");
    }
}
