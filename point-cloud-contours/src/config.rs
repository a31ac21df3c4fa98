/// Generation request settings and their JSON file form
use crate::canvas::CanvasSpec;
use crate::error::{ContourError, Result};
use crate::point_cloud::PointCloud;
use crate::style::{Rgb, StyleMap};
use constants::contour::DEFAULT_GRID_SPACING;
use constants::render_settings::DEFAULT_LINE_WIDTH_PT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Everything one contour map is generated from.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Codes to draw, bottom layer first. `None` selects every class present.
    pub classes: Option<Vec<u8>>,
    /// Colour overrides on top of the default class styles.
    pub colours: BTreeMap<u8, Rgb>,
    /// Stroke width in points.
    pub line_width: f32,
    /// Interpolation grid spacing in point cloud units.
    pub spacing: f64,
    pub canvas: CanvasSpec,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            classes: None,
            colours: BTreeMap::new(),
            line_width: DEFAULT_LINE_WIDTH_PT,
            spacing: DEFAULT_GRID_SPACING,
            canvas: CanvasSpec::default(),
        }
    }
}

impl GenerationRequest {
    /// Reject out-of-range parameters before any class is processed.
    pub fn validate(&self) -> Result<()> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(ContourError::invalid(format!(
                "grid spacing must be positive, got {}",
                self.spacing
            )));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(ContourError::invalid(format!(
                "line width must be positive, got {}",
                self.line_width
            )));
        }
        self.canvas.validate()
    }

    pub fn styles(&self) -> StyleMap {
        let mut styles = StyleMap::new();
        for (&code, &colour) in &self.colours {
            styles.set_colour(code, colour);
        }
        styles
    }

    /// Selected codes in drawing order.
    pub fn resolve_classes(&self, cloud: &PointCloud) -> Vec<u8> {
        match &self.classes {
            Some(classes) => classes.clone(),
            None => cloud.classes(),
        }
    }

    /// Overlay the values present in `file`.
    pub fn apply_file(&mut self, file: RequestFile) -> Result<()> {
        if let Some(classes) = file.classes {
            self.classes = Some(classes);
        }
        for (code, colour) in file.colours {
            self.colours.insert(code, Rgb::parse(&colour)?);
        }
        if let Some(line_width) = file.line_width {
            self.line_width = line_width;
        }
        if let Some(spacing) = file.spacing {
            self.spacing = spacing;
        }
        if let Some(dpi) = file.dpi {
            self.canvas.dpi = dpi;
        }
        if let Some(width_in) = file.width_in {
            self.canvas.width_in = width_in;
        }
        if let Some(height_in) = file.height_in {
            self.canvas.height_in = height_in;
        }
        if let Some(background) = file.background {
            self.canvas.background = Rgb::parse(&background)?;
        }
        Ok(())
    }
}

/// JSON request file; every field is optional.
///
/// ```json
/// { "classes": [2, 6], "colours": { "6": "#ff8800" }, "line_width": 0.8, "spacing": 0.5 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestFile {
    pub classes: Option<Vec<u8>>,
    pub colours: BTreeMap<u8, String>,
    pub line_width: Option<f32>,
    pub spacing: Option<f64>,
    pub dpi: Option<f32>,
    pub width_in: Option<f32>,
    pub height_in: Option<f32>,
    pub background: Option<String>,
}

impl RequestFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Parse a `CODE=COLOUR` command line pair.
pub fn parse_colour_override(text: &str) -> Result<(u8, Rgb)> {
    let (code, colour) = text
        .split_once('=')
        .ok_or_else(|| ContourError::invalid(format!("expected CODE=COLOUR, got '{}'", text)))?;
    let code = code
        .trim()
        .parse::<u8>()
        .map_err(|_| ContourError::invalid(format!("invalid classification code '{}'", code)))?;
    Ok((code, Rgb::parse(colour)?))
}
