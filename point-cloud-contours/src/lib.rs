//! Contour maps from classified LAS/LAZ point clouds.
//!
//! Points are grouped by classification code; each group is interpolated
//! onto a regular grid, traced into labelled iso-elevation lines and drawn
//! as one layer of a shared raster, in the order the classes were selected.

pub mod bounds;
pub mod canvas;
pub mod compositor;
pub mod config;
pub mod contour;
pub mod error;
pub mod export;
pub mod font;
pub mod grid;
pub mod interpolation;
pub mod labels;
pub mod laz;
pub mod levels;
pub mod point_cloud;
pub mod progress;
pub mod report;
pub mod style;

pub use canvas::{Canvas, CanvasSpec, Layer};
pub use compositor::{ClassOutcome, ClassStatus, Composite, LayerCompositor, ProgressSink};
pub use config::GenerationRequest;
pub use contour::{Contour, ContourSet};
pub use error::{ContourError, InsufficientData, Result};
pub use grid::Grid;
pub use interpolation::{ScalarField, ScalarInterpolator};
pub use levels::LevelSet;
pub use point_cloud::{PointCloud, PointSubset};
pub use style::{ClassStyle, Rgb, StyleMap};
