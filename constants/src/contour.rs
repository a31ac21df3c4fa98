/// Pipeline constants for per-class contour generation

/// Classes with fewer points than this are skipped without drawing
pub const MIN_CLASS_POINTS: usize = 100;

/// Elevation step between consecutive contour levels
pub const CONTOUR_LEVEL_STEP: f64 = 0.2;

/// Default interpolation grid spacing in point cloud units
pub const DEFAULT_GRID_SPACING: f64 = 1.0;

/// Decimal places used when labelling contour levels
pub const LABEL_DECIMALS: usize = 2;
