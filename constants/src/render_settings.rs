/// Output raster settings for the composited contour map

/// Figure size in inches, converted to pixels with the output dpi
pub const DEFAULT_FIGURE_WIDTH_IN: f32 = 20.0;
pub const DEFAULT_FIGURE_HEIGHT_IN: f32 = 10.0;
pub const DEFAULT_DPI: f32 = 300.0;

/// Typographic points per inch, used for line widths and label sizes
pub const POINTS_PER_INCH: f32 = 72.0;

/// Default contour stroke width in points
pub const DEFAULT_LINE_WIDTH_PT: f32 = 0.6;

pub const BACKGROUND_COLOUR: [u8; 3] = [0, 0, 0];

pub const LABEL_COLOUR: [u8; 3] = [255, 255, 255];
pub const LABEL_FONT_SIZE_PT: f32 = 6.0;

/// Blank space left on each side of an inline label, as a fraction of the font size
pub const LABEL_INLINE_SPACING: f32 = 0.25;
