pub mod class;
pub mod contour;
pub mod render_settings;
