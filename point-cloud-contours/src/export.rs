/// Hand-off of a finished canvas to an image file
use crate::canvas::Canvas;
use crate::error::Result;
use std::path::Path;
use tracing::info;

/// Write `canvas` to `path`; the image format follows the file extension.
/// Consumes the canvas so a request is exported exactly once.
pub fn export(canvas: Canvas, path: &Path) -> Result<()> {
    let (width, height) = (canvas.width(), canvas.height());
    let image = canvas.into_image()?;
    image.save(path)?;

    info!(
        "Saved {} ({}x{} contour map)",
        path.display(),
        width,
        height
    );
    Ok(())
}
