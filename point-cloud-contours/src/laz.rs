/// LAS/LAZ ingestion into a classified point cloud
use crate::error::{ContourError, Result};
use crate::point_cloud::PointCloud;
use indicatif::{ProgressBar, ProgressStyle};
use las::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Create LAS file reader for point cloud access.
/// Handles both .las and .laz compressed formats.
pub fn create_reader(file_path: &Path) -> Result<Reader> {
    let file = File::open(file_path).map_err(|e| ContourError::ingestion(file_path, e))?;
    let buf_reader = BufReader::new(file);
    Reader::new(buf_reader).map_err(|e| ContourError::ingestion(file_path, e))
}

/// Read every point's coordinates and classification code.
pub fn read_point_cloud(file_path: &Path) -> Result<PointCloud> {
    let mut reader = create_reader(file_path)?;
    log_file_info(file_path, &reader);

    let total_points = reader.header().number_of_points() as usize;
    let pb = ProgressBar::new(total_points as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} points ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("▉▊▋▌▍▎▏ "));
    }
    pb.set_message("Loading points");

    let mut cloud = PointCloud::with_capacity(total_points);
    for (idx, point_result) in reader.points().enumerate() {
        let point = point_result.map_err(|e| ContourError::ingestion(file_path, e))?;
        cloud.push(point.x, point.y, point.z, u8::from(point.classification));

        if idx % 50_000 == 0 {
            pb.set_position(idx as u64);
        }
    }
    pb.finish_with_message("Points loaded");

    info!(
        "Loaded {} points in {} classes from {}",
        cloud.len(),
        cloud.classes().len(),
        file_path.display()
    );
    Ok(cloud)
}

/// Log header details useful when checking coordinate units.
fn log_file_info(file_path: &Path, reader: &Reader) {
    let header = reader.header();
    let transforms = header.transforms();

    info!(
        "LAS/LAZ file {} (version {}.{}, {} points)",
        file_path.display(),
        header.version().major,
        header.version().minor,
        header.number_of_points()
    );
    debug!("  Point format: {:?}", header.point_format().to_u8());
    debug!(
        "  Scale factors: X={}, Y={}, Z={}",
        transforms.x.scale, transforms.y.scale, transforms.z.scale
    );
    debug!(
        "  Offsets: X={}, Y={}, Z={}",
        transforms.x.offset, transforms.y.offset, transforms.z.offset
    );
}
