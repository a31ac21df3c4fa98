/// Classified point cloud to contour map command line entry point
use clap::Parser;
use point_cloud_contours::compositor::{Composite, LayerCompositor};
use point_cloud_contours::config::{GenerationRequest, RequestFile, parse_colour_override};
use point_cloud_contours::export::export;
use point_cloud_contours::laz::read_point_cloud;
use point_cloud_contours::point_cloud::PointCloud;
use point_cloud_contours::progress::TerminalProgress;
use point_cloud_contours::report::RunReport;
use point_cloud_contours::{Canvas, Rgb};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Contour maps from classified LAS/LAZ point clouds")]
struct Args {
    /// Input .las or .laz file
    input: PathBuf,

    /// Output image; the format follows the extension (default: <input>_contours.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Classification codes to draw, bottom layer first (default: every class present)
    #[arg(short, long, value_delimiter = ',')]
    classes: Option<Vec<u8>>,

    /// Colour override for one class as CODE=COLOUR (hex or CSS name), repeatable
    #[arg(long = "color", value_name = "CODE=COLOUR")]
    colours: Vec<String>,

    /// Contour line width in points
    #[arg(long)]
    line_width: Option<f32>,

    /// Interpolation grid spacing in point cloud units
    #[arg(long)]
    spacing: Option<f64>,

    /// Output resolution in dots per inch
    #[arg(long)]
    dpi: Option<f32>,

    /// Output width in inches
    #[arg(long)]
    width_in: Option<f32>,

    /// Output height in inches
    #[arg(long)]
    height_in: Option<f32>,

    /// Background colour (hex or CSS name)
    #[arg(long)]
    background: Option<String>,

    /// JSON request file; command line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON report of the run to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// List the classes present in the input and exit
    #[arg(long)]
    list_classes: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let request = build_request(&args)?;
    request.validate()?;

    let cloud = read_point_cloud(&args.input)?;
    if args.list_classes {
        list_classes(&cloud, &request);
        return Ok(());
    }

    let classes = request.resolve_classes(&cloud);
    let styles = request.styles();
    let compositor = LayerCompositor::new(&styles, request.spacing, request.line_width)?;
    let canvas = Canvas::new(request.canvas)?;

    info!(
        "Generating contours for classes {:?} (spacing {}, line width {})",
        classes, request.spacing, request.line_width
    );

    let mut progress = TerminalProgress::new("Generating contours");
    let Composite { canvas, outcomes } =
        compositor.composite(canvas, &cloud, &classes, &mut progress)?;
    progress.finish("Contours composited");

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    export(canvas, &output)?;

    if let Some(report_path) = &args.report {
        RunReport::new(&args.input, &output, &request, cloud.len(), outcomes).write(report_path)?;
    }

    info!("Contour map complete!");
    Ok(())
}

/// Defaults, then the request file, then command line flags.
fn build_request(args: &Args) -> Result<GenerationRequest, Box<dyn std::error::Error>> {
    let mut request = GenerationRequest::default();

    if let Some(config_path) = &args.config {
        request.apply_file(RequestFile::load(config_path)?)?;
    }

    if let Some(classes) = &args.classes {
        request.classes = Some(classes.clone());
    }
    for colour in &args.colours {
        let (code, rgb) = parse_colour_override(colour)?;
        request.colours.insert(code, rgb);
    }
    if let Some(line_width) = args.line_width {
        request.line_width = line_width;
    }
    if let Some(spacing) = args.spacing {
        request.spacing = spacing;
    }
    if let Some(dpi) = args.dpi {
        request.canvas.dpi = dpi;
    }
    if let Some(width_in) = args.width_in {
        request.canvas.width_in = width_in;
    }
    if let Some(height_in) = args.height_in {
        request.canvas.height_in = height_in;
    }
    if let Some(background) = &args.background {
        request.canvas.background = Rgb::parse(background)?;
    }

    Ok(request)
}

fn list_classes(cloud: &PointCloud, request: &GenerationRequest) {
    let styles = request.styles();
    for code in cloud.classes() {
        let style = styles.style(code);
        println!(
            "Class {}: {} ({} points, {})",
            code,
            style.label,
            cloud.class_count(code),
            style.colour
        );
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    input.with_file_name(format!("{}_contours.png", stem))
}
