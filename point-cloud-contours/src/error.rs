/// Error types for contour generation requests.
use std::fmt;
use std::path::PathBuf;

/// Reason a single class produced no layer.
/// Never fatal to a request; the compositor records it and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsufficientData {
    /// Fewer points than the fixed per-class minimum.
    TooFewPoints,
    /// Fewer than three non-collinear planar samples.
    DegenerateTriangulation,
    /// No grid cell could be interpolated.
    FullyMasked,
}

impl fmt::Display for InsufficientData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsufficientData::TooFewPoints => write!(f, "too few points"),
            InsufficientData::DegenerateTriangulation => write!(f, "degenerate triangulation"),
            InsufficientData::FullyMasked => write!(f, "interpolated field entirely masked"),
        }
    }
}

#[derive(Debug)]
pub enum ContourError {
    /// Request parameter outside its valid range. Fatal before any class runs.
    InvalidParameter(String),
    InsufficientData(InsufficientData),
    /// Point cloud source could not be opened or decoded.
    Ingestion {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    Io(std::io::Error),
    Image(image::ImageError),
    Json(serde_json::Error),
    /// Label typeface could not be parsed.
    Font(ttf_parser::FaceParsingError),
}

impl ContourError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ContourError::InvalidParameter(message.into())
    }

    pub fn ingestion(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ContourError::Ingestion {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl From<std::io::Error> for ContourError {
    fn from(err: std::io::Error) -> Self {
        ContourError::Io(err)
    }
}

impl From<image::ImageError> for ContourError {
    fn from(err: image::ImageError) -> Self {
        ContourError::Image(err)
    }
}

impl From<serde_json::Error> for ContourError {
    fn from(err: serde_json::Error) -> Self {
        ContourError::Json(err)
    }
}

impl From<ttf_parser::FaceParsingError> for ContourError {
    fn from(err: ttf_parser::FaceParsingError) -> Self {
        ContourError::Font(err)
    }
}

impl From<InsufficientData> for ContourError {
    fn from(reason: InsufficientData) -> Self {
        ContourError::InsufficientData(reason)
    }
}

impl fmt::Display for ContourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContourError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            ContourError::InsufficientData(reason) => write!(f, "Insufficient data: {}", reason),
            ContourError::Ingestion { path, source } => {
                write!(f, "Cannot read point cloud {}: {}", path.display(), source)
            }
            ContourError::Io(e) => write!(f, "IO error: {}", e),
            ContourError::Image(e) => write!(f, "Image error: {}", e),
            ContourError::Json(e) => write!(f, "JSON error: {}", e),
            ContourError::Font(e) => write!(f, "Font error: {}", e),
        }
    }
}

impl std::error::Error for ContourError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContourError::Ingestion { source, .. } => Some(source.as_ref()),
            ContourError::Io(e) => Some(e),
            ContourError::Image(e) => Some(e),
            ContourError::Json(e) => Some(e),
            ContourError::Font(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ContourError>;
