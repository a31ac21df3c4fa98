/// Regular interpolation lattice over a subset's planar extent
use crate::error::{ContourError, InsufficientData, Result};
use crate::point_cloud::PointSubset;

/// Axis-aligned lattice with a constant step on both axes.
/// Each axis runs from the subset minimum up to, but excluding, the maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub spacing: f64,
}

impl Grid {
    /// Build the lattice covering `subset` at `spacing`.
    pub fn build(subset: &PointSubset, spacing: f64) -> Result<Self> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(ContourError::invalid(format!(
                "grid spacing must be positive, got {}",
                spacing
            )));
        }

        let bounds = subset
            .bounds()
            .ok_or(ContourError::InsufficientData(InsufficientData::TooFewPoints))?;

        Ok(Self {
            x: arange(bounds.min_x, bounds.max_x, spacing),
            y: arange(bounds.min_y, bounds.max_y, spacing),
            spacing,
        })
    }

    /// Number of columns (x samples)
    pub fn width(&self) -> usize {
        self.x.len()
    }

    /// Number of rows (y samples)
    pub fn height(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }
}

/// Half-open arithmetic progression `start, start + step, ...` below `stop`.
/// Length is `ceil((stop - start) / step)` and elements are `start + i * step`,
/// so accumulated rounding never drifts the sequence.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let span = (stop - start) / step;
    if span.is_nan() || span <= 0.0 {
        return Vec::new();
    }

    let len = span.ceil() as usize;
    (0..len).map(|i| start + i as f64 * step).collect()
}

/// Contract-level entry point for grid construction.
pub fn build(subset: &PointSubset, spacing: f64) -> Result<Grid> {
    Grid::build(subset, spacing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subset(points: &[(f64, f64)]) -> PointSubset {
        PointSubset {
            code: 2,
            x: points.iter().map(|p| p.0).collect(),
            y: points.iter().map(|p| p.1).collect(),
            z: vec![0.0; points.len()],
        }
    }

    #[test]
    fn axis_excludes_upper_bound() {
        let grid = Grid::build(&subset(&[(0.0, 0.0), (4.0, 2.0)]), 1.0).unwrap();
        assert_eq!(grid.x, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(grid.y, vec![0.0, 1.0]);
    }

    #[test]
    fn axis_length_is_ceiling_of_span() {
        let grid = Grid::build(&subset(&[(1.5, -2.0), (9.2, 7.7)]), 0.7).unwrap();
        let expected_x = ((9.2f64 - 1.5) / 0.7).ceil() as usize;
        let expected_y = ((7.7f64 + 2.0) / 0.7).ceil() as usize;
        assert_eq!(grid.width(), expected_x);
        assert_eq!(grid.height(), expected_y);
        assert!(grid.x.windows(2).all(|w| w[1] > w[0]));
        assert!(*grid.x.last().unwrap() < 9.2);
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        let points = subset(&[(0.0, 0.0), (1.0, 1.0)]);
        for spacing in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                Grid::build(&points, spacing),
                Err(ContourError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn single_point_gives_empty_axes() {
        let grid = Grid::build(&subset(&[(3.0, 3.0)]), 1.0).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn empty_subset_has_no_grid() {
        assert!(matches!(
            Grid::build(&subset(&[]), 1.0),
            Err(ContourError::InsufficientData(InsufficientData::TooFewPoints))
        ));
    }
}
