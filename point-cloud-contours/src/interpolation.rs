/// Scattered-to-grid elevation interpolation with validity masking
use crate::error::{InsufficientData, Result};
use crate::grid::Grid;
use crate::point_cloud::PointSubset;
use spade::{DelaunayTriangulation, FloatTriangulation, HasPosition, Point2, Triangulation};

/// Elevation sample stored on each triangulation vertex.
#[derive(Debug, Clone, Copy)]
struct ElevationSample {
    position: Point2<f64>,
    z: f64,
}

impl HasPosition for ElevationSample {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// Elevation values on a grid plus a per-cell validity mask.
/// Row-major: row `r` holds the samples at `y[r]`, column `c` those at `x[c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    values: Vec<f64>,
    valid: Vec<bool>,
}

impl ScalarField {
    /// Build a field from row-major values; non-finite values are masked.
    pub fn from_values(x: Vec<f64>, y: Vec<f64>, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(values.len(), x.len() * y.len());

        let valid: Vec<bool> = values
            .iter()
            .map(|v| v.is_some_and(f64::is_finite))
            .collect();
        let values = values
            .into_iter()
            .zip(&valid)
            .map(|(v, &ok)| if ok { v.unwrap_or(f64::NAN) } else { f64::NAN })
            .collect();

        Self {
            x,
            y,
            values,
            valid,
        }
    }

    pub fn width(&self) -> usize {
        self.x.len()
    }

    pub fn height(&self) -> usize {
        self.y.len()
    }

    /// Interpolated value at (`row`, `col`), `None` when masked.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        let idx = row * self.width() + col;
        if self.valid[idx] {
            Some(self.values[idx])
        } else {
            None
        }
    }

    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.valid[row * self.width() + col]
    }

    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }

    /// True when no grid point carries an interpolated value.
    pub fn is_fully_masked(&self) -> bool {
        !self.valid.iter().any(|&v| v)
    }
}

/// Piecewise-linear interpolator over the Delaunay triangulation of a subset.
pub struct ScalarInterpolator {
    triangulation: DelaunayTriangulation<ElevationSample>,
}

impl ScalarInterpolator {
    /// Triangulate the planar positions of `subset`.
    /// Fails when fewer than three non-collinear samples remain.
    pub fn new(subset: &PointSubset) -> Result<Self> {
        let samples: Vec<ElevationSample> = subset
            .points()
            .filter(|(x, y, z)| x.is_finite() && y.is_finite() && z.is_finite())
            .map(|(x, y, z)| ElevationSample {
                position: Point2::new(x, y),
                z,
            })
            .collect();

        if samples.len() < 3 {
            return Err(InsufficientData::DegenerateTriangulation.into());
        }

        let triangulation = DelaunayTriangulation::<ElevationSample>::bulk_load_stable(samples)
            .map_err(|_| InsufficientData::DegenerateTriangulation)?;

        // All-collinear input triangulates to edges only.
        if triangulation.num_inner_faces() == 0 {
            return Err(InsufficientData::DegenerateTriangulation.into());
        }

        Ok(Self { triangulation })
    }

    /// Interpolated elevation at (`x`, `y`), `None` outside the convex hull.
    pub fn sample(&self, x: f64, y: f64) -> Option<f64> {
        self.triangulation
            .barycentric()
            .interpolate(|v| v.data().z, Point2::new(x, y))
    }

    /// Evaluate the interpolant at every grid point.
    pub fn interpolate(&self, grid: &Grid) -> ScalarField {
        let barycentric = self.triangulation.barycentric();
        let mut values = Vec::with_capacity(grid.width() * grid.height());

        for &y in &grid.y {
            for &x in &grid.x {
                values.push(barycentric.interpolate(|v| v.data().z, Point2::new(x, y)));
            }
        }

        ScalarField::from_values(grid.x.clone(), grid.y.clone(), values)
    }
}

/// Contract-level entry point: triangulate `subset` and sample it on `grid`.
pub fn interpolate(subset: &PointSubset, grid: &Grid) -> Result<ScalarField> {
    Ok(ScalarInterpolator::new(subset)?.interpolate(grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContourError;

    fn subset(points: &[(f64, f64, f64)]) -> PointSubset {
        PointSubset {
            code: 2,
            x: points.iter().map(|p| p.0).collect(),
            y: points.iter().map(|p| p.1).collect(),
            z: points.iter().map(|p| p.2).collect(),
        }
    }

    #[test]
    fn grid_point_on_sample_returns_sample_elevation() {
        let points: Vec<(f64, f64, f64)> = (0..5)
            .flat_map(|i| (0..5).map(move |j| (i as f64, j as f64, (i * i + 3 * j) as f64 * 0.37)))
            .collect();
        let subset = subset(&points);
        let grid = Grid::build(&subset, 1.0).unwrap();
        let field = interpolate(&subset, &grid).unwrap();

        for (row, &y) in field.y.iter().enumerate() {
            for (col, &x) in field.x.iter().enumerate() {
                let expected = (x * x + 3.0 * y) * 0.37;
                let value = field.value(row, col).unwrap();
                assert!((value - expected).abs() < 1e-9, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn points_outside_hull_are_masked() {
        let subset = subset(&[(0.0, 0.0, 1.0), (10.0, 0.0, 2.0), (0.0, 10.0, 3.0)]);
        let interpolator = ScalarInterpolator::new(&subset).unwrap();

        assert!(interpolator.sample(10.0 / 3.0, 10.0 / 3.0).is_some());
        assert!(interpolator.sample(9.0, 9.0).is_none());

        let grid = Grid::build(&subset, 1.0).unwrap();
        let field = interpolator.interpolate(&grid);
        assert!(field.is_valid(3, 3));
        assert!(!field.is_valid(9, 9));
        assert!(field.value(9, 9).is_none());
        assert!(!field.is_fully_masked());
    }

    #[test]
    fn plane_is_reproduced_inside_hull() {
        let subset = subset(&[(0.0, 0.0, 0.0), (4.0, 0.0, 4.0), (0.0, 4.0, 4.0), (4.0, 4.0, 8.0)]);
        let interpolator = ScalarInterpolator::new(&subset).unwrap();
        let value = interpolator.sample(1.25, 2.5).unwrap();
        assert!((value - 3.75).abs() < 1e-12);
    }

    #[test]
    fn collinear_samples_are_degenerate() {
        let subset = subset(&[(0.0, 0.0, 1.0), (1.0, 1.0, 2.0), (2.0, 2.0, 3.0), (3.0, 3.0, 4.0)]);
        assert!(matches!(
            ScalarInterpolator::new(&subset),
            Err(ContourError::InsufficientData(InsufficientData::DegenerateTriangulation))
        ));
    }

    #[test]
    fn two_samples_are_degenerate() {
        let subset = subset(&[(0.0, 0.0, 1.0), (1.0, 0.0, 2.0)]);
        assert!(ScalarInterpolator::new(&subset).is_err());
    }
}
