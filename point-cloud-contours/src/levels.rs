/// Contour level selection from a subset's elevation range
use crate::grid::arange;
use crate::point_cloud::PointSubset;
use constants::contour::CONTOUR_LEVEL_STEP;

/// Strictly increasing contour thresholds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelSet {
    pub levels: Vec<f64>,
}

impl LevelSet {
    /// Levels from `floor(min_z)` up to, but excluding, `ceil(max_z)`.
    /// A flat range yields at most one level.
    pub fn from_range(min_z: f64, max_z: f64) -> Self {
        if !(min_z.is_finite() && max_z.is_finite()) || min_z > max_z {
            return Self::default();
        }

        let start = min_z.floor();
        let stop = max_z.ceil();

        let mut levels = arange(start, stop, CONTOUR_LEVEL_STEP);
        if min_z == max_z {
            levels.truncate(1);
        }

        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.levels.iter().copied()
    }
}

/// Contract-level entry point: levels spanning the elevations of `subset`.
pub fn levels(subset: &PointSubset) -> LevelSet {
    match subset.bounds() {
        Some(bounds) => LevelSet::from_range(bounds.min_z, bounds.max_z),
        None => LevelSet::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_cover_half_open_range_at_fixed_step() {
        let set = LevelSet::from_range(0.3, 2.7);
        assert_eq!(set.len(), 15);
        assert_eq!(set.levels[0], 0.0);
        assert!(set.levels.windows(2).all(|w| w[1] > w[0]));
        for (i, level) in set.iter().enumerate() {
            assert!((level - i as f64 * 0.2).abs() < 1e-12);
        }
        assert!(*set.levels.last().unwrap() < 3.0);
    }

    #[test]
    fn negative_elevations_start_at_floor() {
        let set = LevelSet::from_range(-1.5, -0.1);
        assert_eq!(set.levels[0], -2.0);
        assert!(*set.levels.last().unwrap() < 0.0);
    }

    #[test]
    fn flat_integral_elevation_has_no_levels() {
        assert!(LevelSet::from_range(4.0, 4.0).is_empty());
    }

    #[test]
    fn flat_fractional_elevation_has_single_level() {
        let set = LevelSet::from_range(4.5, 4.5);
        assert_eq!(set.levels, vec![4.0]);
    }

    #[test]
    fn empty_subset_has_no_levels() {
        let subset = PointSubset {
            code: 1,
            x: vec![],
            y: vec![],
            z: vec![],
        };
        assert!(levels(&subset).is_empty());
    }
}
