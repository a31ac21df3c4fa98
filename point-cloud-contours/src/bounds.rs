/// Point cloud coordinate bounds tracking and normalisation

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCloudBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl PointCloudBounds {
    /// Create new bounds initialised to infinity values
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            min_z: f64::INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    /// Update bounds with a new point
    pub fn update(&mut self, x: f64, y: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    /// Grow these bounds to also cover `other`
    pub fn merge(&mut self, other: &PointCloudBounds) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
        self.min_z = self.min_z.min(other.min_z);
        self.max_z = self.max_z.max(other.max_z);
    }

    /// False until at least one point has been added
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y && self.min_z <= self.max_z
    }

    /// World space dimensions
    pub fn dimensions(&self) -> (f64, f64, f64) {
        (
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.max_z - self.min_z,
        )
    }

    /// Normalise X coordinate to 0-1 range.
    /// A zero-width extent maps everything to the centre.
    pub fn normalize_x(&self, x: f64) -> f64 {
        normalize(x, self.min_x, self.max_x)
    }

    /// Normalise Y coordinate to 0-1 range
    pub fn normalize_y(&self, y: f64) -> f64 {
        normalize(y, self.min_y, self.max_y)
    }
}

impl Default for PointCloudBounds {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let extent = max - min;
    if extent > 0.0 {
        (value - min) / extent
    } else {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_covers_both_extents() {
        let mut a = PointCloudBounds::new();
        a.update(0.0, 0.0, 1.0);
        a.update(2.0, 1.0, 3.0);
        let mut b = PointCloudBounds::new();
        b.update(-1.0, 5.0, 0.5);

        a.merge(&b);
        assert_eq!((a.min_x, a.max_x), (-1.0, 2.0));
        assert_eq!((a.min_y, a.max_y), (0.0, 5.0));
        assert_eq!((a.min_z, a.max_z), (0.5, 3.0));
    }

    #[test]
    fn empty_bounds_are_invalid() {
        assert!(!PointCloudBounds::new().is_valid());
    }

    #[test]
    fn flat_extent_normalises_to_centre() {
        let mut bounds = PointCloudBounds::new();
        bounds.update(3.0, 1.0, 0.0);
        bounds.update(3.0, 5.0, 0.0);
        assert_eq!(bounds.normalize_x(3.0), 0.5);
        assert_eq!(bounds.normalize_y(3.0), 0.5);
    }
}
