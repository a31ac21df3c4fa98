/// Classified point cloud storage and per-class filtering
use crate::bounds::PointCloudBounds;
use crate::error::{ContourError, Result};
use std::collections::BTreeSet;

/// Classified point cloud held as parallel coordinate arrays.
/// Read-only once constructed; every per-class structure is derived from it.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    classification: Vec<u8>,
}

impl PointCloud {
    /// Build a cloud from aligned arrays.
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>, classification: Vec<u8>) -> Result<Self> {
        let len = x.len();
        if y.len() != len || z.len() != len || classification.len() != len {
            return Err(ContourError::invalid(format!(
                "point arrays differ in length (x={}, y={}, z={}, classification={})",
                len,
                y.len(),
                z.len(),
                classification.len()
            )));
        }

        Ok(Self {
            x,
            y,
            z,
            classification,
        })
    }

    /// Build a cloud from `(x, y, z, classification)` tuples.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64, f64, u8)>) -> Self {
        let mut cloud = Self::default();
        for (x, y, z, classification) in points {
            cloud.push(x, y, z, classification);
        }
        cloud
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
            classification: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, x: f64, y: f64, z: f64, classification: u8) {
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
        self.classification.push(classification);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Distinct classification codes present, ascending.
    pub fn classes(&self) -> Vec<u8> {
        self.classification
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of points carrying `code`.
    pub fn class_count(&self, code: u8) -> usize {
        self.classification.iter().filter(|&&c| c == code).count()
    }

    /// Select every point with classification `code`, preserving order.
    pub fn filter(&self, code: u8) -> PointSubset {
        let mut subset = PointSubset {
            code,
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
        };

        for (i, &c) in self.classification.iter().enumerate() {
            if c == code {
                subset.x.push(self.x[i]);
                subset.y.push(self.y[i]);
                subset.z.push(self.z[i]);
            }
        }

        subset
    }
}

/// Points of a single classification, as parallel arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSubset {
    pub code: u8,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl PointSubset {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Extent of the subset, or `None` when it holds no points.
    pub fn bounds(&self) -> Option<PointCloudBounds> {
        if self.is_empty() {
            return None;
        }

        let mut bounds = PointCloudBounds::new();
        for i in 0..self.len() {
            bounds.update(self.x[i], self.y[i], self.z[i]);
        }
        Some(bounds)
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        (0..self.len()).map(|i| (self.x[i], self.y[i], self.z[i]))
    }
}

/// Contract-level entry point for the classification filter.
pub fn filter(cloud: &PointCloud, code: u8) -> PointSubset {
    cloud.filter(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cloud() -> PointCloud {
        PointCloud::from_points([
            (0.0, 0.0, 1.0, 2),
            (1.0, 0.0, 2.0, 5),
            (2.0, 1.0, 3.0, 2),
            (3.0, 1.0, 4.0, 9),
            (4.0, 2.0, 5.0, 2),
            (5.0, 2.0, 6.0, 5),
        ])
    }

    #[test]
    fn filter_keeps_matching_points_in_order() {
        let subset = filter(&sample_cloud(), 2);
        assert_eq!(subset.code, 2);
        assert_eq!(subset.x, vec![0.0, 2.0, 4.0]);
        assert_eq!(subset.y, vec![0.0, 1.0, 2.0]);
        assert_eq!(subset.z, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn filter_without_match_is_empty() {
        let subset = sample_cloud().filter(7);
        assert!(subset.is_empty());
        assert!(subset.bounds().is_none());
    }

    #[test]
    fn filter_conserves_points_across_codes() {
        let cloud = sample_cloud();
        let mut total = 0;
        let mut rebuilt = Vec::new();
        for code in cloud.classes() {
            let subset = cloud.filter(code);
            assert_eq!(subset.len(), cloud.class_count(code));
            total += subset.len();
            rebuilt.extend(subset.points().map(|(x, y, z)| (x, y, z, code)));
        }
        assert_eq!(total, cloud.len());

        let mut original: Vec<_> = (0..cloud.len())
            .map(|i| (cloud.x[i], cloud.y[i], cloud.z[i], cloud.classification[i]))
            .collect();
        let key = |p: &(f64, f64, f64, u8)| (p.0.to_bits(), p.1.to_bits(), p.2.to_bits(), p.3);
        original.sort_by_key(key);
        rebuilt.sort_by_key(key);
        assert_eq!(original, rebuilt);
    }

    #[test]
    fn classes_are_distinct_and_sorted() {
        assert_eq!(sample_cloud().classes(), vec![2, 5, 9]);
    }

    #[test]
    fn misaligned_arrays_are_rejected() {
        let result = PointCloud::new(vec![0.0], vec![0.0, 1.0], vec![0.0], vec![2]);
        assert!(matches!(result, Err(ContourError::InvalidParameter(_))));
    }
}
