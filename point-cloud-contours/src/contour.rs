//! Contour line extraction from a masked scalar field.
//!
//! Marching squares over every cell whose four corners carry a value,
//! followed by chaining the per-cell segments into polylines through the
//! cell edges they share. Crossing points are computed once per edge, so
//! neighbouring cells always agree on them exactly.

use crate::interpolation::ScalarField;
use crate::labels::{LabelAnchor, format_level, midpoint_anchor};
use crate::levels::LevelSet;
use std::collections::HashMap;

/// A single iso-elevation polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub level: f64,
    pub label: String,
    pub points: Vec<(f64, f64)>,
    /// Closed rings do not repeat their first vertex.
    pub closed: bool,
}

impl Contour {
    /// Where the level label sits on this line, halfway along its length.
    pub fn label_anchor(&self) -> Option<LabelAnchor> {
        if self.closed {
            let mut ring = self.points.clone();
            ring.extend(self.points.first().copied());
            midpoint_anchor(&ring)
        } else {
            midpoint_anchor(&self.points)
        }
    }
}

/// Every contour extracted for one class, ordered by level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourSet {
    pub contours: Vec<Contour>,
}

impl ContourSet {
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Distinct levels that produced at least one line.
    pub fn levels(&self) -> Vec<f64> {
        let mut levels: Vec<f64> = Vec::new();
        for contour in &self.contours {
            if levels.last() != Some(&contour.level) {
                levels.push(contour.level);
            }
        }
        levels
    }
}

/// Grid edge identified by its lower/left node.
/// `Horizontal` joins (row, col) to (row, col + 1); `Vertical` joins (row, col) to (row + 1, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum EdgeKey {
    Horizontal(usize, usize),
    Vertical(usize, usize),
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: EdgeKey,
    b: EdgeKey,
}

impl Segment {
    fn other(&self, key: EdgeKey) -> EdgeKey {
        if self.a == key { self.b } else { self.a }
    }
}

/// Trace every level of `levels` through `field`.
pub fn extract(field: &ScalarField, levels: &LevelSet) -> ContourSet {
    let mut set = ContourSet::default();
    if field.width() < 2 || field.height() < 2 || field.is_fully_masked() {
        return set;
    }

    for level in levels.iter() {
        let segments = march_squares(field, level);
        if segments.is_empty() {
            continue;
        }

        let label = format_level(level);
        for (keys, closed) in chain_segments(&segments) {
            let points: Vec<(f64, f64)> = keys
                .iter()
                .map(|&key| edge_crossing(field, key, level))
                .collect();
            if points.len() < 2 {
                continue;
            }

            set.contours.push(Contour {
                level,
                label: label.clone(),
                points,
                closed,
            });
        }
    }

    set
}

/// Segments for one level, in row-major cell order.
fn march_squares(field: &ScalarField, level: f64) -> Vec<Segment> {
    let mut segments = Vec::new();

    for row in 0..field.height() - 1 {
        for col in 0..field.width() - 1 {
            let (Some(bl), Some(br), Some(tr), Some(tl)) = (
                field.value(row, col),
                field.value(row, col + 1),
                field.value(row + 1, col + 1),
                field.value(row + 1, col),
            ) else {
                continue;
            };

            let mut case = 0u8;
            if bl >= level {
                case |= 1;
            }
            if br >= level {
                case |= 2;
            }
            if tr >= level {
                case |= 4;
            }
            if tl >= level {
                case |= 8;
            }

            let bottom = EdgeKey::Horizontal(row, col);
            let top = EdgeKey::Horizontal(row + 1, col);
            let left = EdgeKey::Vertical(row, col);
            let right = EdgeKey::Vertical(row, col + 1);
            let mut push = |a, b| segments.push(Segment { a, b });

            match case {
                0 | 15 => {}
                1 | 14 => push(left, bottom),
                2 | 13 => push(bottom, right),
                3 | 12 => push(left, right),
                4 | 11 => push(right, top),
                6 | 9 => push(bottom, top),
                7 | 8 => push(left, top),
                5 | 10 => {
                    // Saddle: the centre value decides which diagonal corners connect.
                    let centre_above = (bl + br + tr + tl) * 0.25 >= level;
                    let wrap_br_tl = (case == 5) == centre_above;
                    if wrap_br_tl {
                        push(bottom, right);
                        push(left, top);
                    } else {
                        push(left, bottom);
                        push(right, top);
                    }
                }
                _ => unreachable!("marching squares case out of range"),
            }
        }
    }

    segments
}

/// Chain segments into polylines of edge keys.
/// Open lines are traced from their free ends first, remaining segments form rings.
fn chain_segments(segments: &[Segment]) -> Vec<(Vec<EdgeKey>, bool)> {
    let mut adjacency: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
    for (i, segment) in segments.iter().enumerate() {
        adjacency.entry(segment.a).or_default().push(i);
        adjacency.entry(segment.b).or_default().push(i);
    }

    let degree = |key: &EdgeKey| adjacency.get(key).map_or(0, Vec::len);
    let mut used = vec![false; segments.len()];
    let mut chains = Vec::new();

    for i in 0..segments.len() {
        if used[i] {
            continue;
        }
        let segment = segments[i];
        let start = if degree(&segment.a) == 1 {
            Some(segment.a)
        } else if degree(&segment.b) == 1 {
            Some(segment.b)
        } else {
            None
        };

        if let Some(start) = start {
            chains.push((walk(segments, &adjacency, &mut used, i, start), false));
        }
    }

    for i in 0..segments.len() {
        if used[i] {
            continue;
        }
        let mut keys = walk(segments, &adjacency, &mut used, i, segments[i].a);
        let closed = keys.len() > 2 && keys.first() == keys.last();
        if closed {
            keys.pop();
        }
        chains.push((keys, closed));
    }

    chains
}

fn walk(
    segments: &[Segment],
    adjacency: &HashMap<EdgeKey, Vec<usize>>,
    used: &mut [bool],
    start: usize,
    entry: EdgeKey,
) -> Vec<EdgeKey> {
    let mut keys = vec![entry];
    let mut current = start;
    let mut entry = entry;

    loop {
        used[current] = true;
        let exit = segments[current].other(entry);
        keys.push(exit);

        let next = adjacency
            .get(&exit)
            .and_then(|candidates| candidates.iter().copied().find(|&s| !used[s]));
        match next {
            Some(s) => {
                current = s;
                entry = exit;
            }
            None => break,
        }
    }

    keys
}

/// Point where `level` crosses the edge, interpolated linearly between its nodes.
fn edge_crossing(field: &ScalarField, key: EdgeKey, level: f64) -> (f64, f64) {
    let (row, col, row2, col2) = match key {
        EdgeKey::Horizontal(r, c) => (r, c, r, c + 1),
        EdgeKey::Vertical(r, c) => (r, c, r + 1, c),
    };

    let v1 = field.value(row, col).unwrap_or(level);
    let v2 = field.value(row2, col2).unwrap_or(level);
    let (x1, y1) = (field.x[col], field.y[row]);
    let (x2, y2) = (field.x[col2], field.y[row2]);

    let t = if v2 != v1 {
        ((level - v1) / (v2 - v1)).clamp(0.0, 1.0)
    } else {
        0.5
    };

    (x1 + t * (x2 - x1), y1 + t * (y2 - y1))
}
