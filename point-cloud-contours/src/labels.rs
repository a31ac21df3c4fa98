/// Contour label text and placement along polylines
use constants::contour::LABEL_DECIMALS;

/// Position and unit direction of a label on its contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl LabelAnchor {
    /// Pixel-space direction (y down) flipped so text reads left to right,
    /// or bottom to top when vertical.
    pub fn upright(self) -> Self {
        if self.dx < 0.0 || (self.dx == 0.0 && self.dy > 0.0) {
            Self {
                dx: -self.dx,
                dy: -self.dy,
                ..self
            }
        } else {
            self
        }
    }
}

/// Label text for a contour level, fixed to two decimals.
pub fn format_level(level: f64) -> String {
    let text = format!("{:.*}", LABEL_DECIMALS, level);
    // Levels just below zero would otherwise print as "-0.00".
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// Total length of a polyline.
pub fn path_length(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|w| distance(w[0], w[1]))
        .sum()
}

/// Point and unit tangent at arc length `offset` along the polyline.
pub fn sample_at_offset(points: &[(f64, f64)], offset: f64) -> Option<LabelAnchor> {
    let mut remaining = offset.max(0.0);

    for w in points.windows(2) {
        let length = distance(w[0], w[1]);
        if length <= 0.0 {
            continue;
        }

        if remaining <= length {
            let t = remaining / length;
            return Some(LabelAnchor {
                x: w[0].0 + t * (w[1].0 - w[0].0),
                y: w[0].1 + t * (w[1].1 - w[0].1),
                dx: (w[1].0 - w[0].0) / length,
                dy: (w[1].1 - w[0].1) / length,
            });
        }
        remaining -= length;
    }

    None
}

/// Anchor halfway along the polyline, `None` for zero-length paths.
pub fn midpoint_anchor(points: &[(f64, f64)]) -> Option<LabelAnchor> {
    let length = path_length(points);
    if length <= 0.0 {
        return None;
    }
    sample_at_offset(points, length * 0.5)
}

/// Arc length along the polyline to its point nearest `target`.
pub fn offset_of(points: &[(f64, f64)], target: (f64, f64)) -> f64 {
    let mut best_distance = f64::INFINITY;
    let mut best_offset = 0.0;
    let mut travelled = 0.0;

    for w in points.windows(2) {
        let (ex, ey) = (w[1].0 - w[0].0, w[1].1 - w[0].1);
        let length = (ex * ex + ey * ey).sqrt();
        let t = if length > 0.0 {
            (((target.0 - w[0].0) * ex + (target.1 - w[0].1) * ey) / (length * length))
                .clamp(0.0, 1.0)
        } else {
            0.0
        };

        let d = distance((w[0].0 + t * ex, w[0].1 + t * ey), target);
        if d < best_distance {
            best_distance = d;
            best_offset = travelled + t * length;
        }
        travelled += length;
    }

    best_offset
}

/// Split a polyline around the arc-length interval `[gap_start, gap_end]`,
/// returning the pieces before and after the gap.
pub fn split_around(
    points: &[(f64, f64)],
    gap_start: f64,
    gap_end: f64,
) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let mut before = Vec::new();
    let mut after = Vec::new();
    let mut travelled = 0.0;

    if let Some(&first) = points.first() {
        if gap_start > 0.0 {
            before.push(first);
        }
    }

    for w in points.windows(2) {
        let length = distance(w[0], w[1]);
        let seg_start = travelled;
        let seg_end = travelled + length;
        let at = |s: f64| {
            let t = if length > 0.0 {
                (s - seg_start) / length
            } else {
                0.0
            };
            (w[0].0 + t * (w[1].0 - w[0].0), w[0].1 + t * (w[1].1 - w[0].1))
        };

        if seg_start < gap_start {
            if seg_end <= gap_start {
                before.push(w[1]);
            } else {
                before.push(at(gap_start));
            }
        }

        if seg_end > gap_end {
            if seg_start >= gap_end {
                after.push(w[1]);
            } else {
                after.push(at(gap_end));
                after.push(w[1]);
            }
        }

        travelled = seg_end;
    }

    (before, after)
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}
