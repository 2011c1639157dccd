use crate::model::ContourSegment;
use config::constants::{CONTOUR_EPSILON, MAX_CONTOUR_POINTS, PARALLEL_EPSILON};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Returns true when the first and last points coincide within `epsilon`.
///
/// Fewer than 3 points never form a closed contour.
pub fn is_closed(points: &[DVec2], epsilon: f64) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 3 => first.distance(*last) <= epsilon,
        _ => false,
    }
}

/// Indices `i` where segment `i` does not end where segment `i + 1` starts.
pub fn continuity_gaps(segments: &[ContourSegment], epsilon: f64) -> Vec<usize> {
    segments
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].end.distance(pair[1].start) > epsilon)
        .map(|(i, _)| i)
        .collect()
}

/// Returns true when consecutive segments join within `epsilon`.
pub fn is_continuous(segments: &[ContourSegment], epsilon: f64) -> bool {
    continuity_gaps(segments, epsilon).is_empty()
}

/// Intersection test for segments `p1-p2` and `p3-p4`.
fn segments_intersect(p1: DVec2, p2: DVec2, p3: DVec2, p4: DVec2) -> bool {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let det = d1.perp_dot(d2);
    if det.abs() < PARALLEL_EPSILON {
        return false;
    }

    let offset = p3 - p1;
    let t = offset.perp_dot(d2) / det;
    let u = offset.perp_dot(d1) / det;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Counts crossings between non-adjacent segments of a polyline.
///
/// O(n²). When the polyline is explicitly closed (last point repeats the
/// first) the first and last segments share a vertex and are not tested.
pub fn count_self_intersections(points: &[DVec2]) -> usize {
    if points.len() < 4 {
        return 0;
    }

    let segment_count = points.len() - 1;
    let closed = is_closed(points, CONTOUR_EPSILON);
    let mut count = 0;

    for i in 0..segment_count {
        for j in (i + 2)..segment_count {
            if closed && i == 0 && j == segment_count - 1 {
                continue;
            }
            if segments_intersect(points[i], points[i + 1], points[j], points[j + 1]) {
                count += 1;
            }
        }
    }

    count
}

/// Size and topology figures used to pick a construction strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContourComplexity {
    pub point_count: usize,
    pub segment_count: usize,
    pub self_intersections: usize,
}

impl ContourComplexity {
    /// Returns true when the contour should be flagged.
    pub fn needs_warning(&self) -> bool {
        self.point_count > MAX_CONTOUR_POINTS || self.self_intersections > 0
    }
}

/// Classifies a contour by point count and self-intersections.
pub fn classify_complexity(points: &[DVec2]) -> ContourComplexity {
    ContourComplexity {
        point_count: points.len(),
        segment_count: points.len().saturating_sub(1),
        self_intersections: count_self_intersections(points),
    }
}
