use super::analysis::is_closed;
use config::constants::{CONTOUR_EPSILON, VERTEX_MERGE_EPSILON};
use glam::DVec2;

/// Shoelace area; positive for counter-clockwise outlines.
pub fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f64>()
        / 2.0
}

/// Returns the outline in counter-clockwise order.
pub fn ensure_counter_clockwise(mut points: Vec<DVec2>) -> Vec<DVec2> {
    if signed_area(&points) < 0.0 {
        points.reverse();
    }
    points
}

/// Cleans raw contour points.
///
/// Drops non-finite points and consecutive duplicates, then strips a
/// closing point that repeats the first.
pub fn normalize_points(points: &[DVec2]) -> Vec<DVec2> {
    let mut out: Vec<DVec2> = Vec::with_capacity(points.len());
    for p in points.iter().filter(|p| p.is_finite()) {
        if out
            .last()
            .map_or(true, |last| last.distance(*p) > VERTEX_MERGE_EPSILON)
        {
            out.push(*p);
        }
    }

    if out.len() > 3 && is_closed(&out, CONTOUR_EPSILON) {
        out.pop();
    }
    out
}

/// Returns true when every edge, including the closing one, is horizontal
/// or vertical within `CONTOUR_EPSILON`.
pub fn is_axis_aligned(points: &[DVec2]) -> bool {
    let n = points.len();
    if n < 2 {
        return false;
    }
    (0..n).all(|i| {
        let d = points[(i + 1) % n] - points[i];
        d.x.abs() <= CONTOUR_EPSILON || d.y.abs() <= CONTOUR_EPSILON
    })
}

/// Clamps every point into the rectangle `min..=max`.
pub fn clamp_to_rect(points: &[DVec2], min: DVec2, max: DVec2) -> Vec<DVec2> {
    points.iter().map(|p| p.clamp(min, max)).collect()
}
