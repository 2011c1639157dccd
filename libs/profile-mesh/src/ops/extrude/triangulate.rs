//! # Ear-Clipping Triangulation
//!
//! Triangulates simple polygons for extrusion caps. Orientation tests use
//! `robust::orient2d` so nearly collinear vertices do not flip sign.

use glam::DVec2;
use robust::{orient2d, Coord};

fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Orientation of `c` relative to the directed line `a -> b`.
///
/// Positive when the turn is counter-clockwise.
fn orientation(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    orient2d(coord(a), coord(b), coord(c))
}

fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    orientation(a, b, p) >= 0.0 && orientation(b, c, p) >= 0.0 && orientation(c, a, p) >= 0.0
}

/// Triangulates a counter-clockwise simple polygon.
///
/// Returns index triples into `points`, each counter-clockwise. When no
/// ear can be found (self-touching input) the remainder is fanned.
pub fn triangulate(points: &[DVec2]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let m = remaining.len();
        let ear = (0..m).find(|&i| {
            let prev = remaining[(i + m - 1) % m];
            let curr = remaining[i];
            let next = remaining[(i + 1) % m];
            let (a, b, c) = (points[prev], points[curr], points[next]);

            if orientation(a, b, c) <= 0.0 {
                return false;
            }

            remaining.iter().all(|&j| {
                j == prev || j == curr || j == next || !point_in_triangle(points[j], a, b, c)
            })
        });

        let Some(i) = ear else {
            break;
        };

        let prev = remaining[(i + m - 1) % m];
        let next = remaining[(i + 1) % m];
        triangles.push([prev, remaining[i], next]);
        remaining.remove(i);
    }

    // Fan whatever is left; for a proper polygon this is the last triangle.
    for k in 1..remaining.len().saturating_sub(1) {
        triangles.push([remaining[0], remaining[k], remaining[k + 1]]);
    }

    triangles
}
