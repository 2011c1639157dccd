//! # Extrusion Operations
//!
//! Extrudes closed 2D outlines into prisms. Cut tools are built this way:
//! the outline is drawn in a face-local frame and extruded along the face
//! normal.

mod linear;
mod triangulate;

#[cfg(test)]
mod tests;

pub use linear::{linear_extrude, LinearExtrudeParams};
pub use triangulate::triangulate;

use glam::DVec2;
use std::f64::consts::TAU;

/// A closed 2D outline for extrusion.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2D {
    /// Outline vertices, implicitly closed. Either winding is accepted.
    pub outer: Vec<DVec2>,
}

impl Polygon2D {
    /// Creates a polygon from outline vertices.
    pub fn new(outer: Vec<DVec2>) -> Self {
        Self { outer }
    }

    /// Creates an axis-aligned rectangle from two corners.
    pub fn rectangle(min: DVec2, max: DVec2) -> Self {
        Self::new(vec![
            DVec2::new(min.x, min.y),
            DVec2::new(max.x, min.y),
            DVec2::new(max.x, max.y),
            DVec2::new(min.x, max.y),
        ])
    }

    /// Creates a regular polygon approximating a circle.
    pub fn circle(center: DVec2, radius: f64, segments: u32) -> Self {
        let n = segments.max(3);
        let outer = (0..n)
            .map(|i| {
                let theta = TAU * i as f64 / n as f64;
                center + DVec2::new(theta.cos(), theta.sin()) * radius
            })
            .collect();
        Self::new(outer)
    }

    /// Returns the number of outline vertices.
    pub fn vertex_count(&self) -> usize {
        self.outer.len()
    }

    /// Signed area (positive for counter-clockwise outlines).
    pub fn signed_area(&self) -> f64 {
        let n = self.outer.len();
        (0..n)
            .map(|i| {
                let a = self.outer[i];
                let b = self.outer[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>()
            / 2.0
    }
}
