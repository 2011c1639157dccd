use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds of a contour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl ContourBounds {
    /// Lower-left corner.
    pub fn min(&self) -> DVec2 {
        DVec2::new(self.min_x, self.min_y)
    }

    /// Upper-right corner.
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.max_x, self.max_y)
    }

    /// Centre point.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.center_x, self.center_y)
    }

    /// Width and height.
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Enclosed area of the box.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Computes contour bounds in a single scan.
///
/// An empty input yields all-zero bounds.
pub fn compute_bounds(points: &[DVec2]) -> ContourBounds {
    let Some(first) = points.first() else {
        return ContourBounds::default();
    };

    let (min, max) = points
        .iter()
        .skip(1)
        .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));

    ContourBounds {
        min_x: min.x,
        max_x: max.x,
        min_y: min.y,
        max_y: max.y,
        width: max.x - min.x,
        height: max.y - min.y,
        center_x: (min.x + max.x) / 2.0,
        center_y: (min.y + max.y) / 2.0,
    }
}
