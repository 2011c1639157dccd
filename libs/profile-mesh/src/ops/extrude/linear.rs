//! # Linear Extrusion
//!
//! Extrudes a 2D outline along the Z axis to create a closed prism.
//!
//! - `height`: Extrusion distance along Z
//! - `center`: If true, center the extrusion around Z=0
//! - `shear`: XY offset of the top cap relative to the bottom cap

use super::{triangulate, Polygon2D};
use crate::error::MeshError;
use crate::mesh::Mesh;
use config::constants::{EPSILON, VERTEX_MERGE_EPSILON};
use glam::{DVec2, DVec3};

/// Parameters for linear extrusion.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearExtrudeParams {
    /// Extrusion height along Z axis
    pub height: f64,
    /// Center the extrusion around Z=0
    pub center: bool,
    /// Offset of the top cap in XY (used for bevelled tools)
    pub shear: DVec2,
}

impl Default for LinearExtrudeParams {
    fn default() -> Self {
        Self {
            height: 1.0,
            center: false,
            shear: DVec2::ZERO,
        }
    }
}

/// Extrudes a 2D outline along the Z axis.
///
/// Clockwise outlines are reversed first, so the result is always
/// outward-facing. Repeated vertices (including an explicit closing
/// vertex) are dropped.
///
/// # Example
///
/// ```rust
/// use profile_mesh::{linear_extrude, LinearExtrudeParams, Polygon2D};
/// use glam::DVec2;
///
/// let square = Polygon2D::rectangle(DVec2::ZERO, DVec2::splat(10.0));
/// let params = LinearExtrudeParams { height: 5.0, ..Default::default() };
/// let mesh = linear_extrude(&square, &params).unwrap();
/// assert!((mesh.signed_volume() - 500.0).abs() < 1e-9);
/// ```
pub fn linear_extrude(
    polygon: &Polygon2D,
    params: &LinearExtrudeParams,
) -> Result<Mesh, MeshError> {
    if params.height <= 0.0 || !params.height.is_finite() {
        return Err(MeshError::degenerate(format!(
            "extrusion height must be positive: {}",
            params.height
        )));
    }

    let mut outline = dedup_outline(&polygon.outer);
    if outline.len() < 3 {
        return Err(MeshError::degenerate(
            "outline must have at least 3 distinct vertices",
        ));
    }
    if outline.iter().any(|p| !p.is_finite()) {
        return Err(MeshError::degenerate("outline contains non-finite coordinates"));
    }

    let area = Polygon2D::new(outline.clone()).signed_area();
    if area.abs() < EPSILON {
        return Err(MeshError::degenerate("outline encloses no area"));
    }
    if area < 0.0 {
        outline.reverse();
    }

    let z_bottom = if params.center { -params.height / 2.0 } else { 0.0 };
    let z_top = z_bottom + params.height;

    let n = outline.len();
    let cap = triangulate(&outline);
    let mut mesh = Mesh::with_capacity(n * 2, n * 2 + cap.len() * 2);

    for p in &outline {
        mesh.add_vertex(DVec3::new(p.x, p.y, z_bottom));
    }
    for p in &outline {
        let q = *p + params.shear;
        mesh.add_vertex(DVec3::new(q.x, q.y, z_top));
    }

    let n32 = n as u32;
    for i in 0..n32 {
        let j = (i + 1) % n32;
        let (b_i, b_j, t_i, t_j) = (i, j, i + n32, j + n32);
        mesh.add_triangle(b_i, b_j, t_j);
        mesh.add_triangle(b_i, t_j, t_i);
    }

    for [a, b, c] in cap {
        let (a, b, c) = (a as u32, b as u32, c as u32);
        // Bottom faces -Z, so its winding is reversed
        mesh.add_triangle(a, c, b);
        mesh.add_triangle(a + n32, b + n32, c + n32);
    }

    Ok(mesh)
}

fn dedup_outline(points: &[DVec2]) -> Vec<DVec2> {
    let mut out: Vec<DVec2> = Vec::with_capacity(points.len());
    for p in points {
        if out
            .last()
            .map_or(true, |last| last.distance(*p) > VERTEX_MERGE_EPSILON)
        {
            out.push(*p);
        }
    }
    while out.len() > 1
        && out
            .first()
            .zip(out.last())
            .is_some_and(|(first, last)| first.distance(*last) <= VERTEX_MERGE_EPSILON)
    {
        out.pop();
    }
    out
}
