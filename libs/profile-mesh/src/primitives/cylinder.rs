//! # Cylinder Primitive
//!
//! Generates closed cylinders along the Z axis, used for drilled holes.

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;
use std::f64::consts::TAU;

/// Creates a cylinder mesh along the Z axis.
///
/// # Arguments
///
/// * `height` - Height along Z axis
/// * `radius` - Cylinder radius
/// * `center` - If true, center vertically at origin
/// * `segments` - Number of segments around circumference
///
/// # Example
///
/// ```rust
/// use profile_mesh::primitives::create_cylinder;
///
/// let mesh = create_cylinder(10.0, 5.0, false, 32).unwrap();
/// assert_eq!(mesh.vertex_count(), 66);
/// ```
pub fn create_cylinder(
    height: f64,
    radius: f64,
    center: bool,
    segments: u32,
) -> Result<Mesh, MeshError> {
    if height <= 0.0 || !height.is_finite() {
        return Err(MeshError::degenerate(format!(
            "cylinder height must be positive: {}",
            height
        )));
    }
    if radius <= 0.0 || !radius.is_finite() {
        return Err(MeshError::degenerate(format!(
            "cylinder radius must be positive: {}",
            radius
        )));
    }
    if segments < 3 {
        return Err(MeshError::degenerate(format!(
            "cylinder segments must be at least 3: {}",
            segments
        )));
    }

    let (z_bottom, z_top) = if center {
        (-height / 2.0, height / 2.0)
    } else {
        (0.0, height)
    };

    let n = segments;
    let mut mesh = Mesh::with_capacity(2 * n as usize + 2, 4 * n as usize);

    for z in [z_bottom, z_top] {
        for j in 0..n {
            let theta = TAU * j as f64 / n as f64;
            mesh.add_vertex(DVec3::new(radius * theta.cos(), radius * theta.sin(), z));
        }
    }
    let bottom_center = mesh.add_vertex(DVec3::new(0.0, 0.0, z_bottom));
    let top_center = mesh.add_vertex(DVec3::new(0.0, 0.0, z_top));

    for j in 0..n {
        let j_next = (j + 1) % n;
        let (b0, b1, t0, t1) = (j, j_next, j + n, j_next + n);

        mesh.add_triangle(b0, b1, t1);
        mesh.add_triangle(b0, t1, t0);
        mesh.add_triangle(bottom_center, b1, b0);
        mesh.add_triangle(top_center, t0, t1);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cylinder_counts() {
        let mesh = create_cylinder(10.0, 5.0, false, 16).unwrap();
        assert_eq!(mesh.vertex_count(), 34);
        assert_eq!(mesh.triangle_count(), 64);
        assert!(mesh.validate());
    }

    #[test]
    fn test_cylinder_volume_approaches_pi_r2_h() {
        let mesh = create_cylinder(10.0, 5.0, true, 128).unwrap();
        let exact = std::f64::consts::PI * 25.0 * 10.0;
        assert!(mesh.signed_volume() > 0.0);
        assert_relative_eq!(mesh.signed_volume(), exact, max_relative = 1e-2);
    }

    #[test]
    fn test_cylinder_centered_bounds() {
        let (min, max) = create_cylinder(4.0, 1.0, true, 8).unwrap().bounding_box();
        assert_relative_eq!(min.z, -2.0);
        assert_relative_eq!(max.z, 2.0);
    }

    #[test]
    fn test_cylinder_invalid() {
        assert!(create_cylinder(0.0, 1.0, false, 8).is_err());
        assert!(create_cylinder(1.0, 0.0, false, 8).is_err());
        assert!(create_cylinder(1.0, 1.0, false, 2).is_err());
    }
}
