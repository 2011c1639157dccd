//! # Box Primitive
//!
//! Generates rectangular prisms, used for rectangular cuts and notches.

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;

/// Creates a rectangular prism mesh.
///
/// With `center` the box straddles the origin, otherwise its minimum
/// corner sits there.
///
/// # Example
///
/// ```rust
/// use profile_mesh::primitives::create_cube;
/// use glam::DVec3;
///
/// let mesh = create_cube(DVec3::new(10.0, 4.0, 2.0), false).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn create_cube(size: DVec3, center: bool) -> Result<Mesh, MeshError> {
    if !size.is_finite() || size.min_element() <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "box size must be positive: {:?}",
            size
        )));
    }

    let (min, max) = if center {
        let half = size / 2.0;
        (-half, half)
    } else {
        (DVec3::ZERO, size)
    };

    Ok(create_box(min, max))
}

/// Creates an axis-aligned box spanning two corners.
///
/// Corners may be given in any order.
pub fn create_box_between(a: DVec3, b: DVec3) -> Result<Mesh, MeshError> {
    let size = (b - a).abs();
    if !size.is_finite() || size.min_element() <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "box corners span no volume: {:?} {:?}",
            a, b
        )));
    }
    Ok(create_box(a.min(b), a.max(b)))
}

/// Corner `i` takes `max` on each axis whose bit is set (x = 1, y = 2, z = 4).
const BOX_FACES: [[u32; 4]; 6] = [
    [0, 2, 3, 1], // z = min
    [4, 5, 7, 6], // z = max
    [0, 1, 5, 4], // y = min
    [3, 2, 6, 7], // y = max
    [2, 0, 4, 6], // x = min
    [1, 3, 7, 5], // x = max
];

fn create_box(min: DVec3, max: DVec3) -> Mesh {
    let mut mesh = Mesh::with_capacity(8, 12);
    for i in 0..8u32 {
        let pick = |bit: u32, lo: f64, hi: f64| if i & bit == 0 { lo } else { hi };
        mesh.add_vertex(DVec3::new(
            pick(1, min.x, max.x),
            pick(2, min.y, max.y),
            pick(4, min.z, max.z),
        ));
    }

    // Quads wind counter-clockwise seen from outside
    for [a, b, c, d] in BOX_FACES {
        mesh.add_triangle(a, b, c);
        mesh.add_triangle(a, c, d);
    }
    mesh
}
