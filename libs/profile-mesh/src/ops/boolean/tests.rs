//! # Boolean Operation Tests
//!
//! Volume-based checks for CSG boolean operations.

use super::*;
use crate::primitives::create_cube;
use approx::assert_relative_eq;
use glam::DVec3;

/// Creates a centred cube of the given edge length at a position.
fn cube_at(pos: DVec3, size: f64) -> Mesh {
    let mut mesh = create_cube(DVec3::splat(size), true).unwrap();
    mesh.translate(pos);
    mesh
}

// =============================================================================
// UNION TESTS
// =============================================================================

#[test]
fn test_union_empty_a() {
    let b = cube_at(DVec3::ZERO, 1.0);
    let result = union(&Mesh::new(), &b).unwrap();
    assert_eq!(result.vertex_count(), b.vertex_count());
}

#[test]
fn test_union_empty_b() {
    let a = cube_at(DVec3::ZERO, 1.0);
    let result = union(&a, &Mesh::new()).unwrap();
    assert_eq!(result.vertex_count(), a.vertex_count());
}

#[test]
fn test_union_non_overlapping() {
    let a = cube_at(DVec3::new(-5.0, 0.0, 0.0), 1.0);
    let b = cube_at(DVec3::new(5.0, 0.0, 0.0), 1.0);

    let result = union(&a, &b).unwrap();
    assert_relative_eq!(result.signed_volume(), 2.0, epsilon = 1e-6);
}

#[test]
fn test_union_overlapping_corner() {
    let a = cube_at(DVec3::ZERO, 4.0);
    let b = cube_at(DVec3::splat(2.0), 2.0);

    let result = union(&a, &b).unwrap();
    assert_relative_eq!(result.signed_volume(), 71.0, epsilon = 1e-6);
}

// =============================================================================
// DIFFERENCE TESTS
// =============================================================================

#[test]
fn test_difference_inner_cavity() {
    let a = cube_at(DVec3::ZERO, 4.0);
    let b = cube_at(DVec3::ZERO, 2.0);

    let result = difference(&a, &b).unwrap();
    assert_relative_eq!(result.signed_volume(), 56.0, epsilon = 1e-6);
}

#[test]
fn test_difference_corner_notch() {
    let a = cube_at(DVec3::ZERO, 4.0);
    let b = cube_at(DVec3::splat(2.0), 2.0);

    let result = difference(&a, &b).unwrap();
    assert_relative_eq!(result.signed_volume(), 63.0, epsilon = 1e-6);
    let (min, max) = result.bounding_box();
    assert_relative_eq!(min.x, -2.0, epsilon = 1e-9);
    assert_relative_eq!(max.x, 2.0, epsilon = 1e-9);
}

#[test]
fn test_difference_through_cut() {
    let a = create_cube(DVec3::new(10.0, 10.0, 2.0), true).unwrap();
    let b = create_cube(DVec3::new(2.0, 2.0, 4.0), true).unwrap();

    let result = difference(&a, &b).unwrap();
    assert_relative_eq!(result.signed_volume(), 200.0 - 8.0, epsilon = 1e-6);
}

#[test]
fn test_difference_disjoint_returns_a() {
    let a = cube_at(DVec3::ZERO, 1.0);
    let b = cube_at(DVec3::new(10.0, 0.0, 0.0), 1.0);

    let result = difference(&a, &b).unwrap();
    assert_eq!(result, a);
}

/// 100 x 100 x 2 plate minus a 2 x 2 through-cut at (x, y).
fn plate_with_cut(x: f64, y: f64) -> (Mesh, Mesh) {
    let plate = create_cube(DVec3::new(100.0, 100.0, 2.0), true).unwrap();
    let mut cut = create_cube(DVec3::new(2.0, 2.0, 4.0), true).unwrap();
    cut.translate(DVec3::new(x, y, 0.0));
    let result = difference(&plate, &cut).unwrap();
    (plate, result)
}

#[test]
fn test_difference_leaves_far_faces_whole() {
    let (_, result) = plate_with_cut(30.0, 30.0);
    assert_relative_eq!(result.signed_volume(), 20000.0 - 8.0, epsilon = 1e-6);

    let on_side = result
        .triangle_positions()
        .filter(|tri| tri.iter().all(|v| (v.x + 50.0).abs() < 1e-9))
        .count();
    assert_eq!(on_side, 2);
}

#[test]
fn test_difference_fuses_untouched_fragments() {
    // The cut sits below the top face's diagonal; the upper-left triangle
    // overlaps its box but not the cut itself
    let (plate, result) = plate_with_cut(30.0, -30.0);
    let untouched = plate
        .triangle_positions()
        .find(|[a, b, c]| a.z > 0.0 && (a.y - a.x) + (b.y - b.x) + (c.y - c.x) > 0.0)
        .unwrap();
    assert!(result.triangle_positions().any(|tri| tri == untouched));
}

#[test]
fn test_repeated_cuts_keep_volume() {
    let mut plate = create_cube(DVec3::new(200.0, 200.0, 2.0), true).unwrap();
    for i in 0..4 {
        for j in 0..4 {
            let mut cut = create_cube(DVec3::new(2.0, 2.0, 4.0), true).unwrap();
            cut.translate(DVec3::new(-75.0 + 50.0 * i as f64, -75.0 + 50.0 * j as f64, 0.0));
            plate = difference(&plate, &cut).unwrap();
        }
    }
    assert_relative_eq!(plate.signed_volume(), 80000.0 - 16.0 * 8.0, epsilon = 1e-6);
    // Each cut only splits the faces around it
    assert!(plate.triangle_count() < 16 * 400, "{}", plate.triangle_count());
}

#[test]
fn test_difference_empty_a() {
    let b = cube_at(DVec3::ZERO, 1.0);
    assert!(difference(&Mesh::new(), &b).unwrap().is_empty());
}

// =============================================================================
// INTERSECTION TESTS
// =============================================================================

#[test]
fn test_intersection_corner_overlap() {
    let a = cube_at(DVec3::ZERO, 4.0);
    let b = cube_at(DVec3::splat(2.0), 2.0);

    let result = intersection(&a, &b).unwrap();
    assert_relative_eq!(result.signed_volume(), 1.0, epsilon = 1e-6);
}

#[test]
fn test_intersection_disjoint_is_empty() {
    let a = cube_at(DVec3::ZERO, 1.0);
    let b = cube_at(DVec3::new(10.0, 0.0, 0.0), 1.0);
    assert!(intersection(&a, &b).unwrap().is_empty());
}

// =============================================================================
// BOUNDING BOX TESTS
// =============================================================================

#[test]
fn test_bounding_boxes_overlap() {
    let a = cube_at(DVec3::ZERO, 2.0);
    assert!(bounding_boxes_overlap(&a, &cube_at(DVec3::new(1.5, 0.0, 0.0), 2.0)));
    assert!(bounding_boxes_overlap(&a, &cube_at(DVec3::new(2.0, 0.0, 0.0), 2.0)));
    assert!(!bounding_boxes_overlap(&a, &cube_at(DVec3::new(3.0, 0.0, 0.0), 2.0)));
    assert!(!bounding_boxes_overlap(&a, &Mesh::new()));
}
