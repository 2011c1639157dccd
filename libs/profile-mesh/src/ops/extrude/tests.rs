//! # Extrusion Tests

use super::*;
use approx::assert_relative_eq;
use glam::DVec2;

#[test]
fn test_polygon2d_rectangle() {
    let rect = Polygon2D::rectangle(DVec2::ZERO, DVec2::new(10.0, 20.0));
    assert_eq!(rect.vertex_count(), 4);
    assert_eq!(rect.outer[2], DVec2::new(10.0, 20.0));
    assert_relative_eq!(rect.signed_area(), 200.0);
}

#[test]
fn test_polygon2d_circle() {
    let circle = Polygon2D::circle(DVec2::ZERO, 5.0, 32);
    assert_eq!(circle.vertex_count(), 32);
    assert_relative_eq!(circle.outer[0].x, 5.0, epsilon = 1e-12);
    assert!(circle.signed_area() > 0.0);
}

#[test]
fn test_linear_extrude_volume() {
    let rect = Polygon2D::rectangle(DVec2::ZERO, DVec2::new(4.0, 3.0));
    let params = LinearExtrudeParams {
        height: 2.0,
        ..Default::default()
    };
    let mesh = linear_extrude(&rect, &params).unwrap();

    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
    assert_relative_eq!(mesh.signed_volume(), 24.0, epsilon = 1e-9);
    assert!(mesh.validate());
}

#[test]
fn test_linear_extrude_clockwise_outline_is_reoriented() {
    let mut rect = Polygon2D::rectangle(DVec2::ZERO, DVec2::new(4.0, 3.0));
    rect.outer.reverse();
    let mesh = linear_extrude(&rect, &LinearExtrudeParams::default()).unwrap();
    assert_relative_eq!(mesh.signed_volume(), 12.0, epsilon = 1e-9);
}

#[test]
fn test_linear_extrude_centered() {
    let rect = Polygon2D::rectangle(DVec2::ZERO, DVec2::ONE);
    let params = LinearExtrudeParams {
        height: 10.0,
        center: true,
        ..Default::default()
    };
    let (min, max) = linear_extrude(&rect, &params).unwrap().bounding_box();
    assert_relative_eq!(min.z, -5.0);
    assert_relative_eq!(max.z, 5.0);
}

#[test]
fn test_linear_extrude_concave_outline() {
    let l_shape = Polygon2D::new(vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(2.0, 1.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(1.0, 2.0),
        DVec2::new(0.0, 2.0),
        DVec2::new(0.0, 0.0),
    ]);
    let mesh = linear_extrude(&l_shape, &LinearExtrudeParams::default()).unwrap();
    assert_eq!(mesh.vertex_count(), 12);
    assert_relative_eq!(mesh.signed_volume(), 3.0, epsilon = 1e-9);
}

#[test]
fn test_linear_extrude_shear_preserves_volume() {
    let rect = Polygon2D::rectangle(DVec2::ZERO, DVec2::new(2.0, 2.0));
    let params = LinearExtrudeParams {
        height: 3.0,
        center: false,
        shear: DVec2::new(1.5, 0.0),
    };
    let mesh = linear_extrude(&rect, &params).unwrap();
    assert_relative_eq!(mesh.signed_volume(), 12.0, epsilon = 1e-9);
    assert_relative_eq!(mesh.bounding_box().1.x, 3.5);
}

#[test]
fn test_linear_extrude_invalid_height() {
    let rect = Polygon2D::rectangle(DVec2::ZERO, DVec2::ONE);
    let params = LinearExtrudeParams {
        height: 0.0,
        ..Default::default()
    };
    assert!(linear_extrude(&rect, &params).is_err());
}

#[test]
fn test_linear_extrude_collinear_outline() {
    let line = Polygon2D::new(vec![DVec2::ZERO, DVec2::X, DVec2::new(2.0, 0.0)]);
    assert!(linear_extrude(&line, &LinearExtrudeParams::default()).is_err());
}
