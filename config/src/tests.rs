//! # Tests for Config Constants
//!
//! Unit tests verifying the relationships between configuration constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_vertex_merge_epsilon_larger_than_epsilon() {
    assert!(
        VERTEX_MERGE_EPSILON >= EPSILON,
        "VERTEX_MERGE_EPSILON should be >= EPSILON"
    );
}

#[test]
fn test_plane_epsilon_smaller_than_contour_epsilon() {
    assert!(PLANE_EPSILON < CONTOUR_EPSILON);
}

// =============================================================================
// CONTOUR TESTS
// =============================================================================

#[test]
fn test_contour_epsilon_value() {
    assert_eq!(CONTOUR_EPSILON, 0.1);
}

#[test]
fn test_parallel_and_bulge_thresholds() {
    assert_eq!(PARALLEL_EPSILON, 1e-2);
    assert_eq!(BULGE_EPSILON, 1e-3);
}

#[test]
fn test_max_contour_points() {
    assert_eq!(MAX_CONTOUR_POINTS, 500);
}

// =============================================================================
// TESSELLATION TESTS
// =============================================================================

#[test]
fn test_fragment_bounds_ordered() {
    assert!(MIN_FRAGMENTS >= 3);
    assert!(MIN_FRAGMENTS < MAX_FRAGMENTS);
    assert!(DEFAULT_SEGMENTS >= MIN_FRAGMENTS && DEFAULT_SEGMENTS <= MAX_FRAGMENTS);
}

#[test]
fn test_segments_for_degenerate_radius() {
    assert_eq!(segments_for_radius(0.0, 0), DEFAULT_SEGMENTS);
    assert_eq!(segments_for_radius(f64::NAN, 0), DEFAULT_SEGMENTS);
}

#[test]
fn test_segments_for_radius_override() {
    assert_eq!(segments_for_radius(100.0, 16), 16);
}

#[test]
fn test_segments_for_radius_clamps_small() {
    assert_eq!(segments_for_radius(0.1, 0), MIN_FRAGMENTS);
}

#[test]
fn test_segments_for_radius_clamps_large() {
    assert_eq!(segments_for_radius(1.0e6, 0), MAX_FRAGMENTS);
}

#[test]
fn test_segments_for_radius_grows_with_radius() {
    assert!(segments_for_radius(40.0, 0) > segments_for_radius(5.0, 0));
}

// =============================================================================
// PLACEMENT AND HEURISTIC TESTS
// =============================================================================

#[test]
fn test_clearances_positive() {
    assert!(CUT_CLEARANCE > 0.0);
    assert!(FACE_DEPTH_MARGIN > 0.0);
    assert!(MARKING_DEPTH > 0.0);
}

#[test]
fn test_slot_thresholds() {
    assert!(SLOT_MIN_ASPECT_RATIO > 1.0);
    assert!(SLOT_MAX_LENGTH > 0.0);
}

#[test]
fn test_notch_pattern_span_is_fraction() {
    assert!(NOTCH_PATTERN_MIN_SPAN > 0.5 && NOTCH_PATTERN_MIN_SPAN <= 1.0);
}

#[test]
fn test_local_csg_margin_exceeds_plane_tolerance() {
    // B's vertices must classify strictly inside the padded box
    assert!(CSG_LOCAL_MARGIN > 10.0 * PLANE_EPSILON);
    assert!(CSG_FRAGMENT_AREA_TOLERANCE < PLANE_EPSILON);
}

#[test]
fn test_approx_helpers() {
    assert!(approx_zero(-1e-12));
    assert!(!approx_zero(1e-3));
}
