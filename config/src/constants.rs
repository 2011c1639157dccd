//! # Configuration Constants
//!
//! Centralized constants for the feature-geometry pipeline.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Contour**: Closure, parallelism and bulge thresholds for 2D contours
//! - **Tessellation**: Default subdivision counts for arcs, circles and curves
//! - **Placement**: Depth margins and cut clearances
//! - **Heuristics**: Thresholds used by cut handlers to classify shapes
//! - **CSG**: Budgets for boolean operations

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Epsilon for vertex deduplication and degenerate triangle detection.
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

/// Plane classification tolerance used by the BSP boolean engine.
pub const PLANE_EPSILON: f64 = 1e-5;

// =============================================================================
// CONTOUR CONSTANTS
// =============================================================================

/// Distance under which two contour points are considered coincident.
///
/// A contour is closed when its first and last points are within this
/// distance. Gaps larger than this between consecutive segments are reported
/// as continuity warnings.
///
/// # Example
///
/// ```rust
/// use config::constants::CONTOUR_EPSILON;
///
/// let first = (0.0_f64, 0.0_f64);
/// let last = (0.05_f64, 0.0_f64);
/// let distance = ((last.0 - first.0).powi(2) + (last.1 - first.1).powi(2)).sqrt();
/// assert!(distance <= CONTOUR_EPSILON);
/// ```
pub const CONTOUR_EPSILON: f64 = 0.1;

/// Determinant magnitude under which two segments are treated as parallel
/// by the self-intersection test.
pub const PARALLEL_EPSILON: f64 = 1e-2;

/// Bulge magnitude under which a polyline span is treated as straight.
pub const BULGE_EPSILON: f64 = 1e-3;

/// Contours with more points than this trigger a complexity warning.
pub const MAX_CONTOUR_POINTS: usize = 500;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Default facet count for full circles (holes, cylinders).
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Default subdivision count for a single arc, bezier or spline span.
pub const DEFAULT_CURVE_SUBDIVISIONS: u32 = 16;

/// Minimum number of facets for any circular shape.
pub const MIN_FRAGMENTS: u32 = 8;

/// Maximum number of facets for any circular shape.
pub const MAX_FRAGMENTS: u32 = 256;

/// Target maximum chord length when deriving facet counts from a radius.
pub const MAX_CHORD_LENGTH: f64 = 2.0;

// =============================================================================
// PLACEMENT CONSTANTS
// =============================================================================

/// Extra depth added to `max(web, flange)` for faces without a natural
/// plate thickness (Left, Right, Front, Back, Top).
///
/// # Example
///
/// ```rust
/// use config::constants::FACE_DEPTH_MARGIN;
///
/// let (web, flange) = (8.6, 13.5);
/// let depth = f64::max(web, flange) + FACE_DEPTH_MARGIN;
/// assert!(depth > flange);
/// ```
pub const FACE_DEPTH_MARGIN: f64 = 2.0;

/// Distance a cutting solid overshoots each side of the plate it pierces.
///
/// Keeps cut faces from landing coplanar with the plate surfaces, which the
/// BSP boolean engine handles poorly.
pub const CUT_CLEARANCE: f64 = 0.5;

/// Depth of scribed markings.
pub const MARKING_DEPTH: f64 = 0.5;

/// Width of a single marking character relative to its height.
pub const MARKING_CHAR_WIDTH_RATIO: f64 = 0.6;

/// End-cut volumes extend this many times the larger section dimension
/// beyond the member extremity.
pub const END_CUT_EXTENT_FACTOR: f64 = 2.0;

/// Padding around the face envelope used when clamping exterior contours.
pub const ENVELOPE_CLAMP_PADDING: f64 = 10.0;

// =============================================================================
// HEURISTIC CONSTANTS
// =============================================================================

/// Minimum long/short side ratio for a contour to be treated as a slot.
pub const SLOT_MIN_ASPECT_RATIO: f64 = 3.0;

/// Maximum long side length for a contour to be treated as a slot.
pub const SLOT_MAX_LENGTH: f64 = 150.0;

/// Fraction of the member length an outline must span to be treated as an
/// end-notch pattern.
pub const NOTCH_PATTERN_MIN_SPAN: f64 = 0.9;

/// Absolute angle limit, in degrees, for bevels and end cuts.
pub const MAX_ANGLE_DEGREES: f64 = 180.0;

// =============================================================================
// CSG CONSTANTS
// =============================================================================

/// Maximum combined polygon count accepted by a single boolean call.
pub const CSG_MAX_POLYGONS: usize = 200_000;

/// Wall-clock budget for a single boolean call, in milliseconds.
pub const CSG_TIME_BUDGET_MS: u64 = 5_000;

/// Padding around the subtrahend's bounding box. Minuend faces outside the
/// padded box are not clipped by a difference.
pub const CSG_LOCAL_MARGIN: f64 = 1e-3;

/// Relative area mismatch under which the fragments of a triangle are
/// fused back into the triangle.
pub const CSG_FRAGMENT_AREA_TOLERANCE: f64 = 1e-9;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Computes the number of facets for a circle of the given radius.
///
/// Uses the chord length target `MAX_CHORD_LENGTH` and clamps the result to
/// `MIN_FRAGMENTS..=MAX_FRAGMENTS`. A positive `override_segments` wins;
/// zero or non-finite radii fall back to `DEFAULT_SEGMENTS`.
///
/// # Example
///
/// ```rust
/// use config::constants::{segments_for_radius, MIN_FRAGMENTS};
///
/// assert_eq!(segments_for_radius(10.0, 24), 24);
/// assert!(segments_for_radius(0.5, 0) >= MIN_FRAGMENTS);
/// ```
pub fn segments_for_radius(radius: f64, override_segments: u32) -> u32 {
    let segments = if override_segments > 0 {
        override_segments
    } else if !radius.is_finite() || approx_zero(radius) {
        DEFAULT_SEGMENTS
    } else {
        let circumference = 2.0 * std::f64::consts::PI * radius.abs();
        (circumference / MAX_CHORD_LENGTH).ceil() as u32
    };

    segments.clamp(MIN_FRAGMENTS, MAX_FRAGMENTS)
}

/// Checks if a f64 value is approximately zero within EPSILON.
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
