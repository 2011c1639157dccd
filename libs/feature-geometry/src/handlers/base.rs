//! Shared handler scaffolding: contour extraction, common validation,
//! envelope heuristics and metadata. Handlers compose these instead of
//! inheriting behaviour.

use super::{FeatureMetadata, GeometrySummary, ValidationReport};
use crate::combiner::CombineStrategy;
use crate::construction::{ContourOptions, GeometryService};
use crate::contour::{
    classify_complexity, compute_bounds, continuity_gaps, is_closed, normalize_points,
    polyline_with_bulges, tessellate_segments, ContourBounds,
};
use crate::error::{ErrorKind, HandlerError};
use crate::model::{FeatureParams, NormalizedFeature, ProfileElement};
use crate::placement::{resolve_face, FaceEnvelope, FaceLabel, FacePlacement};
use config::constants::{
    BULGE_EPSILON, CONTOUR_EPSILON, DEFAULT_CURVE_SUBDIVISIONS, EPSILON, MAX_ANGLE_DEGREES,
    MAX_CONTOUR_POINTS,
};
use glam::DVec2;
use profile_mesh::Mesh;

// =============================================================================
// CONTOUR EXTRACTION
// =============================================================================

/// Raw contour points of a feature, with curves flattened.
///
/// Segments take precedence over bulges, bulges over bare points. Returns
/// `None` for features without contour parameters.
pub fn contour_points(feature: &NormalizedFeature, subdivisions: u32) -> Option<Vec<DVec2>> {
    match &feature.params {
        FeatureParams::Contour {
            points,
            bulges,
            segments,
            ..
        } => {
            if !segments.is_empty() {
                Some(tessellate_segments(segments, subdivisions))
            } else if bulges.iter().any(|b| b.abs() >= BULGE_EPSILON) {
                Some(polyline_with_bulges(points, bulges, subdivisions))
            } else {
                Some(points.clone())
            }
        }
        _ => None,
    }
}

/// Cleaned contour points at default curve resolution.
pub fn normalized_contour(feature: &NormalizedFeature) -> Option<Vec<DVec2>> {
    contour_points(feature, DEFAULT_CURVE_SUBDIVISIONS).map(|p| normalize_points(&p))
}

/// Bounds of the cleaned contour.
pub fn contour_bounds(feature: &NormalizedFeature) -> Option<ContourBounds> {
    normalized_contour(feature).map(|p| compute_bounds(&p))
}

/// Returns true when the contour carries arcs, splines, beziers or bulges.
pub fn has_curves(feature: &NormalizedFeature) -> bool {
    match &feature.params {
        FeatureParams::Contour {
            bulges, segments, ..
        } => {
            segments.iter().any(|s| s.is_curved())
                || bulges.iter().any(|b| b.abs() >= BULGE_EPSILON)
        }
        _ => false,
    }
}

/// Face the feature is placed on; unknown labels fall back to the web.
pub fn face_of(feature: &NormalizedFeature) -> FaceLabel {
    resolve_face(&feature.face).0
}

/// Placement of the feature's face.
pub fn placement_of(feature: &NormalizedFeature, element: &ProfileElement) -> FacePlacement {
    FacePlacement::resolve(face_of(feature), &element.dimensions)
}

// =============================================================================
// ENVELOPE HEURISTICS
// =============================================================================

/// Returns true when the bounds leave the envelope by more than the
/// contour tolerance.
pub fn exceeds_envelope(bounds: &ContourBounds, envelope: &FaceEnvelope) -> bool {
    !envelope.contains(bounds.min(), CONTOUR_EPSILON) || !envelope.contains(bounds.max(), CONTOUR_EPSILON)
}

/// Returns true when the bounds reach an envelope edge.
pub fn touches_envelope_edge(bounds: &ContourBounds, envelope: &FaceEnvelope) -> bool {
    bounds.min_x <= envelope.min.x + CONTOUR_EPSILON
        || bounds.max_x >= envelope.max.x - CONTOUR_EPSILON
        || bounds.min_y <= envelope.min.y + CONTOUR_EPSILON
        || bounds.max_y >= envelope.max.y - CONTOUR_EPSILON
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Adds a warning when the face label was not recognised.
pub fn check_face(feature: &NormalizedFeature, report: &mut ValidationReport) {
    if let (_, Some(warning)) = resolve_face(&feature.face) {
        report.warn(ErrorKind::MalformedFeature, warning);
    }
}

/// Errors unless `depth` is absent or a positive finite number.
pub fn check_depth(depth: Option<f64>, report: &mut ValidationReport) {
    if let Some(d) = depth {
        if !d.is_finite() || d <= 0.0 {
            report.error(
                ErrorKind::GeometricDegenerate,
                format!("depth must be positive: {d}"),
            );
        }
    }
}

/// Errors unless `angle` is finite and within ±`MAX_ANGLE_DEGREES`.
pub fn check_angle(angle: f64, what: &str, report: &mut ValidationReport) {
    if !angle.is_finite() || angle.abs() > MAX_ANGLE_DEGREES {
        report.error(
            ErrorKind::GeometricDegenerate,
            format!("{what} angle out of range: {angle}"),
        );
    }
}

/// What a handler does with contour parts beyond the face envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overhang {
    /// Points are clamped to the padded envelope before extrusion.
    Clamped,
    /// The contour is extruded as given; the overhang cuts only air.
    Kept,
}

impl Overhang {
    fn message(self) -> &'static str {
        match self {
            Overhang::Clamped => "contour exceeds the face envelope and will be clamped",
            Overhang::Kept => "contour exceeds the face envelope; the overhang removes no material",
        }
    }
}

/// Common validation for contour-based features.
///
/// Errors: missing contour parameters, non-finite coordinates, fewer than
/// 3 points, zero-area bounds, bad depth or bevel. Warnings: unknown face,
/// open contour, segment gaps, envelope overrun, complexity.
pub fn validate_contour(
    feature: &NormalizedFeature,
    element: &ProfileElement,
    overhang: Overhang,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_face(feature, &mut report);

    let FeatureParams::Contour {
        points,
        bulges,
        segments,
        depth,
        bevel,
    } = &feature.params
    else {
        report.error(ErrorKind::MalformedFeature, "expected contour parameters");
        return report;
    };

    let non_finite = points.iter().any(|p| !p.is_finite())
        || bulges.iter().any(|b| !b.is_finite())
        || segments.iter().any(|s| {
            !s.start.is_finite()
                || !s.end.is_finite()
                || s.center.is_some_and(|c| !c.is_finite())
                || s.control_points.iter().any(|c| !c.is_finite())
        });
    if non_finite {
        report.error(ErrorKind::MalformedFeature, "contour has non-finite coordinates");
        return report;
    }
    if segments.iter().any(|s| s.radius.is_some_and(|r| r <= 0.0)) {
        report.error(ErrorKind::GeometricDegenerate, "arc radius must be positive");
    }

    check_depth(*depth, &mut report);
    if let Some(angle) = bevel {
        check_angle(*angle, "bevel", &mut report);
    }

    let raw = contour_points(feature, DEFAULT_CURVE_SUBDIVISIONS).unwrap_or_default();
    let cleaned = normalize_points(&raw);
    if cleaned.len() < 3 {
        report.error(
            ErrorKind::MalformedFeature,
            format!("contour needs at least 3 points, got {}", cleaned.len()),
        );
        return report;
    }

    let bounds = compute_bounds(&cleaned);
    if bounds.width < EPSILON || bounds.height < EPSILON {
        report.error(ErrorKind::GeometricDegenerate, "contour bounds have zero area");
    }

    if !is_closed(&raw, CONTOUR_EPSILON) {
        report.warn(ErrorKind::MalformedFeature, "contour is open and will be closed");
    }
    let gaps = continuity_gaps(segments, CONTOUR_EPSILON);
    if !gaps.is_empty() {
        report.warn(
            ErrorKind::MalformedFeature,
            format!("segment gaps after segments {gaps:?}"),
        );
    }

    let envelope = placement_of(feature, element).envelope;
    if exceeds_envelope(&bounds, &envelope) {
        report.warn(ErrorKind::OutOfEnvelope, overhang.message());
    }

    let complexity = classify_complexity(&raw);
    if complexity.point_count > MAX_CONTOUR_POINTS {
        report.warn(
            ErrorKind::ComplexityExceeded,
            format!("contour has {} points", complexity.point_count),
        );
    }
    if complexity.self_intersections > 0 {
        report.warn(
            ErrorKind::ComplexityExceeded,
            format!("contour self-intersects {} times", complexity.self_intersections),
        );
    }

    report
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

/// Wall inclination of a contour feature, if given.
pub fn bevel_of(feature: &NormalizedFeature) -> Option<f64> {
    match &feature.params {
        FeatureParams::Contour { bevel, .. } => *bevel,
        _ => None,
    }
}

/// True when the contour walls are inclined. Box primitives cannot carry a
/// bevel, so box-building handlers decline these.
pub fn is_bevelled(feature: &NormalizedFeature) -> bool {
    bevel_of(feature).is_some_and(|angle| angle.abs() > EPSILON)
}

/// Extrusion options from the feature's face, depth and bevel.
pub fn contour_options(feature: &NormalizedFeature) -> ContourOptions {
    ContourOptions {
        bevel: bevel_of(feature),
        ..ContourOptions::on(face_of(feature)).with_depth(feature.params.depth())
    }
}

/// Extrudes `points` on the feature's face.
pub fn shape_from_points(
    points: &[DVec2],
    feature: &NormalizedFeature,
    element: &ProfileElement,
    service: &GeometryService,
) -> Result<Mesh, HandlerError> {
    Ok(service.create_from_contour(points, element, &contour_options(feature))?)
}

/// Contour points at the service's curve resolution.
pub fn require_contour(
    feature: &NormalizedFeature,
    service: &GeometryService,
) -> Result<Vec<DVec2>, HandlerError> {
    contour_points(feature, service.config().curve_subdivisions)
        .ok_or_else(|| HandlerError::malformed("expected contour parameters"))
}

/// Folds the partial solids of a compound cut with the service's combiner.
pub fn combine_parts(
    parts: Vec<Mesh>,
    strategy: CombineStrategy,
    service: &GeometryService,
) -> Result<Mesh, HandlerError> {
    if parts.is_empty() {
        return Err(HandlerError::construction("no partial solids were produced"));
    }
    Ok(service.combine(parts, strategy).mesh)
}

// =============================================================================
// METADATA
// =============================================================================

/// Builds metadata from the feature's own parameters.
pub fn metadata(
    handler_name: &str,
    detected_subtype: String,
    feature: &NormalizedFeature,
    element: &ProfileElement,
) -> FeatureMetadata {
    let placement = placement_of(feature, element);
    let points = match &feature.params {
        FeatureParams::Contour { .. } => normalized_contour(feature).unwrap_or_default(),
        FeatureParams::Groove { path, .. } => path.clone(),
        FeatureParams::Hole { center, .. } => vec![*center],
        FeatureParams::Marking { position, .. } => vec![*position],
        FeatureParams::EndCut { .. } => Vec::new(),
    };
    let bounds = (!points.is_empty()).then(|| compute_bounds(&points));

    FeatureMetadata {
        feature_id: feature.id.clone(),
        handler_name: handler_name.to_string(),
        detected_subtype,
        summary: GeometrySummary {
            bounds,
            point_count: points.len(),
            depth: feature.params.depth().unwrap_or(placement.depth),
            face: placement.face,
        },
        warnings: Vec::new(),
        error: None,
    }
}
