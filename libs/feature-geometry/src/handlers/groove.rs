//! Grooves: an open path swept with a constant width, one strip per span.

use super::{base, CutHandler, SupportedCategories, ValidationReport};
use crate::combiner::CombineStrategy;
use crate::construction::{ContourOptions, GeometryService};
use crate::error::{ErrorKind, HandlerError};
use crate::model::{FeatureCategory, FeatureParams, NormalizedFeature, ProfileElement};
use config::constants::EPSILON;
use glam::DVec2;
use profile_mesh::Mesh;

/// Rectangle covering the span `a -> b` with the given full width.
/// Returns `None` for zero-length spans.
pub fn groove_strip(a: DVec2, b: DVec2, width: f64) -> Option<[DVec2; 4]> {
    if a.distance(b) < EPSILON {
        return None;
    }
    let along = (b - a).try_normalize()?;
    let side = along.perp() * (width / 2.0);
    Some([a - side, b - side, b + side, a + side])
}

/// Priority 55: Groove features.
#[derive(Debug, Default)]
pub struct GrooveHandler;

impl CutHandler for GrooveHandler {
    fn name(&self) -> &'static str {
        "groove"
    }

    fn priority(&self) -> i32 {
        55
    }

    fn supported_categories(&self) -> SupportedCategories {
        SupportedCategories::Only(vec![FeatureCategory::Groove])
    }

    fn can_handle(
        &self,
        _category: &FeatureCategory,
        feature: &NormalizedFeature,
        _element: &ProfileElement,
    ) -> bool {
        matches!(feature.params, FeatureParams::Groove { .. })
    }

    fn validate(&self, feature: &NormalizedFeature, _element: &ProfileElement) -> ValidationReport {
        let mut report = ValidationReport::default();
        base::check_face(feature, &mut report);

        let FeatureParams::Groove { path, width, depth } = &feature.params else {
            report.error(ErrorKind::MalformedFeature, "expected groove parameters");
            return report;
        };

        if path.iter().any(|p| !p.is_finite()) {
            report.error(ErrorKind::MalformedFeature, "groove path has non-finite points");
        } else if path.len() < 2 {
            report.error(
                ErrorKind::MalformedFeature,
                format!("groove path needs at least 2 points, got {}", path.len()),
            );
        } else if path.windows(2).all(|w| w[0].distance(w[1]) < EPSILON) {
            report.error(ErrorKind::GeometricDegenerate, "groove path has zero length");
        }
        if !width.is_finite() || *width <= 0.0 {
            report.error(
                ErrorKind::GeometricDegenerate,
                format!("groove width must be positive: {width}"),
            );
        }
        base::check_depth(*depth, &mut report);
        report
    }

    fn create_cut_geometry(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
        service: &GeometryService,
    ) -> Result<Mesh, HandlerError> {
        let FeatureParams::Groove { path, width, depth } = &feature.params else {
            return Err(HandlerError::malformed("expected groove parameters"));
        };
        let options = ContourOptions::on(base::face_of(feature)).with_depth(*depth);

        let parts = path
            .windows(2)
            .filter_map(|w| groove_strip(w[0], w[1], *width))
            .map(|strip| {
                service
                    .create_from_contour(&strip, element, &options)
                    .map_err(HandlerError::from)
            })
            .collect::<Result<Vec<_>, _>>()?;

        base::combine_parts(parts, CombineStrategy::Union, service)
    }

    fn detected_subtype(&self, feature: &NormalizedFeature, _element: &ProfileElement) -> String {
        match &feature.params {
            FeatureParams::Groove { path, .. } if path.len() > 2 => "polyline-groove".into(),
            _ => "straight-groove".into(),
        }
    }
}
