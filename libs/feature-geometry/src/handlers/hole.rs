//! Drilled holes: a cylinder, or an obround for slotted holes.

use super::{base, CutHandler, SupportedCategories, ValidationReport};
use crate::construction::{ContourOptions, GeometryService, Primitive};
use crate::contour::obround;
use crate::error::{ErrorKind, HandlerError};
use crate::model::{FeatureCategory, FeatureParams, NormalizedFeature, ProfileElement};
use config::constants::EPSILON;
use profile_mesh::Mesh;

/// Priority 70: Hole features.
#[derive(Debug, Default)]
pub struct HoleHandler;

impl CutHandler for HoleHandler {
    fn name(&self) -> &'static str {
        "hole"
    }

    fn priority(&self) -> i32 {
        70
    }

    fn supported_categories(&self) -> SupportedCategories {
        SupportedCategories::Only(vec![FeatureCategory::Hole])
    }

    fn can_handle(
        &self,
        _category: &FeatureCategory,
        feature: &NormalizedFeature,
        _element: &ProfileElement,
    ) -> bool {
        matches!(feature.params, FeatureParams::Hole { .. })
    }

    fn validate(&self, feature: &NormalizedFeature, element: &ProfileElement) -> ValidationReport {
        let mut report = ValidationReport::default();
        base::check_face(feature, &mut report);

        let FeatureParams::Hole {
            center,
            diameter,
            depth,
            elongation,
        } = &feature.params
        else {
            report.error(ErrorKind::MalformedFeature, "expected hole parameters");
            return report;
        };

        if !center.is_finite() {
            report.error(ErrorKind::MalformedFeature, "hole centre is not finite");
        }
        if !diameter.is_finite() || *diameter <= 0.0 {
            report.error(
                ErrorKind::GeometricDegenerate,
                format!("hole diameter must be positive: {diameter}"),
            );
        }
        if !elongation.is_finite() || *elongation < 0.0 {
            report.error(
                ErrorKind::GeometricDegenerate,
                format!("hole elongation must be non-negative: {elongation}"),
            );
        }
        base::check_depth(*depth, &mut report);

        let envelope = base::placement_of(feature, element).envelope;
        if report.is_valid() && !envelope.contains(*center, 0.0) {
            report.warn(ErrorKind::OutOfEnvelope, "hole centre lies outside the face");
        }
        report
    }

    fn create_cut_geometry(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
        service: &GeometryService,
    ) -> Result<Mesh, HandlerError> {
        let FeatureParams::Hole {
            center,
            diameter,
            depth,
            elongation,
        } = feature.params
        else {
            return Err(HandlerError::malformed("expected hole parameters"));
        };
        let face = base::face_of(feature);
        let radius = diameter / 2.0;

        if elongation > EPSILON {
            let outline = obround(
                center,
                diameter + elongation,
                diameter,
                0.0,
                service.circle_segments(radius),
            );
            let options = ContourOptions::on(face).with_depth(depth);
            Ok(service.create_from_contour(&outline, element, &options)?)
        } else {
            Ok(service.create_primitive(Primitive::Cylinder { center, radius }, element, face, depth)?)
        }
    }

    fn detected_subtype(&self, feature: &NormalizedFeature, _element: &ProfileElement) -> String {
        match feature.params {
            FeatureParams::Hole { elongation, .. } if elongation > EPSILON => "slotted-hole".into(),
            _ => "round-hole".into(),
        }
    }
}
