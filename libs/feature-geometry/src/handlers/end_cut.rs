//! Square and angled cuts at a member extremity.

use super::{base, CutHandler, SupportedCategories, ValidationReport};
use crate::construction::GeometryService;
use crate::error::{ErrorKind, HandlerError};
use crate::model::{FeatureCategory, FeatureParams, NormalizedFeature, ProfileElement};
use config::constants::approx_zero;
use profile_mesh::Mesh;

/// Priority 68: EndCut and Bevel features with end-cut parameters.
#[derive(Debug, Default)]
pub struct EndCutHandler;

impl CutHandler for EndCutHandler {
    fn name(&self) -> &'static str {
        "end-cut"
    }

    fn priority(&self) -> i32 {
        68
    }

    fn supported_categories(&self) -> SupportedCategories {
        SupportedCategories::Only(vec![FeatureCategory::EndCut, FeatureCategory::Bevel])
    }

    fn can_handle(
        &self,
        _category: &FeatureCategory,
        feature: &NormalizedFeature,
        _element: &ProfileElement,
    ) -> bool {
        matches!(feature.params, FeatureParams::EndCut { .. })
    }

    fn validate(&self, feature: &NormalizedFeature, element: &ProfileElement) -> ValidationReport {
        let mut report = ValidationReport::default();
        let FeatureParams::EndCut { angle, depth, .. } = feature.params else {
            report.error(ErrorKind::MalformedFeature, "expected end-cut parameters");
            return report;
        };

        base::check_angle(angle, "end cut", &mut report);
        if report.is_valid() && angle.abs() >= 90.0 {
            report.error(
                ErrorKind::GeometricDegenerate,
                format!("end cut angle must be within (-90, 90) degrees: {angle}"),
            );
        }
        if let Some(d) = depth {
            if !d.is_finite() || d < 0.0 || d >= element.dimensions.length {
                report.error(
                    ErrorKind::GeometricDegenerate,
                    format!("end cut depth must be within [0, length): {d}"),
                );
            }
        }
        report
    }

    fn create_cut_geometry(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
        service: &GeometryService,
    ) -> Result<Mesh, HandlerError> {
        let FeatureParams::EndCut { end, angle, depth } = feature.params else {
            return Err(HandlerError::malformed("expected end-cut parameters"));
        };
        Ok(service.create_end_face(angle, end, element, depth)?)
    }

    fn detected_subtype(&self, feature: &NormalizedFeature, _element: &ProfileElement) -> String {
        match feature.params {
            FeatureParams::EndCut { angle, .. } if !approx_zero(angle) => "angled-end".into(),
            _ => "square-end".into(),
        }
    }
}
