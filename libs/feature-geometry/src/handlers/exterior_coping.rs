//! Copes and cuts whose contour leaves the face envelope. The contour is
//! clamped to a padded envelope so the solid stays bounded.

use super::base::{self, Overhang};
use super::{CutHandler, SupportedCategories, ValidationReport};
use crate::construction::GeometryService;
use crate::contour::clamp_to_rect;
use crate::error::HandlerError;
use crate::model::{FeatureCategory, FeatureParams, NormalizedFeature, ProfileElement};
use config::constants::ENVELOPE_CLAMP_PADDING;
use profile_mesh::Mesh;

/// Priority 90: Coping features and contours beyond the face envelope.
#[derive(Debug, Default)]
pub struct ExteriorCopingHandler;

impl CutHandler for ExteriorCopingHandler {
    fn name(&self) -> &'static str {
        "exterior-coping"
    }

    fn priority(&self) -> i32 {
        90
    }

    fn supported_categories(&self) -> SupportedCategories {
        SupportedCategories::Only(vec![
            FeatureCategory::Coping,
            FeatureCategory::Cut,
            FeatureCategory::Contour,
            FeatureCategory::Notch,
        ])
    }

    fn can_handle(
        &self,
        category: &FeatureCategory,
        feature: &NormalizedFeature,
        element: &ProfileElement,
    ) -> bool {
        if !matches!(feature.params, FeatureParams::Contour { .. }) {
            return false;
        }
        if *category == FeatureCategory::Coping {
            return true;
        }
        base::contour_bounds(feature).is_some_and(|bounds| {
            base::exceeds_envelope(&bounds, &base::placement_of(feature, element).envelope)
        })
    }

    fn validate(&self, feature: &NormalizedFeature, element: &ProfileElement) -> ValidationReport {
        base::validate_contour(feature, element, Overhang::Clamped)
    }

    fn create_cut_geometry(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
        service: &GeometryService,
    ) -> Result<Mesh, HandlerError> {
        let points = base::require_contour(feature, service)?;
        let envelope = base::placement_of(feature, element)
            .envelope
            .padded(ENVELOPE_CLAMP_PADDING);
        let clamped = clamp_to_rect(&points, envelope.min, envelope.max);
        base::shape_from_points(&clamped, feature, element, service)
    }

    fn detected_subtype(&self, feature: &NormalizedFeature, _element: &ProfileElement) -> String {
        if feature.category == FeatureCategory::Coping {
            "coping".to_string()
        } else {
            "exterior-cut".to_string()
        }
    }
}
