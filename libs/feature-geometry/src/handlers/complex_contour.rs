//! Contours with arcs, splines, beziers or bulges. Curves are tessellated
//! at the configured resolution before extrusion.

use super::{base, CutHandler, SupportedCategories};
use crate::construction::GeometryService;
use crate::error::HandlerError;
use crate::model::{FeatureCategory, NormalizedFeature, ProfileElement};
use profile_mesh::Mesh;

/// Priority 80: curved contours of any cut-like category.
#[derive(Debug, Default)]
pub struct ComplexContourHandler;

impl CutHandler for ComplexContourHandler {
    fn name(&self) -> &'static str {
        "complex-contour"
    }

    fn priority(&self) -> i32 {
        80
    }

    fn supported_categories(&self) -> SupportedCategories {
        SupportedCategories::Only(vec![
            FeatureCategory::Cut,
            FeatureCategory::Contour,
            FeatureCategory::Notch,
            FeatureCategory::Coping,
            FeatureCategory::Slot,
            FeatureCategory::Bevel,
        ])
    }

    fn can_handle(
        &self,
        _category: &FeatureCategory,
        feature: &NormalizedFeature,
        _element: &ProfileElement,
    ) -> bool {
        base::has_curves(feature)
    }

    fn create_cut_geometry(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
        service: &GeometryService,
    ) -> Result<Mesh, HandlerError> {
        let points = base::require_contour(feature, service)?;
        base::shape_from_points(&points, feature, element, service)
    }

    fn detected_subtype(&self, feature: &NormalizedFeature, _element: &ProfileElement) -> String {
        match &feature.params {
            crate::model::FeatureParams::Contour { segments, .. } if !segments.is_empty() => {
                "segmented-contour".to_string()
            }
            _ => "bulge-contour".to_string(),
        }
    }
}
