//! Generic straight-edged contours, extruded as given.

use super::{base, CutHandler, SupportedCategories};
use crate::construction::GeometryService;
use crate::error::HandlerError;
use crate::model::{FeatureCategory, NormalizedFeature, ProfileElement};
use profile_mesh::Mesh;

/// Priority 50: any contour with at least 3 usable points.
#[derive(Debug, Default)]
pub struct ContourCutHandler;

impl CutHandler for ContourCutHandler {
    fn name(&self) -> &'static str {
        "contour-cut"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn supported_categories(&self) -> SupportedCategories {
        SupportedCategories::Only(vec![
            FeatureCategory::Cut,
            FeatureCategory::Contour,
            FeatureCategory::Bevel,
            FeatureCategory::Notch,
        ])
    }

    fn can_handle(
        &self,
        _category: &FeatureCategory,
        feature: &NormalizedFeature,
        _element: &ProfileElement,
    ) -> bool {
        base::normalized_contour(feature).is_some_and(|p| p.len() >= 3)
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

    fn detected_subtype(&self, _feature: &NormalizedFeature, _element: &ProfileElement) -> String {
        "contour".into()
    }
}
