//! Four-corner axis-aligned contours, built as a box primitive.

use super::{base, CutHandler, SupportedCategories};
use crate::construction::{GeometryService, Primitive};
use crate::contour::is_axis_aligned;
use crate::error::HandlerError;
use crate::model::{FeatureCategory, NormalizedFeature, ProfileElement};
use profile_mesh::Mesh;

/// Priority 75: rectangles given as 4 points, or 5 with a closing point.
#[derive(Debug, Default)]
pub struct RectangularCutHandler;

impl CutHandler for RectangularCutHandler {
    fn name(&self) -> &'static str {
        "rectangular-cut"
    }

    fn priority(&self) -> i32 {
        75
    }

    fn supported_categories(&self) -> SupportedCategories {
        SupportedCategories::Only(vec![
            FeatureCategory::Cut,
            FeatureCategory::Contour,
            FeatureCategory::Notch,
        ])
    }

    fn can_handle(
        &self,
        _category: &FeatureCategory,
        feature: &NormalizedFeature,
        _element: &ProfileElement,
    ) -> bool {
        !base::has_curves(feature)
            && !base::is_bevelled(feature)
            && base::normalized_contour(feature)
                .is_some_and(|p| p.len() == 4 && is_axis_aligned(&p))
    }

    fn create_cut_geometry(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
        service: &GeometryService,
    ) -> Result<Mesh, HandlerError> {
        let bounds = base::contour_bounds(feature)
            .ok_or_else(|| HandlerError::malformed("expected contour parameters"))?;
        let rect = Primitive::Box {
            min: bounds.min(),
            max: bounds.max(),
        };
        Ok(service.create_primitive(rect, element, base::face_of(feature), feature.params.depth())?)
    }

    fn detected_subtype(&self, _feature: &NormalizedFeature, _element: &ProfileElement) -> String {
        "rectangular".into()
    }
}
