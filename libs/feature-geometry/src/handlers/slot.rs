//! Elongated contours: rebuilt as an obround along their long axis.

use super::{base, CutHandler, SupportedCategories};
use crate::construction::GeometryService;
use crate::contour::{obround, ContourBounds};
use crate::error::HandlerError;
use crate::model::{FeatureCategory, FeatureParams, NormalizedFeature, ProfileElement};
use config::constants::{EPSILON, SLOT_MAX_LENGTH, SLOT_MIN_ASPECT_RATIO};
use profile_mesh::Mesh;
use std::f64::consts::FRAC_PI_2;

fn is_slot_shaped(bounds: &ContourBounds) -> bool {
    let long = bounds.width.max(bounds.height);
    let short = bounds.width.min(bounds.height);
    short > EPSILON && long / short > SLOT_MIN_ASPECT_RATIO && long <= SLOT_MAX_LENGTH
}

/// Priority 85: Slot features and small elongated contours.
#[derive(Debug, Default)]
pub struct SlotHandler;

impl CutHandler for SlotHandler {
    fn name(&self) -> &'static str {
        "slot"
    }

    fn priority(&self) -> i32 {
        85
    }

    fn supported_categories(&self) -> SupportedCategories {
        SupportedCategories::Only(vec![
            FeatureCategory::Slot,
            FeatureCategory::Cut,
            FeatureCategory::Notch,
        ])
    }

    fn can_handle(
        &self,
        category: &FeatureCategory,
        feature: &NormalizedFeature,
        _element: &ProfileElement,
    ) -> bool {
        if !matches!(feature.params, FeatureParams::Contour { .. }) {
            return false;
        }
        *category == FeatureCategory::Slot
            || base::contour_bounds(feature).is_some_and(|b| is_slot_shaped(&b))
    }

    fn create_cut_geometry(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
        service: &GeometryService,
    ) -> Result<Mesh, HandlerError> {
        let bounds = base::contour_bounds(feature)
            .ok_or_else(|| HandlerError::malformed("expected contour parameters"))?;
        let (long, short, angle) = if bounds.width >= bounds.height {
            (bounds.width, bounds.height, 0.0)
        } else {
            (bounds.height, bounds.width, FRAC_PI_2)
        };

        let outline = obround(
            bounds.center(),
            long,
            short,
            angle,
            service.circle_segments(short / 2.0),
        );
        base::shape_from_points(&outline, feature, element, service)
    }
}
