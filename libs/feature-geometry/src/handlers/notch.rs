//! Edge notches: contours reaching a face edge, extended past it so the
//! cut breaks cleanly through the edge.

use super::{base, CutHandler, SupportedCategories};
use crate::construction::GeometryService;
use crate::error::HandlerError;
use crate::model::{FeatureCategory, FeatureParams, NormalizedFeature, ProfileElement};
use crate::placement::FaceEnvelope;
use config::constants::{CONTOUR_EPSILON, ENVELOPE_CLAMP_PADDING};
use glam::DVec2;
use profile_mesh::Mesh;

/// Moves every coordinate lying on an envelope edge outward by the clamp
/// padding.
fn extend_past_edges(points: &[DVec2], envelope: &FaceEnvelope) -> Vec<DVec2> {
    let push = |value: f64, lo: f64, hi: f64| {
        if value <= lo + CONTOUR_EPSILON {
            lo - ENVELOPE_CLAMP_PADDING
        } else if value >= hi - CONTOUR_EPSILON {
            hi + ENVELOPE_CLAMP_PADDING
        } else {
            value
        }
    };
    points
        .iter()
        .map(|p| {
            DVec2::new(
                push(p.x, envelope.min.x, envelope.max.x),
                push(p.y, envelope.min.y, envelope.max.y),
            )
        })
        .collect()
}

/// Priority 65: Notch contours, and Cut contours touching a face edge.
#[derive(Debug, Default)]
pub struct NotchHandler;

impl CutHandler for NotchHandler {
    fn name(&self) -> &'static str {
        "notch"
    }

    fn priority(&self) -> i32 {
        65
    }

    fn supported_categories(&self) -> SupportedCategories {
        SupportedCategories::Only(vec![FeatureCategory::Notch, FeatureCategory::Cut])
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
        if *category == FeatureCategory::Notch {
            return true;
        }
        let envelope = base::placement_of(feature, element).envelope;
        base::contour_bounds(feature).is_some_and(|b| base::touches_envelope_edge(&b, &envelope))
    }

    fn create_cut_geometry(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
        service: &GeometryService,
    ) -> Result<Mesh, HandlerError> {
        let points = base::require_contour(feature, service)?;
        let envelope = base::placement_of(feature, element).envelope;
        base::shape_from_points(&extend_past_edges(&points, &envelope), feature, element, service)
    }

    fn detected_subtype(&self, _feature: &NormalizedFeature, _element: &ProfileElement) -> String {
        "edge-notch".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_points_are_pushed_out() {
        let envelope = FaceEnvelope {
            min: DVec2::ZERO,
            max: DVec2::new(1000.0, 200.0),
        };
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(50.0, 0.0),
            DVec2::new(50.0, 40.0),
            DVec2::new(0.0, 40.0),
        ];
        let extended = extend_past_edges(&points, &envelope);
        assert_eq!(extended[0], DVec2::new(-10.0, -10.0));
        assert_eq!(extended[1], DVec2::new(50.0, -10.0));
        assert_eq!(extended[2], DVec2::new(50.0, 40.0));
        assert_eq!(extended[3], DVec2::new(-10.0, 40.0));
    }
}
