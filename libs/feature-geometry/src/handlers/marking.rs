//! Text markings: a shallow scribe over the text's bounding rectangle.

use super::{base, CutHandler, SupportedCategories, ValidationReport};
use crate::construction::{ContourOptions, GeometryService};
use crate::error::{ErrorKind, HandlerError};
use crate::model::{FeatureCategory, FeatureParams, NormalizedFeature, ProfileElement};
use config::constants::{MARKING_CHAR_WIDTH_RATIO, MARKING_DEPTH};
use glam::DVec2;
use profile_mesh::Mesh;

/// Corners of the text rectangle, anchored at its lower-left corner and
/// rotated by `angle` degrees about the anchor.
pub fn marking_outline(position: DVec2, text: &str, height: f64, angle: f64) -> Vec<DVec2> {
    let width = text.chars().count() as f64 * height * MARKING_CHAR_WIDTH_RATIO;
    let rotation = DVec2::from_angle(angle.to_radians());
    [
        DVec2::ZERO,
        DVec2::new(width, 0.0),
        DVec2::new(width, height),
        DVec2::new(0.0, height),
    ]
    .into_iter()
    .map(|corner| position + rotation.rotate(corner))
    .collect()
}

/// Priority 60: Marking features.
#[derive(Debug, Default)]
pub struct MarkingHandler;

impl CutHandler for MarkingHandler {
    fn name(&self) -> &'static str {
        "marking"
    }

    fn priority(&self) -> i32 {
        60
    }

    fn supported_categories(&self) -> SupportedCategories {
        SupportedCategories::Only(vec![FeatureCategory::Marking])
    }

    fn can_handle(
        &self,
        _category: &FeatureCategory,
        feature: &NormalizedFeature,
        _element: &ProfileElement,
    ) -> bool {
        matches!(feature.params, FeatureParams::Marking { .. })
    }

    fn validate(&self, feature: &NormalizedFeature, _element: &ProfileElement) -> ValidationReport {
        let mut report = ValidationReport::default();
        base::check_face(feature, &mut report);

        let FeatureParams::Marking {
            position,
            text,
            height,
            angle,
            depth,
        } = &feature.params
        else {
            report.error(ErrorKind::MalformedFeature, "expected marking parameters");
            return report;
        };

        if text.trim().is_empty() {
            report.error(ErrorKind::MalformedFeature, "marking text is empty");
        }
        if !position.is_finite() {
            report.error(ErrorKind::MalformedFeature, "marking position is not finite");
        }
        if !height.is_finite() || *height <= 0.0 {
            report.error(
                ErrorKind::GeometricDegenerate,
                format!("marking height must be positive: {height}"),
            );
        }
        base::check_angle(*angle, "marking", &mut report);
        base::check_depth(*depth, &mut report);
        report
    }

    fn create_cut_geometry(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
        service: &GeometryService,
    ) -> Result<Mesh, HandlerError> {
        let FeatureParams::Marking {
            position,
            text,
            height,
            angle,
            depth,
        } = &feature.params
        else {
            return Err(HandlerError::malformed("expected marking parameters"));
        };

        let placement = base::placement_of(feature, element);
        let scribe = depth.unwrap_or(MARKING_DEPTH);
        // Scribe from the exterior surface inward
        let offset = service.config().cut_clearance - scribe / 2.0;
        let options = ContourOptions {
            normal_offset: placement.exterior_offset() + placement.outward() * offset,
            ..ContourOptions::on(base::face_of(feature)).with_depth(Some(scribe))
        };

        let outline = marking_outline(*position, text, *height, *angle);
        Ok(service.create_from_contour(&outline, element, &options)?)
    }

    fn detected_subtype(&self, _feature: &NormalizedFeature, _element: &ProfileElement) -> String {
        "text-marking".into()
    }
}
