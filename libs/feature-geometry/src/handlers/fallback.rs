//! Last resort for cut-like features no specific handler accepted.
//! Builds the best available approximation instead of rejecting.

use super::{base, CutHandler, SupportedCategories, ValidationReport};
use crate::construction::{GeometryService, Primitive};
use crate::contour::{compute_bounds, normalize_points};
use crate::error::{ErrorKind, HandlerError};
use crate::model::{FeatureCategory, FeatureParams, NormalizedFeature, ProfileElement};
use config::constants::{EPSILON, FACE_DEPTH_MARGIN};
use glam::DVec2;
use profile_mesh::Mesh;

/// Finite input points of the feature, whatever its parameter shape.
fn usable_points(feature: &NormalizedFeature, service: &GeometryService) -> Vec<DVec2> {
    let raw = match &feature.params {
        FeatureParams::Contour { .. } => {
            base::contour_points(feature, service.config().curve_subdivisions).unwrap_or_default()
        }
        FeatureParams::Groove { path, .. } => path.clone(),
        FeatureParams::Hole { center, .. } => vec![*center],
        FeatureParams::Marking { position, .. } => vec![*position],
        FeatureParams::EndCut { .. } => Vec::new(),
    };
    raw.into_iter().filter(|p| p.is_finite()).collect()
}

/// Priority 0: every cut-like category.
#[derive(Debug, Default)]
pub struct FallbackHandler;

impl CutHandler for FallbackHandler {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn supported_categories(&self) -> SupportedCategories {
        SupportedCategories::All
    }

    fn can_handle(
        &self,
        category: &FeatureCategory,
        _feature: &NormalizedFeature,
        _element: &ProfileElement,
    ) -> bool {
        category.is_cut_like()
    }

    fn validate(&self, feature: &NormalizedFeature, _element: &ProfileElement) -> ValidationReport {
        let mut report = ValidationReport::default();
        base::check_face(feature, &mut report);
        base::check_depth(feature.params.depth(), &mut report);

        let has_geometry = match &feature.params {
            FeatureParams::Contour { points, segments, .. } => {
                points.iter().any(|p| p.is_finite()) || !segments.is_empty()
            }
            FeatureParams::Groove { path, .. } => path.iter().any(|p| p.is_finite()),
            FeatureParams::Hole { center, diameter, .. } => center.is_finite() && *diameter > 0.0,
            FeatureParams::Marking { .. } | FeatureParams::EndCut { .. } => false,
        };
        if !has_geometry {
            report.error(ErrorKind::MalformedFeature, "feature carries no usable geometry");
        } else {
            report.warn(
                ErrorKind::MalformedFeature,
                "no specific handler matched; geometry is approximated",
            );
        }
        report
    }

    fn create_cut_geometry(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
        service: &GeometryService,
    ) -> Result<Mesh, HandlerError> {
        let face = base::face_of(feature);
        let depth = feature.params.depth();

        match &feature.params {
            FeatureParams::Hole { center, diameter, .. } => {
                let primitive = Primitive::Cylinder {
                    center: *center,
                    radius: diameter / 2.0,
                };
                return Ok(service.create_primitive(primitive, element, face, depth)?);
            }
            FeatureParams::Groove { path, width, .. } => {
                let points: Vec<DVec2> = path.iter().copied().filter(|p| p.is_finite()).collect();
                if points.is_empty() {
                    return Err(HandlerError::malformed("groove path has no finite points"));
                }
                let bounds = compute_bounds(&points);
                let grow = (width.abs() / 2.0).max(FACE_DEPTH_MARGIN / 2.0);
                let primitive = Primitive::Box {
                    min: bounds.min() - grow,
                    max: bounds.max() + grow,
                };
                return Ok(service.create_primitive(primitive, element, face, depth)?);
            }
            _ => {}
        }

        let points = normalize_points(&usable_points(feature, service));
        if points.len() >= 3 {
            if let Ok(mesh) = base::shape_from_points(&points, feature, element, service) {
                return Ok(mesh);
            }
        }
        if points.is_empty() {
            return Err(HandlerError::construction("no geometry to approximate"));
        }

        // Flat or collinear input: cut its padded bounding box
        let bounds = compute_bounds(&points);
        let pad = DVec2::new(
            if bounds.width < EPSILON { FACE_DEPTH_MARGIN / 2.0 } else { 0.0 },
            if bounds.height < EPSILON { FACE_DEPTH_MARGIN / 2.0 } else { 0.0 },
        );
        let primitive = Primitive::Box {
            min: bounds.min() - pad,
            max: bounds.max() + pad,
        };
        Ok(service.create_primitive(primitive, element, face, depth)?)
    }

    fn detected_subtype(&self, feature: &NormalizedFeature, _element: &ProfileElement) -> String {
        format!("approximated-{}", feature.category)
    }
}
