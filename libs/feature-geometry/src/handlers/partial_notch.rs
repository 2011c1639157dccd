//! End-notch patterns: a rectilinear outline that runs (nearly) the full
//! member length and steps inward at one or both ends. Each step becomes
//! a separate box at its extremity.
//!
//! ```text
//!     c                     L-c
//!     ┌─────────────────────┐        ← y = H
//!  ┌──┘                     └──┐     ← y = H - d
//!  │                           │
//!  └───────────────────────────┘     ← y = 0
//!  0                           L
//! ```

use super::{base, CutHandler, SupportedCategories};
use crate::combiner::CombineStrategy;
use crate::construction::{GeometryService, Primitive};
use crate::contour::{compute_bounds, is_axis_aligned, ContourBounds};
use crate::error::HandlerError;
use crate::model::{FeatureCategory, NormalizedFeature, ProfileElement};
use crate::placement::FaceLabel;
use config::constants::{
    CONTOUR_EPSILON, ENVELOPE_CLAMP_PADDING, FACE_DEPTH_MARGIN, NOTCH_PATTERN_MIN_SPAN,
};
use glam::DVec2;
use profile_mesh::Mesh;

/// Face-local box removed at one notched corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotchBox {
    pub min: DVec2,
    pub max: DVec2,
}

/// Finds the notched corners of an end-notch outline.
///
/// At each extremity the outline's vertical coverage is compared with its
/// full height; each uncovered band is a notch whose inner edge is the
/// nearest step vertex. Boxes overshoot the outline's outer edges by
/// `ENVELOPE_CLAMP_PADDING`.
pub fn end_notch_boxes(points: &[DVec2]) -> Vec<NotchBox> {
    let bounds = compute_bounds(points);
    let mut boxes = Vec::new();

    for at_start in [true, false] {
        let end_x = if at_start { bounds.min_x } else { bounds.max_x };
        let at_end: Vec<f64> = points
            .iter()
            .filter(|p| (p.x - end_x).abs() <= CONTOUR_EPSILON)
            .map(|p| p.y)
            .collect();
        if at_end.len() < 2 {
            continue;
        }
        let lo = at_end.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = at_end.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut bands = Vec::new();
        if bounds.max_y - hi > CONTOUR_EPSILON {
            bands.push((hi, bounds.max_y, true));
        }
        if lo - bounds.min_y > CONTOUR_EPSILON {
            bands.push((bounds.min_y, lo, false));
        }

        for (band_lo, band_hi, is_top) in bands {
            if let Some(notch) = notch_box(points, &bounds, end_x, at_start, band_lo, band_hi, is_top) {
                boxes.push(notch);
            }
        }
    }

    boxes
}

fn notch_box(
    points: &[DVec2],
    bounds: &ContourBounds,
    end_x: f64,
    at_start: bool,
    band_lo: f64,
    band_hi: f64,
    is_top: bool,
) -> Option<NotchBox> {
    let candidates = points.iter().filter(|p| {
        p.y >= band_lo - CONTOUR_EPSILON
            && p.y <= band_hi + CONTOUR_EPSILON
            && (p.x - end_x).abs() > CONTOUR_EPSILON
    });

    let inner_x = if at_start {
        candidates.map(|p| p.x).fold(f64::INFINITY, f64::min)
    } else {
        candidates.map(|p| p.x).fold(f64::NEG_INFINITY, f64::max)
    };
    if !inner_x.is_finite() || (inner_x - end_x).abs() >= bounds.width / 2.0 {
        return None;
    }

    let (u_min, u_max) = if at_start {
        (end_x - ENVELOPE_CLAMP_PADDING, inner_x)
    } else {
        (inner_x, end_x + ENVELOPE_CLAMP_PADDING)
    };
    let (v_min, v_max) = if is_top {
        (band_lo, band_hi + ENVELOPE_CLAMP_PADDING)
    } else {
        (band_lo - ENVELOPE_CLAMP_PADDING, band_hi)
    };

    Some(NotchBox {
        min: DVec2::new(u_min, v_min),
        max: DVec2::new(u_max, v_max),
    })
}

/// Priority 100: end-notch patterns on Cut and Notch features.
#[derive(Debug, Default)]
pub struct PartialNotchHandler;

impl PartialNotchHandler {
    fn boxes(&self, feature: &NormalizedFeature, element: &ProfileElement) -> Vec<NotchBox> {
        let Some(points) = base::normalized_contour(feature) else {
            return Vec::new();
        };
        if points.len() < 6
            || base::has_curves(feature)
            || base::is_bevelled(feature)
            || !is_axis_aligned(&points)
        {
            return Vec::new();
        }
        let span = base::placement_of(feature, element).envelope.max.x;
        if compute_bounds(&points).width < NOTCH_PATTERN_MIN_SPAN * span {
            return Vec::new();
        }
        end_notch_boxes(&points)
    }
}

impl CutHandler for PartialNotchHandler {
    fn name(&self) -> &'static str {
        "partial-notch"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn supported_categories(&self) -> SupportedCategories {
        SupportedCategories::Only(vec![FeatureCategory::Cut, FeatureCategory::Notch])
    }

    fn can_handle(
        &self,
        _category: &FeatureCategory,
        feature: &NormalizedFeature,
        element: &ProfileElement,
    ) -> bool {
        !self.boxes(feature, element).is_empty()
    }

    fn create_cut_geometry(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
        service: &GeometryService,
    ) -> Result<Mesh, HandlerError> {
        let face = base::face_of(feature);
        // A web notch removes the whole section, flanges included
        let depth = feature.params.depth().or_else(|| {
            (face == FaceLabel::Web).then(|| element.dimensions.width + 2.0 * FACE_DEPTH_MARGIN)
        });

        let parts = self
            .boxes(feature, element)
            .into_iter()
            .map(|b| {
                service
                    .create_primitive(Primitive::Box { min: b.min, max: b.max }, element, face, depth)
                    .map_err(HandlerError::from)
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Notch boxes at opposite ends never overlap
        base::combine_parts(parts, CombineStrategy::Union, service)
    }

    fn detected_subtype(&self, feature: &NormalizedFeature, element: &ProfileElement) -> String {
        format!("end-notch-{}", self.boxes(feature, element).len())
    }
}
