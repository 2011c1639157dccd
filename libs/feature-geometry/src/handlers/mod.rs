//! # Cut Handlers
//!
//! Each handler is one construction strategy for a family of features.
//! The [`HandlerRegistry`](crate::registry::HandlerRegistry) picks the
//! highest-priority handler whose [`CutHandler::can_handle`] accepts the
//! feature, validates with it, then builds with it.
//!
//! ## Default Handlers
//!
//! | Priority | Handler |
//! |----------|---------|
//! | 100 | [`PartialNotchHandler`] |
//! | 90 | [`ExteriorCopingHandler`] |
//! | 85 | [`SlotHandler`] |
//! | 80 | [`ComplexContourHandler`] |
//! | 75 | [`RectangularCutHandler`] |
//! | 70 | [`HoleHandler`] |
//! | 68 | [`EndCutHandler`] |
//! | 65 | [`NotchHandler`] |
//! | 60 | [`MarkingHandler`] |
//! | 55 | [`GrooveHandler`] |
//! | 50 | [`ContourCutHandler`] |
//! | 0 | [`FallbackHandler`] |
//!
//! Only the relative order matters; more specific handlers rank higher.

pub mod base;
mod complex_contour;
mod contour_cut;
mod end_cut;
mod exterior_coping;
mod fallback;
mod groove;
mod hole;
mod marking;
mod notch;
mod partial_notch;
mod rectangular;
mod slot;


pub use complex_contour::ComplexContourHandler;
pub use contour_cut::ContourCutHandler;
pub use end_cut::EndCutHandler;
pub use exterior_coping::ExteriorCopingHandler;
pub use fallback::FallbackHandler;
pub use groove::GrooveHandler;
pub use hole::HoleHandler;
pub use marking::MarkingHandler;
pub use notch::NotchHandler;
pub use partial_notch::PartialNotchHandler;
pub use rectangular::RectangularCutHandler;
pub use slot::SlotHandler;

use crate::construction::GeometryService;
use crate::contour::ContourBounds;
use crate::error::{ErrorKind, HandlerError};
use crate::model::{FeatureCategory, NormalizedFeature, ProfileElement};
use crate::placement::FaceLabel;
use profile_mesh::Mesh;
use serde::{Deserialize, Serialize};

// =============================================================================
// VALIDATION
// =============================================================================

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: ErrorKind,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Outcome of [`CutHandler::validate`]. Errors block the feature,
/// warnings are only recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when there are no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records a blocking error.
    pub fn error(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            kind,
            message: message.into(),
        });
    }

    /// Records a non-blocking warning.
    pub fn warn(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            kind,
            message: message.into(),
        });
    }
}

// =============================================================================
// METADATA
// =============================================================================

/// Geometric summary of a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySummary {
    pub bounds: Option<ContourBounds>,
    pub point_count: usize,
    pub depth: f64,
    pub face: FaceLabel,
}

/// Per-feature record handed downstream with the final solid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMetadata {
    pub feature_id: String,
    pub handler_name: String,
    pub detected_subtype: String,
    pub summary: GeometrySummary,
    pub warnings: Vec<String>,
    pub error: Option<String>,
}

// =============================================================================
// HANDLER CONTRACT
// =============================================================================

/// Categories a handler is registered for.
#[derive(Debug, Clone, PartialEq)]
pub enum SupportedCategories {
    All,
    Only(Vec<FeatureCategory>),
}

impl SupportedCategories {
    /// Returns true when `category` is covered.
    pub fn contains(&self, category: &FeatureCategory) -> bool {
        match self {
            SupportedCategories::All => true,
            SupportedCategories::Only(list) => list.contains(category),
        }
    }
}

/// A construction strategy for one family of features.
///
/// Handlers hold no per-feature state; one instance serves every call.
/// Solids are returned in the element frame.
pub trait CutHandler: Send + Sync {
    /// Stable handler name used in reports.
    fn name(&self) -> &'static str;

    /// Dispatch priority; higher wins.
    fn priority(&self) -> i32;

    /// Categories this handler is registered for.
    fn supported_categories(&self) -> SupportedCategories;

    /// Shape heuristics deciding whether this handler takes the feature.
    fn can_handle(
        &self,
        category: &FeatureCategory,
        feature: &NormalizedFeature,
        element: &ProfileElement,
    ) -> bool;

    /// Checks the feature before construction.
    fn validate(&self, feature: &NormalizedFeature, element: &ProfileElement) -> ValidationReport {
        base::validate_contour(feature, element, base::Overhang::Kept)
    }

    /// Builds the solid removed by the feature.
    fn create_cut_geometry(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
        service: &GeometryService,
    ) -> Result<Mesh, HandlerError>;

    /// Finer classification reported in metadata.
    fn detected_subtype(&self, _feature: &NormalizedFeature, _element: &ProfileElement) -> String {
        self.name().to_string()
    }

    /// Summarizes the feature for downstream consumers.
    fn generate_metadata(
        &self,
        feature: &NormalizedFeature,
        element: &ProfileElement,
    ) -> FeatureMetadata {
        base::metadata(
            self.name(),
            self.detected_subtype(feature, element),
            feature,
            element,
        )
    }
}
