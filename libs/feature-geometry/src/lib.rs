//! # Feature Geometry
//!
//! Turns normalized fabrication features of a structural steel member
//! into cutting solids and subtracts them from the member's solid.
//!
//! ## Architecture
//!
//! ```text
//! NormalizedFeature[] + ProfileElement
//!        ↓
//! registry   (priority dispatch over cut handlers)
//!        ↓
//! handlers   (validate, build in face-local coordinates)
//!        ↓
//! construction + placement (extrude, place on the face)
//!        ↓
//! executor   (tiers, rayon for holes and markings, CSG subtract)
//!        ↓
//! Mesh + FeatureReport[]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use feature_geometry::{apply_features, FeatureCategory, FeatureParams, NormalizedFeature};
//! use feature_geometry::{ProfileDimensions, ProfileElement, ProfileKind};
//! use glam::{DVec2, DVec3};
//! use profile_mesh::primitives::create_box_between;
//!
//! let element = ProfileElement::new(
//!     "plate",
//!     ProfileKind::Plate,
//!     ProfileDimensions {
//!         length: 200.0,
//!         height: 100.0,
//!         width: 10.0,
//!         web_thickness: 10.0,
//!         flange_thickness: 10.0,
//!         root_radius: None,
//!     },
//! );
//! let base = create_box_between(DVec3::new(0.0, 0.0, -5.0), DVec3::new(200.0, 100.0, 5.0)).unwrap();
//! let hole = NormalizedFeature::new(
//!     "h1",
//!     FeatureCategory::Hole,
//!     "web",
//!     FeatureParams::Hole { center: DVec2::new(50.0, 50.0), diameter: 18.0, depth: None, elongation: 0.0 },
//! );
//!
//! let result = apply_features(base, &element, &[hole]);
//! assert_eq!(result.applied_count(), 1);
//! ```

pub mod combiner;
pub mod config;
pub mod construction;
pub mod contour;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod model;
pub mod placement;
pub mod registry;

pub use combiner::{BspCsg, CombineOutcome, CombineStrategy, Combiner, CsgBackend};
pub use crate::config::{EngineConfig, EngineConfigError};
pub use construction::{ContourOptions, GeometryService, Primitive};
pub use error::{CsgError, ErrorKind, GeometryError, GeometryResult, HandlerError};
pub use executor::{BatchResult, FeatureBatchExecutor, FeatureReport, FeatureState};
pub use handlers::{CutHandler, FeatureMetadata, ValidationReport};
pub use model::{
    FeatureCategory, FeatureParams, NormalizedFeature, ProfileDimensions, ProfileElement,
    ProfileEnd, ProfileKind,
};
pub use placement::{FaceLabel, FacePlacement};
pub use registry::HandlerRegistry;

use profile_mesh::Mesh;

/// Applies features to a member solid with the default handlers and
/// configuration.
pub fn apply_features(
    base: Mesh,
    element: &ProfileElement,
    features: &[NormalizedFeature],
) -> BatchResult {
    FeatureBatchExecutor::default().execute(base, element, features)
}
