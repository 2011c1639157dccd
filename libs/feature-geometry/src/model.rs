//! # Data Model
//!
//! Normalized features and profile elements as handed over by the
//! instruction parser.
//!
//! ## Element Frame
//!
//! ```text
//!   Y (height, 0 = underside)
//!   |
//!   |____ X (length, 0..length)
//!  /
//! Z (width, centred on the web: -width/2..+width/2)
//! ```
//!
//! All coordinates in features are face-local (see [`crate::placement`]).

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// FEATURE CATEGORY
// =============================================================================

/// Fabrication feature category.
///
/// Deserializes from a bare name in any case (`"Hole"`, `"end-cut"`,
/// `"END_CUT"`) or the tagged `{"Other": ...}` form. Names that match no
/// variant become [`FeatureCategory::Other`] instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum FeatureCategory {
    Hole,
    Cut,
    Contour,
    Notch,
    Groove,
    Slot,
    Coping,
    Bevel,
    EndCut,
    Marking,
    /// Category name the parser could not map.
    Other(String),
}

/// Execution tier; lower tiers run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeatureTier {
    /// Outline shaping (contours, copes)
    Outline,
    /// End cuts and bevels
    EndCut,
    /// Cuts, notches, slots, grooves
    Cut,
    /// Holes
    Hole,
    /// Markings
    Marking,
}

impl FeatureTier {
    /// All tiers in execution order.
    pub const ORDER: [FeatureTier; 5] = [
        FeatureTier::Outline,
        FeatureTier::EndCut,
        FeatureTier::Cut,
        FeatureTier::Hole,
        FeatureTier::Marking,
    ];

    /// Features in batchable tiers are independent of each other.
    pub fn is_batchable(self) -> bool {
        matches!(self, FeatureTier::Hole | FeatureTier::Marking)
    }
}

impl FeatureCategory {
    /// Maps a category name, ignoring case, `_`, `-` and spaces.
    ///
    /// ```rust
    /// use feature_geometry::FeatureCategory;
    ///
    /// assert_eq!(FeatureCategory::from_name("End_Cut"), FeatureCategory::EndCut);
    /// assert_eq!(
    ///     FeatureCategory::from_name("weld-prep"),
    ///     FeatureCategory::Other("weld-prep".into())
    /// );
    /// ```
    pub fn from_name(name: &str) -> FeatureCategory {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "hole" => FeatureCategory::Hole,
            "cut" => FeatureCategory::Cut,
            "contour" => FeatureCategory::Contour,
            "notch" => FeatureCategory::Notch,
            "groove" => FeatureCategory::Groove,
            "slot" => FeatureCategory::Slot,
            "coping" => FeatureCategory::Coping,
            "bevel" => FeatureCategory::Bevel,
            "endcut" => FeatureCategory::EndCut,
            "marking" => FeatureCategory::Marking,
            _ => FeatureCategory::Other(name.to_string()),
        }
    }

    /// Returns the execution tier of this category.
    pub fn tier(&self) -> FeatureTier {
        match self {
            FeatureCategory::Contour | FeatureCategory::Coping => FeatureTier::Outline,
            FeatureCategory::EndCut | FeatureCategory::Bevel => FeatureTier::EndCut,
            FeatureCategory::Hole => FeatureTier::Hole,
            FeatureCategory::Marking => FeatureTier::Marking,
            FeatureCategory::Cut
            | FeatureCategory::Notch
            | FeatureCategory::Slot
            | FeatureCategory::Groove
            | FeatureCategory::Other(_) => FeatureTier::Cut,
        }
    }

    /// Returns true for categories that remove material along a contour.
    pub fn is_cut_like(&self) -> bool {
        matches!(
            self,
            FeatureCategory::Cut
                | FeatureCategory::Contour
                | FeatureCategory::Notch
                | FeatureCategory::Groove
                | FeatureCategory::Slot
                | FeatureCategory::Coping
                | FeatureCategory::Other(_)
        )
    }
}

impl std::fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FeatureCategory::Hole => "hole",
            FeatureCategory::Cut => "cut",
            FeatureCategory::Contour => "contour",
            FeatureCategory::Notch => "notch",
            FeatureCategory::Groove => "groove",
            FeatureCategory::Slot => "slot",
            FeatureCategory::Coping => "coping",
            FeatureCategory::Bevel => "bevel",
            FeatureCategory::EndCut => "end-cut",
            FeatureCategory::Marking => "marking",
            FeatureCategory::Other(name) => name,
        };
        f.write_str(name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    Name(String),
    Tagged {
        #[serde(rename = "Other")]
        other: String,
    },
}

impl<'de> Deserialize<'de> for FeatureCategory {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match CategoryRepr::deserialize(deserializer)? {
            CategoryRepr::Name(name) => FeatureCategory::from_name(&name),
            CategoryRepr::Tagged { other } => FeatureCategory::Other(other),
        })
    }
}

// =============================================================================
// CONTOUR SEGMENTS
// =============================================================================

/// Shape of a single contour segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Line,
    Arc,
    Spline,
    Bezier,
}

/// One segment of a contour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourSegment {
    pub kind: SegmentKind,
    pub start: DVec2,
    pub end: DVec2,
    /// Arc centre
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<DVec2>,
    /// Arc radius; derived from `center` and `start` when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Bezier or spline control points
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub control_points: Vec<DVec2>,
    /// Signed curvature; negative arcs run clockwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulge: Option<f64>,
}

impl ContourSegment {
    /// Creates a straight segment.
    pub fn line(start: DVec2, end: DVec2) -> Self {
        Self {
            kind: SegmentKind::Line,
            start,
            end,
            center: None,
            radius: None,
            control_points: Vec::new(),
            bulge: None,
        }
    }

    /// Creates a counter-clockwise arc around `center`.
    pub fn arc(start: DVec2, end: DVec2, center: DVec2) -> Self {
        Self {
            kind: SegmentKind::Arc,
            center: Some(center),
            ..Self::line(start, end)
        }
    }

    /// Creates a bezier segment.
    pub fn bezier(start: DVec2, control_points: Vec<DVec2>, end: DVec2) -> Self {
        Self {
            kind: SegmentKind::Bezier,
            control_points,
            ..Self::line(start, end)
        }
    }

    /// Returns true for anything other than a plain line.
    pub fn is_curved(&self) -> bool {
        self.kind != SegmentKind::Line || self.bulge.is_some_and(|b| b != 0.0)
    }
}

// =============================================================================
// FEATURE PARAMETERS
// =============================================================================

/// Member extremity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileEnd {
    Start,
    End,
}

/// Category-specific feature parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureParams {
    /// Closed outline given as points, bulges or segments.
    Contour {
        #[serde(default)]
        points: Vec<DVec2>,
        /// Bulge per span, `bulges[i]` applies to `points[i] -> points[i + 1]`
        #[serde(default)]
        bulges: Vec<f64>,
        #[serde(default)]
        segments: Vec<ContourSegment>,
        #[serde(default)]
        depth: Option<f64>,
        /// Wall inclination in degrees
        #[serde(default)]
        bevel: Option<f64>,
    },
    /// Round hole, or slotted hole when `elongation > 0`.
    Hole {
        center: DVec2,
        diameter: f64,
        #[serde(default)]
        depth: Option<f64>,
        #[serde(default)]
        elongation: f64,
    },
    /// Open path swept with a constant width.
    Groove {
        path: Vec<DVec2>,
        width: f64,
        #[serde(default)]
        depth: Option<f64>,
    },
    /// Square or angled cut at one extremity.
    EndCut {
        end: ProfileEnd,
        /// Degrees from a square cut, rotating about the height axis
        #[serde(default)]
        angle: f64,
        /// Length removed from the extremity
        #[serde(default)]
        depth: Option<f64>,
    },
    /// Scribed text marking.
    Marking {
        position: DVec2,
        text: String,
        height: f64,
        #[serde(default)]
        angle: f64,
        #[serde(default)]
        depth: Option<f64>,
    },
}

impl FeatureParams {
    /// Creates contour parameters from bare points.
    pub fn contour(points: Vec<DVec2>) -> Self {
        FeatureParams::Contour {
            points,
            bulges: Vec::new(),
            segments: Vec::new(),
            depth: None,
            bevel: None,
        }
    }

    /// Explicit depth, if any.
    pub fn depth(&self) -> Option<f64> {
        match self {
            FeatureParams::Contour { depth, .. }
            | FeatureParams::Hole { depth, .. }
            | FeatureParams::Groove { depth, .. }
            | FeatureParams::EndCut { depth, .. }
            | FeatureParams::Marking { depth, .. } => *depth,
        }
    }
}

// =============================================================================
// NORMALIZED FEATURE
// =============================================================================

/// One fabrication instruction in the profile's local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFeature {
    pub id: String,
    pub category: FeatureCategory,
    /// Raw face label; resolved by [`crate::placement::resolve_face`]
    #[serde(default = "default_face")]
    pub face: String,
    pub params: FeatureParams,
    /// Fields the engine does not interpret
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

fn default_face() -> String {
    "web".to_string()
}

impl NormalizedFeature {
    /// Creates a feature with no extensions.
    pub fn new(
        id: impl Into<String>,
        category: FeatureCategory,
        face: impl Into<String>,
        params: FeatureParams,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            face: face.into(),
            params,
            extensions: BTreeMap::new(),
        }
    }
}

// =============================================================================
// PROFILE ELEMENT
// =============================================================================

/// Cross-section family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileKind {
    IBeam,
    Channel,
    Angle,
    Tee,
    RectangularTube,
    RoundTube,
    Plate,
    Other(String),
}

/// Cross-section and length of a member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileDimensions {
    pub length: f64,
    pub height: f64,
    pub width: f64,
    pub web_thickness: f64,
    pub flange_thickness: f64,
    #[serde(default)]
    pub root_radius: Option<f64>,
}

/// The member all features are applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileElement {
    pub id: String,
    pub kind: ProfileKind,
    pub dimensions: ProfileDimensions,
}

impl ProfileElement {
    /// Creates an element.
    pub fn new(id: impl Into<String>, kind: ProfileKind, dimensions: ProfileDimensions) -> Self {
        Self {
            id: id.into(),
            kind,
            dimensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tiers() {
        assert_eq!(FeatureCategory::Contour.tier(), FeatureTier::Outline);
        assert_eq!(FeatureCategory::Bevel.tier(), FeatureTier::EndCut);
        assert_eq!(FeatureCategory::Other("x".into()).tier(), FeatureTier::Cut);
        assert!(FeatureCategory::Hole.tier().is_batchable());
        assert!(!FeatureCategory::Notch.tier().is_batchable());
        assert!(FeatureTier::Outline < FeatureTier::Marking);
    }

    #[test]
    fn test_cut_like() {
        assert!(FeatureCategory::Groove.is_cut_like());
        assert!(!FeatureCategory::Hole.is_cut_like());
        assert!(!FeatureCategory::Marking.is_cut_like());
    }

    #[test]
    fn test_feature_json_keeps_unknown_fields() {
        let json = r#"{
            "id": "f1",
            "category": "Cut",
            "face": "o",
            "params": { "kind": "contour", "points": [[0, 0], [10, 0], [10, 5]] },
            "dstv_block": "AK",
            "operator_note": 3
        }"#;
        let feature: NormalizedFeature = serde_json::from_str(json).unwrap();

        assert_eq!(feature.face, "o");
        assert_eq!(feature.extensions.len(), 2);
        assert_eq!(feature.extensions["dstv_block"], "AK");
        match &feature.params {
            FeatureParams::Contour { points, .. } => assert_eq!(points[1], DVec2::new(10.0, 0.0)),
            other => panic!("unexpected params {other:?}"),
        }

        let back = serde_json::to_value(&feature).unwrap();
        assert_eq!(back["operator_note"], 3);
    }

    #[test]
    fn test_unknown_category_maps_to_other() {
        let parse = |json: &str| serde_json::from_str::<FeatureCategory>(json).unwrap();
        assert_eq!(parse(r#""Hole""#), FeatureCategory::Hole);
        assert_eq!(parse(r#""end-cut""#), FeatureCategory::EndCut);
        assert_eq!(parse(r#""weld-prep""#), FeatureCategory::Other("weld-prep".into()));
        assert_eq!(parse(r#"{"Other":"burn"}"#), FeatureCategory::Other("burn".into()));
        assert!(serde_json::from_str::<FeatureCategory>("7").is_err());

        // Display names and serialized names both come back unchanged
        for category in [FeatureCategory::EndCut, FeatureCategory::Other("burn".into())] {
            assert_eq!(FeatureCategory::from_name(&category.to_string()), category);
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(serde_json::from_str::<FeatureCategory>(&json).unwrap(), category);
        }

        let json = r#"{"id":"w","category":"weld-prep","params":{"kind":"contour","points":[]}}"#;
        let feature: NormalizedFeature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.category, FeatureCategory::Other("weld-prep".into()));
    }

    #[test]
    fn test_feature_face_defaults_to_web() {
        let json = r#"{"id":"h","category":"Hole","params":{"kind":"hole","center":[5,5],"diameter":4}}"#;
        let feature: NormalizedFeature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.face, "web");
        assert_eq!(feature.params.depth(), None);
    }

    #[test]
    fn test_segment_is_curved() {
        let line = ContourSegment::line(DVec2::ZERO, DVec2::X);
        assert!(!line.is_curved());
        assert!(ContourSegment::arc(DVec2::X, DVec2::Y, DVec2::ZERO).is_curved());
        let bulged = ContourSegment {
            bulge: Some(0.3),
            ..line
        };
        assert!(bulged.is_curved());
    }
}
