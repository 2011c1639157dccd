//! # Face Placement
//!
//! Maps a logical face label and the cross-section dimensions to a default
//! cut depth and a rigid transform from face-local to element coordinates.
//! This is the only module that knows which element axis each face uses.
//!
//! ## Face-Local Frame
//!
//! - `u` runs along the member length from the start (across the section
//!   for the end faces)
//! - `v` runs across the face from its reference edge: the underside for
//!   web-parallel faces, the `-Z` edge for flange faces
//! - `w` is the face normal; `w = 0` is the mid-surface of the plate
//!
//! | Face | u | v | Mid-surface |
//! |------|---|---|-------------|
//! | Web, Left, Right | +X | +Y | z = 0, -W/2, +W/2 |
//! | TopFlange, Top | +X | +Z | y = H - tf/2 |
//! | BottomFlange | +X | +Z | y = tf/2 |
//! | Bottom | +X | +Z | y = tw/2 |
//! | Front, Back | +Z | +Y | x = 0, L |
//!
//! Left, Right, Front and Back sit on the outer surface rather than a plate
//! mid-surface. [`FacePlacement::outward`] gives the sign of `w` that points
//! out of the member on each face.

use crate::model::ProfileDimensions;
use config::constants::FACE_DEPTH_MARGIN;
use glam::{DMat4, DVec2, DVec3, DVec4};
use serde::{Deserialize, Serialize};

/// Logical face of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceLabel {
    Web,
    TopFlange,
    BottomFlange,
    Left,
    Right,
    Front,
    Back,
    Bottom,
    Top,
}

impl FaceLabel {
    /// All faces.
    pub const ALL: [FaceLabel; 9] = [
        FaceLabel::Web,
        FaceLabel::TopFlange,
        FaceLabel::BottomFlange,
        FaceLabel::Left,
        FaceLabel::Right,
        FaceLabel::Front,
        FaceLabel::Back,
        FaceLabel::Bottom,
        FaceLabel::Top,
    ];

    /// Parses a face label, ignoring case, `_`, `-` and spaces.
    ///
    /// DSTV face codes are accepted: `v` (web), `o` (top flange),
    /// `u` (bottom flange) and `h` (back).
    ///
    /// ```rust
    /// use feature_geometry::placement::FaceLabel;
    ///
    /// assert_eq!(FaceLabel::parse("top_flange"), Some(FaceLabel::TopFlange));
    /// assert_eq!(FaceLabel::parse("o"), Some(FaceLabel::TopFlange));
    /// assert_eq!(FaceLabel::parse("side"), None);
    /// ```
    pub fn parse(label: &str) -> Option<FaceLabel> {
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let face = match key.as_str() {
            "web" | "v" => FaceLabel::Web,
            "topflange" | "o" => FaceLabel::TopFlange,
            "bottomflange" | "u" => FaceLabel::BottomFlange,
            "left" => FaceLabel::Left,
            "right" => FaceLabel::Right,
            "front" => FaceLabel::Front,
            "back" | "h" => FaceLabel::Back,
            "bottom" => FaceLabel::Bottom,
            "top" => FaceLabel::Top,
            _ => return None,
        };
        Some(face)
    }
}

impl std::fmt::Display for FaceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Resolves a raw face label, falling back to the web.
///
/// Returns the face and a warning when the label was not recognised.
pub fn resolve_face(label: &str) -> (FaceLabel, Option<String>) {
    match FaceLabel::parse(label) {
        Some(face) => (face, None),
        None => (
            FaceLabel::Web,
            Some(format!("unknown face label '{label}', using Web")),
        ),
    }
}

/// Default cut depth for a face.
///
/// Plate faces use their plate thickness; faces without a natural plate use
/// `max(web, flange) + FACE_DEPTH_MARGIN`.
pub fn resolve_depth(face: FaceLabel, dims: &ProfileDimensions) -> f64 {
    match face {
        FaceLabel::Web | FaceLabel::Bottom => dims.web_thickness,
        FaceLabel::TopFlange | FaceLabel::BottomFlange => dims.flange_thickness,
        _ => dims.web_thickness.max(dims.flange_thickness) + FACE_DEPTH_MARGIN,
    }
}

/// 2D extent of a face in face-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceEnvelope {
    pub min: DVec2,
    pub max: DVec2,
}

impl FaceEnvelope {
    /// Returns true when `p` lies inside the envelope grown by `tolerance`.
    pub fn contains(&self, p: DVec2, tolerance: f64) -> bool {
        p.cmpge(self.min - tolerance).all() && p.cmple(self.max + tolerance).all()
    }

    /// Returns the envelope grown by `padding` on every side.
    pub fn padded(&self, padding: f64) -> FaceEnvelope {
        FaceEnvelope {
            min: self.min - padding,
            max: self.max + padding,
        }
    }
}

/// Face-local frame of a face within the element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePlacement {
    pub face: FaceLabel,
    /// Element position of face-local `(0, 0, 0)`
    pub origin: DVec3,
    pub u_axis: DVec3,
    pub v_axis: DVec3,
    /// `u × v`
    pub normal: DVec3,
    /// Default cut depth
    pub depth: f64,
    pub envelope: FaceEnvelope,
}

impl FacePlacement {
    /// Builds the placement of `face` for the given section.
    ///
    /// The origin is the face corner in `u` and `v`: contour coordinates
    /// run over `0..extent` from that corner and are never re-centred. Only
    /// the depth coordinate is centred, on the plate mid-surface for plate
    /// faces (Web, flanges, Top, Bottom) and on the outer surface for Left,
    /// Right, Front and Back.
    pub fn resolve(face: FaceLabel, dims: &ProfileDimensions) -> Self {
        let l = dims.length;
        let h = dims.height;
        let w = dims.width;
        let half_w = w / 2.0;

        let (origin, u_axis, v_axis, extent) = match face {
            FaceLabel::Web => (DVec3::ZERO, DVec3::X, DVec3::Y, DVec2::new(l, h)),
            FaceLabel::Left => (DVec3::new(0.0, 0.0, -half_w), DVec3::X, DVec3::Y, DVec2::new(l, h)),
            FaceLabel::Right => (DVec3::new(0.0, 0.0, half_w), DVec3::X, DVec3::Y, DVec2::new(l, h)),
            FaceLabel::TopFlange | FaceLabel::Top => (
                DVec3::new(0.0, h - dims.flange_thickness / 2.0, -half_w),
                DVec3::X,
                DVec3::Z,
                DVec2::new(l, w),
            ),
            FaceLabel::BottomFlange => (
                DVec3::new(0.0, dims.flange_thickness / 2.0, -half_w),
                DVec3::X,
                DVec3::Z,
                DVec2::new(l, w),
            ),
            FaceLabel::Bottom => (
                DVec3::new(0.0, dims.web_thickness / 2.0, -half_w),
                DVec3::X,
                DVec3::Z,
                DVec2::new(l, w),
            ),
            FaceLabel::Front => (DVec3::new(0.0, 0.0, -half_w), DVec3::Z, DVec3::Y, DVec2::new(w, h)),
            FaceLabel::Back => (DVec3::new(l, 0.0, -half_w), DVec3::Z, DVec3::Y, DVec2::new(w, h)),
        };

        Self {
            face,
            origin,
            u_axis,
            v_axis,
            normal: u_axis.cross(v_axis),
            depth: resolve_depth(face, dims),
            envelope: FaceEnvelope {
                min: DVec2::ZERO,
                max: extent,
            },
        }
    }

    /// Sign of `w` pointing out of the member: `-1.0` where the face
    /// normal points into the section.
    pub fn outward(&self) -> f64 {
        match self.face {
            FaceLabel::TopFlange | FaceLabel::Top | FaceLabel::Left | FaceLabel::Back => -1.0,
            _ => 1.0,
        }
    }

    /// Face-local `w` of the exterior surface.
    pub fn exterior_offset(&self) -> f64 {
        match self.face {
            FaceLabel::Left | FaceLabel::Right | FaceLabel::Front | FaceLabel::Back => 0.0,
            _ => self.outward() * self.depth / 2.0,
        }
    }

    /// Face-local to element transform.
    pub fn transform(&self) -> DMat4 {
        DMat4::from_cols(
            self.u_axis.extend(0.0),
            self.v_axis.extend(0.0),
            self.normal.extend(0.0),
            DVec4::new(self.origin.x, self.origin.y, self.origin.z, 1.0),
        )
    }

    /// Maps a face-local point (u, v, w) to element coordinates.
    pub fn to_element(&self, local: DVec3) -> DVec3 {
        self.origin + self.u_axis * local.x + self.v_axis * local.y + self.normal * local.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dims() -> ProfileDimensions {
        ProfileDimensions {
            length: 1000.0,
            height: 200.0,
            width: 100.0,
            web_thickness: 10.0,
            flange_thickness: 15.0,
            root_radius: None,
        }
    }

    #[test]
    fn test_resolve_depth() {
        let d = dims();
        assert_eq!(resolve_depth(FaceLabel::Web, &d), 10.0);
        assert_eq!(resolve_depth(FaceLabel::TopFlange, &d), 15.0);
        assert_eq!(resolve_depth(FaceLabel::BottomFlange, &d), 15.0);
        assert_eq!(resolve_depth(FaceLabel::Bottom, &d), 10.0);
        assert_eq!(resolve_depth(FaceLabel::Left, &d), 15.0 + FACE_DEPTH_MARGIN);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(FaceLabel::parse("WEB"), Some(FaceLabel::Web));
        assert_eq!(FaceLabel::parse("Bottom-Flange"), Some(FaceLabel::BottomFlange));
        assert_eq!(FaceLabel::parse("v"), Some(FaceLabel::Web));
        assert_eq!(FaceLabel::parse("u"), Some(FaceLabel::BottomFlange));
        assert_eq!(FaceLabel::parse("H"), Some(FaceLabel::Back));
        for face in FaceLabel::ALL {
            assert_eq!(FaceLabel::parse(&face.to_string()), Some(face));
        }
    }

    #[test]
    fn test_unknown_label_defaults_to_web() {
        let (face, warning) = resolve_face("diagonal");
        assert_eq!(face, FaceLabel::Web);
        assert!(warning.unwrap().contains("diagonal"));
        assert_eq!(resolve_face("o"), (FaceLabel::TopFlange, None));
    }

    #[test]
    fn test_transforms_are_rigid() {
        for face in FaceLabel::ALL {
            let placement = FacePlacement::resolve(face, &dims());
            assert_relative_eq!(placement.transform().determinant(), 1.0, epsilon = 1e-12);
            let p = DVec3::new(3.0, 4.0, 5.0);
            let mapped = placement.transform().transform_point3(p);
            assert!((mapped - placement.to_element(p)).length() < 1e-9);
        }
    }

    #[test]
    fn test_top_flange_placement() {
        let placement = FacePlacement::resolve(FaceLabel::TopFlange, &dims());
        // Face-local (u=100, v=50) is the flange centreline, 100 along
        let p = placement.to_element(DVec3::new(100.0, 50.0, 0.0));
        assert_relative_eq!(p.x, 100.0);
        assert_relative_eq!(p.y, 192.5);
        assert_relative_eq!(p.z, 0.0);
        assert_eq!(placement.normal, -DVec3::Y);
        assert_eq!(placement.envelope.max, DVec2::new(1000.0, 100.0));
    }

    #[test]
    fn test_back_face_placement() {
        let placement = FacePlacement::resolve(FaceLabel::Back, &dims());
        let p = placement.to_element(DVec3::new(50.0, 100.0, 0.0));
        assert_eq!(p, DVec3::new(1000.0, 100.0, 0.0));
        assert_eq!(placement.normal, -DVec3::X);
    }

    #[test]
    fn test_exterior_surfaces() {
        let d = dims();
        let expected = [
            (FaceLabel::Web, DVec3::new(0.0, 0.0, 5.0)),
            (FaceLabel::TopFlange, DVec3::new(0.0, 200.0, -50.0)),
            (FaceLabel::BottomFlange, DVec3::new(0.0, 0.0, -50.0)),
            (FaceLabel::Left, DVec3::new(0.0, 0.0, -50.0)),
            (FaceLabel::Right, DVec3::new(0.0, 0.0, 50.0)),
            (FaceLabel::Front, DVec3::new(0.0, 0.0, -50.0)),
            (FaceLabel::Back, DVec3::new(1000.0, 0.0, -50.0)),
        ];
        for (face, surface) in expected {
            let placement = FacePlacement::resolve(face, &d);
            let corner = placement.to_element(DVec3::new(0.0, 0.0, placement.exterior_offset()));
            assert!((corner - surface).length() < 1e-9, "{face}: {corner}");

            // One step further outward leaves the section's bounding box
            let beyond = placement.to_element(DVec3::new(
                0.0,
                0.0,
                placement.exterior_offset() + placement.outward(),
            ));
            let inside = beyond.x >= 0.0
                && beyond.x <= d.length
                && beyond.y >= 0.0
                && beyond.y <= d.height
                && beyond.z.abs() <= d.width / 2.0;
            assert!(!inside || face == FaceLabel::Web, "{face}: {beyond}");
        }
    }

    #[test]
    fn test_envelope_contains() {
        let envelope = FacePlacement::resolve(FaceLabel::Web, &dims()).envelope;
        assert!(envelope.contains(DVec2::new(0.0, 200.0), 0.0));
        assert!(!envelope.contains(DVec2::new(-1.0, 100.0), 0.5));
        assert!(envelope.padded(2.0).contains(DVec2::new(-1.0, 100.0), 0.0));
    }
}
