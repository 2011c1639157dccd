//! # Geometry Construction Service
//!
//! Builds cutting solids in the element frame: extruded contours,
//! primitives and end-cut volumes. Handlers never place geometry
//! themselves; they describe it in face-local coordinates and call here.

use crate::combiner::{BspCsg, CombineOutcome, CombineStrategy, Combiner, CsgBackend};
use crate::config::EngineConfig;
use crate::contour::{
    compute_bounds, ensure_counter_clockwise, normalize_points, tessellate_segments,
};
use crate::error::{GeometryError, GeometryResult};
use crate::model::{ContourSegment, ProfileElement, ProfileEnd};
use crate::placement::{FaceLabel, FacePlacement};
use config::constants::{segments_for_radius, END_CUT_EXTENT_FACTOR, EPSILON};
use glam::{DMat4, DVec2, DVec3};
use profile_mesh::primitives::{create_box_between, create_cylinder};
use profile_mesh::{linear_extrude, LinearExtrudeParams, Mesh, Polygon2D};
use std::sync::Arc;

/// Placement options for an extruded contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourOptions {
    pub face: FaceLabel,
    /// Cut depth; the face default when `None`
    pub depth: Option<f64>,
    /// Wall inclination in degrees, tilting along `u`
    pub bevel: Option<f64>,
    /// Shift of the extrusion centre along the face normal
    pub normal_offset: f64,
}

impl ContourOptions {
    /// Options for a straight cut through `face`.
    pub fn on(face: FaceLabel) -> Self {
        Self {
            face,
            depth: None,
            bevel: None,
            normal_offset: 0.0,
        }
    }

    /// Returns a copy with an explicit depth.
    pub fn with_depth(mut self, depth: Option<f64>) -> Self {
        self.depth = depth;
        self
    }
}

/// Contour-free solid, in face-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Box spanning two face-local corners
    Box { min: DVec2, max: DVec2 },
    /// Cylinder through the face
    Cylinder { center: DVec2, radius: f64 },
}

/// Builds cutting solids. Constructed once and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct GeometryService {
    config: EngineConfig,
    combiner: Combiner,
}

impl GeometryService {
    /// Creates a service with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        let combiner = Combiner::new(Arc::new(BspCsg::new(&config)));
        Self { config, combiner }
    }

    /// Returns a copy whose compound cuts use `backend`.
    pub fn with_backend(mut self, backend: Arc<dyn CsgBackend>) -> Self {
        self.combiner = Combiner::new(backend);
        self
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Folds the partial solids of a compound cut.
    pub fn combine(&self, parts: Vec<Mesh>, strategy: CombineStrategy) -> CombineOutcome {
        self.combiner.combine(parts, strategy)
    }

    /// Facet count for a circle of `radius`.
    pub fn circle_segments(&self, radius: f64) -> u32 {
        segments_for_radius(radius, self.config.circle_segments)
    }

    fn extrusion_height(&self, placement: &FacePlacement, depth: Option<f64>) -> GeometryResult<f64> {
        let depth = depth.unwrap_or(placement.depth);
        if !depth.is_finite() || depth <= 0.0 {
            return Err(GeometryError::degenerate(format!(
                "cut depth must be positive: {depth}"
            )));
        }
        Ok(depth + 2.0 * self.config.cut_clearance)
    }

    /// Extrudes a face-local outline into a cutting solid.
    ///
    /// The extrusion is symmetric about the face mid-surface (shifted by
    /// `normal_offset`) and overshoots both plate surfaces by the configured
    /// clearance.
    pub fn create_from_contour(
        &self,
        points: &[DVec2],
        element: &ProfileElement,
        options: &ContourOptions,
    ) -> GeometryResult<Mesh> {
        let outline = ensure_counter_clockwise(normalize_points(points));
        if outline.len() < 3 {
            return Err(GeometryError::invalid_input(format!(
                "contour needs at least 3 distinct points, got {}",
                outline.len()
            )));
        }
        let bounds = compute_bounds(&outline);
        if bounds.width < EPSILON || bounds.height < EPSILON {
            return Err(GeometryError::degenerate("contour bounds have zero area"));
        }

        let placement = FacePlacement::resolve(options.face, &element.dimensions);
        let height = self.extrusion_height(&placement, options.depth)?;

        let shear = match options.bevel {
            Some(angle) if angle.abs() > EPSILON => {
                if !angle.is_finite() || angle.abs() >= 90.0 {
                    return Err(GeometryError::degenerate(format!(
                        "bevel angle must be within (-90, 90) degrees: {angle}"
                    )));
                }
                DVec2::new(height * angle.to_radians().tan(), 0.0)
            }
            _ => DVec2::ZERO,
        };

        // Shift the base so the sheared solid stays centred on the outline
        let polygon = Polygon2D::new(outline.iter().map(|p| *p - shear / 2.0).collect());
        let params = LinearExtrudeParams {
            height,
            center: true,
            shear,
        };
        let mut mesh = linear_extrude(&polygon, &params)?;

        mesh.translate(DVec3::new(0.0, 0.0, options.normal_offset));
        mesh.transform(&placement.transform());
        Ok(mesh)
    }

    /// Tessellates a segment list and extrudes it.
    pub fn create_from_segments(
        &self,
        segments: &[ContourSegment],
        element: &ProfileElement,
        options: &ContourOptions,
    ) -> GeometryResult<Mesh> {
        let points = tessellate_segments(segments, self.config.curve_subdivisions);
        self.create_from_contour(&points, element, options)
    }

    /// Builds a box or cylinder through `face`.
    pub fn create_primitive(
        &self,
        primitive: Primitive,
        element: &ProfileElement,
        face: FaceLabel,
        depth: Option<f64>,
    ) -> GeometryResult<Mesh> {
        let placement = FacePlacement::resolve(face, &element.dimensions);
        let height = self.extrusion_height(&placement, depth)?;

        let mut mesh = match primitive {
            Primitive::Box { min, max } => create_box_between(
                DVec3::new(min.x, min.y, -height / 2.0),
                DVec3::new(max.x, max.y, height / 2.0),
            )?,
            Primitive::Cylinder { center, radius } => {
                let mut cylinder =
                    create_cylinder(height, radius, true, self.circle_segments(radius))?;
                cylinder.translate(DVec3::new(center.x, center.y, 0.0));
                cylinder
            }
        };

        mesh.transform(&placement.transform());
        Ok(mesh)
    }

    /// Builds the volume removed by an end cut.
    ///
    /// The volume is a large box beyond the chosen extremity whose inner
    /// face sits `depth` into the member, rotated by `angle` degrees about
    /// the height axis through the centre of that face.
    pub fn create_end_face(
        &self,
        angle: f64,
        end: ProfileEnd,
        element: &ProfileElement,
        depth: Option<f64>,
    ) -> GeometryResult<Mesh> {
        if !angle.is_finite() || angle.abs() >= 90.0 {
            return Err(GeometryError::degenerate(format!(
                "end cut angle must be within (-90, 90) degrees: {angle}"
            )));
        }
        let dims = &element.dimensions;
        let inset = depth.unwrap_or(0.0);
        if !inset.is_finite() || inset < 0.0 || inset >= dims.length {
            return Err(GeometryError::degenerate(format!(
                "end cut depth must be within [0, length): {inset}"
            )));
        }

        let extent = END_CUT_EXTENT_FACTOR * dims.height.max(dims.width);
        let (pivot_x, x_min, x_max) = match end {
            ProfileEnd::Start => (inset, inset - extent, inset),
            ProfileEnd::End => {
                let x = dims.length - inset;
                (x, x, x + extent)
            }
        };

        let mut mesh = create_box_between(
            DVec3::new(x_min, -extent, -extent),
            DVec3::new(x_max, dims.height + extent, extent),
        )?;

        let pivot = DVec3::new(pivot_x, dims.height / 2.0, 0.0);
        let rotation = DMat4::from_translation(pivot)
            * DMat4::from_rotation_y(angle.to_radians())
            * DMat4::from_translation(-pivot);
        mesh.transform(&rotation);
        Ok(mesh)
    }
}
