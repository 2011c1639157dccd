//! # Boolean Operations (CSG)
//!
//! Constructive Solid Geometry operations using BSP trees.
//!
//! ## Algorithm
//!
//! Based on the csg.js algorithm by Evan Wallace:
//! - Union: A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); A.build(B)
//! - Difference: A.invert(); A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); A.build(B); A.invert()
//! - Intersection: A.invert(); B.clipTo(A); B.invert(); A.clipTo(B); B.clipTo(A); A.build(B); A.invert()
//!
//! ## Local Difference
//!
//! Repeated subtraction from one accumulator must not re-split the whole
//! solid on every call. `difference` first cuts A's faces against B's
//! padded bounding box; only the pieces inside it enter the BSP, the rest
//! pass through. Afterwards, fragments of an A triangle that lost no area
//! are replaced by the triangle itself, and coincident vertices are welded.
//!
//! ## Example
//!
//! ```rust
//! use profile_mesh::ops::boolean::difference;
//! use profile_mesh::primitives::create_cube;
//! use glam::DVec3;
//!
//! let a = create_cube(DVec3::splat(4.0), true).unwrap();
//! let b = create_cube(DVec3::splat(2.0), true).unwrap();
//! let hollow = difference(&a, &b).unwrap();
//! assert!(hollow.signed_volume() > 55.0);
//! ```

mod bsp;
mod plane;
mod polygon;

#[cfg(test)]
mod tests;

use crate::error::MeshError;
use crate::Mesh;
use bsp::BspNode;
use config::constants::{CSG_FRAGMENT_AREA_TOLERANCE, CSG_LOCAL_MARGIN, VERTEX_MERGE_EPSILON};
use glam::DVec3;
use plane::Plane;
use polygon::{Polygon, SplitBuffers};
use std::collections::HashMap;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Compute union of two meshes.
///
/// Empty inputs short-circuit to a copy of the other operand.
pub fn union(a: &Mesh, b: &Mesh) -> Result<Mesh, MeshError> {
    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);

    if polys_a.is_empty() {
        return Ok(b.clone());
    }
    if polys_b.is_empty() {
        return Ok(a.clone());
    }

    let mut bsp_a = BspNode::new(polys_a);
    let mut bsp_b = BspNode::new(polys_b);

    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.build(bsp_b.all_polygons());

    polygons_to_mesh(&bsp_a.all_polygons())
}

/// Compute difference of two meshes (A - B).
///
/// Disjoint bounding boxes return A unchanged. Faces of A away from B are
/// returned as they were.
pub fn difference(a: &Mesh, b: &Mesh) -> Result<Mesh, MeshError> {
    if a.is_empty() {
        return Ok(Mesh::new());
    }
    if b.is_empty() || !bounding_boxes_overlap(a, b) {
        return Ok(a.clone());
    }

    let polys_a = mesh_to_tagged_polygons(a);
    let polys_b = mesh_to_polygons(b);
    if polys_a.is_empty() {
        return Err(MeshError::boolean_failed(
            "minuend has no non-degenerate faces",
        ));
    }
    if polys_b.is_empty() {
        return Ok(a.clone());
    }

    let (b_min, b_max) = b.bounding_box();
    let margin = DVec3::splat(CSG_LOCAL_MARGIN);
    let (local, mut kept) = split_by_box(polys_a, b_min - margin, b_max + margin);
    // No A surface near B: B is wholly inside or outside A, and only the
    // whole solid can tell which
    let local = if local.is_empty() {
        std::mem::take(&mut kept)
    } else {
        local
    };

    let mut bsp_a = BspNode::new(local);
    let mut bsp_b = BspNode::new(polys_b);

    bsp_a.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.build(bsp_b.all_polygons());
    bsp_a.invert();

    kept.extend(bsp_a.all_polygons());
    polygons_to_mesh(&fuse_fragments(kept, a))
}

/// Compute intersection of two meshes.
pub fn intersection(a: &Mesh, b: &Mesh) -> Result<Mesh, MeshError> {
    if a.is_empty() || b.is_empty() || !bounding_boxes_overlap(a, b) {
        return Ok(Mesh::new());
    }

    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);
    if polys_a.is_empty() || polys_b.is_empty() {
        return Ok(Mesh::new());
    }

    let mut bsp_a = BspNode::new(polys_a);
    let mut bsp_b = BspNode::new(polys_b);

    bsp_a.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_a.build(bsp_b.all_polygons());
    bsp_a.invert();

    polygons_to_mesh(&bsp_a.all_polygons())
}

/// Returns true if the axis-aligned bounding boxes of two meshes overlap.
///
/// Touching boxes count as overlapping.
pub fn bounding_boxes_overlap(a: &Mesh, b: &Mesh) -> bool {
    if a.vertex_count() == 0 || b.vertex_count() == 0 {
        return false;
    }

    let (a_min, a_max) = a.bounding_box();
    let (b_min, b_max) = b.bounding_box();

    a_min.cmple(b_max).all() && b_min.cmple(a_max).all()
}

// =============================================================================
// CONVERSION HELPERS
// =============================================================================

/// Converts mesh triangles to BSP polygons, dropping degenerate triangles.
fn mesh_to_polygons(mesh: &Mesh) -> Vec<Polygon> {
    mesh.triangle_positions()
        .filter_map(|tri| Polygon::from_vertices(tri.to_vec()))
        .collect()
}

/// Like [`mesh_to_polygons`], tagging each polygon with its triangle index.
fn mesh_to_tagged_polygons(mesh: &Mesh) -> Vec<Polygon> {
    mesh.triangle_positions()
        .enumerate()
        .filter_map(|(i, tri)| Polygon::from_vertices(tri.to_vec()).map(|p| p.with_source(i)))
        .collect()
}

/// Cuts polygons against the box `[min, max]`.
///
/// Returns `(inside, outside)`. Pieces lying in a box wall count as outside.
fn split_by_box(polygons: Vec<Polygon>, min: DVec3, max: DVec3) -> (Vec<Polygon>, Vec<Polygon>) {
    let walls = [
        Plane { normal: DVec3::X, w: max.x },
        Plane { normal: DVec3::NEG_X, w: -min.x },
        Plane { normal: DVec3::Y, w: max.y },
        Plane { normal: DVec3::NEG_Y, w: -min.y },
        Plane { normal: DVec3::Z, w: max.z },
        Plane { normal: DVec3::NEG_Z, w: -min.z },
    ];

    let mut inside = Vec::new();
    let mut outside = Vec::new();
    for poly in polygons {
        let (p_min, p_max) = polygon_bounds(&poly);
        if p_min.cmpgt(max).any() || p_max.cmplt(min).any() {
            outside.push(poly);
            continue;
        }

        let mut remaining = vec![poly];
        for wall in &walls {
            let mut out = SplitBuffers::default();
            for piece in remaining {
                piece.split(wall, &mut out);
            }
            outside.append(&mut out.front);
            outside.append(&mut out.coplanar_front);
            outside.append(&mut out.coplanar_back);
            remaining = out.back;
        }
        inside.extend(remaining);
    }
    (inside, outside)
}

fn polygon_bounds(poly: &Polygon) -> (DVec3, DVec3) {
    poly.vertices()
        .iter()
        .fold((DVec3::INFINITY, DVec3::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)))
}

/// Replaces the fragments of a `source` triangle by the triangle itself
/// when together they still cover its whole area.
fn fuse_fragments(polygons: Vec<Polygon>, source: &Mesh) -> Vec<Polygon> {
    let n = source.triangle_count();
    let mut area = vec![0.0; n];
    let mut pieces = vec![0usize; n];
    for poly in &polygons {
        if let Some(i) = poly.source().filter(|&i| i < n) {
            area[i] += poly.area();
            pieces[i] += 1;
        }
    }

    let mut emitted = vec![false; n];
    let mut fused = Vec::with_capacity(polygons.len());
    for poly in polygons {
        let Some(i) = poly.source().filter(|&i| i < n && pieces[i] > 1) else {
            fused.push(poly);
            continue;
        };
        let [v0, v1, v2] = source.triangles()[i];
        let vertices = source.vertices();
        let whole = Polygon::from_vertices(vec![
            vertices[v0 as usize],
            vertices[v1 as usize],
            vertices[v2 as usize],
        ]);
        match whole {
            Some(whole)
                if (area[i] - whole.area()).abs()
                    <= CSG_FRAGMENT_AREA_TOLERANCE * whole.area().max(1.0) =>
            {
                if !emitted[i] {
                    emitted[i] = true;
                    fused.push(whole.with_source(i));
                }
            }
            _ => fused.push(poly),
        }
    }
    fused
}

/// Converts BSP polygons back into a triangle mesh using fan triangulation.
///
/// Vertices closer than `VERTEX_MERGE_EPSILON` share an index; triangles
/// collapsed by the weld are dropped.
fn polygons_to_mesh(polygons: &[Polygon]) -> Result<Mesh, MeshError> {
    let vertex_total: usize = polygons.iter().map(|p| p.vertices().len()).sum();
    if vertex_total > u32::MAX as usize {
        return Err(MeshError::invalid_topology("vertex count exceeds u32 range"));
    }

    let mut mesh = Mesh::with_capacity(vertex_total, vertex_total);
    let mut welded: HashMap<[i64; 3], u32> = HashMap::with_capacity(vertex_total);
    let mut index_of = |mesh: &mut Mesh, v: DVec3| -> u32 {
        let key = (v / VERTEX_MERGE_EPSILON).round().as_i64vec3().to_array();
        *welded.entry(key).or_insert_with(|| mesh.add_vertex(v))
    };

    for poly in polygons {
        let verts = poly.vertices();
        if verts.len() < 3 {
            continue;
        }
        let indices: Vec<u32> = verts.iter().map(|v| index_of(&mut mesh, *v)).collect();
        for i in 1..indices.len() - 1 {
            let tri = [indices[0], indices[i], indices[i + 1]];
            if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
                mesh.add_triangle(tri[0], tri[1], tri[2]);
            }
        }
    }

    Ok(mesh)
}
