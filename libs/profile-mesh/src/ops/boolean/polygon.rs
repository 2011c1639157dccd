//! # Polygon for BSP Operations
//!
//! Convex polygon with plane and splitting support.

use super::plane::{Classification, Plane};
use glam::DVec3;

/// Output buckets for [`Polygon::split`].
#[derive(Debug, Default)]
pub struct SplitBuffers {
    /// Coplanar polygons facing the same way as the splitting plane.
    pub coplanar_front: Vec<Polygon>,
    /// Coplanar polygons facing the opposite way.
    pub coplanar_back: Vec<Polygon>,
    /// Polygons (or fragments) in front of the plane.
    pub front: Vec<Polygon>,
    /// Polygons (or fragments) behind the plane.
    pub back: Vec<Polygon>,
}

/// A convex polygon with associated plane.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Vertices in counter-clockwise order seen from the front.
    vertices: Vec<DVec3>,
    /// Plane containing this polygon.
    plane: Plane,
    /// Index of the mesh triangle this polygon was cut from
    source: Option<usize>,
}

impl Polygon {
    /// Create polygon from vertices.
    ///
    /// Returns None if vertices don't span a plane.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self {
            vertices,
            plane,
            source: None,
        })
    }

    /// Tags the polygon with the mesh triangle it came from.
    pub fn with_source(mut self, source: usize) -> Self {
        self.source = Some(source);
        self
    }

    /// Fragment of `self` with the same plane and source.
    fn fragment(&self, vertices: Vec<DVec3>) -> Self {
        Self {
            vertices,
            plane: self.plane,
            source: self.source,
        }
    }

    /// Polygon vertices.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Polygon plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Source triangle index, if any.
    pub fn source(&self) -> Option<usize> {
        self.source
    }

    /// Area of the polygon.
    pub fn area(&self) -> f64 {
        let Some(&first) = self.vertices.first() else {
            return 0.0;
        };
        self.vertices
            .windows(2)
            .map(|w| (w[0] - first).cross(w[1] - first))
            .sum::<DVec3>()
            .length()
            / 2.0
    }

    /// Reverse winding order and plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Classify this polygon relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front = false;
        let mut back = false;

        for v in &self.vertices {
            match plane.classify_point(*v) {
                Classification::Front => front = true,
                Classification::Back => back = true,
                _ => {}
            }
        }

        match (front, back) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::Coplanar,
        }
    }

    /// Split this polygon by a plane, pushing the result into `out`.
    pub fn split(self, plane: &Plane, out: &mut SplitBuffers) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal.dot(plane.normal) > 0.0 {
                    out.coplanar_front.push(self);
                } else {
                    out.coplanar_back.push(self);
                }
            }
            Classification::Front => out.front.push(self),
            Classification::Back => out.back.push(self),
            Classification::Spanning => {
                let mut front_verts = Vec::with_capacity(self.vertices.len() + 1);
                let mut back_verts = Vec::with_capacity(self.vertices.len() + 1);
                let n = self.vertices.len();

                for i in 0..n {
                    let vi = self.vertices[i];
                    let vj = self.vertices[(i + 1) % n];
                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);

                    if ti != Classification::Back {
                        front_verts.push(vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(vi);
                    }

                    let crosses = matches!(
                        (ti, tj),
                        (Classification::Front, Classification::Back)
                            | (Classification::Back, Classification::Front)
                    );
                    if crosses {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let intersection = vi.lerp(vj, di / (di - dj));
                        front_verts.push(intersection);
                        back_verts.push(intersection);
                    }
                }

                if front_verts.len() >= 3 {
                    out.front.push(self.fragment(front_verts));
                }
                if back_verts.len() >= 3 {
                    out.back.push(self.fragment(back_verts));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_at(z: f64) -> Polygon {
        Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(0.5, 1.0, z),
        ])
        .unwrap()
    }

    #[test]
    fn test_polygon_flip() {
        let mut poly = triangle_at(0.0);
        let first = poly.vertices()[0];
        poly.flip();
        assert_eq!(poly.vertices()[2], first);
        assert!(poly.plane().normal.z < 0.0);
    }

    #[test]
    fn test_polygon_classify() {
        let plane = Plane { normal: DVec3::Z, w: 0.0 };
        assert_eq!(triangle_at(1.0).classify(&plane), Classification::Front);
        assert_eq!(triangle_at(-1.0).classify(&plane), Classification::Back);
        assert_eq!(triangle_at(0.0).classify(&plane), Classification::Coplanar);
    }

    #[test]
    fn test_polygon_split_spanning() {
        let poly = Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::new(1.0, 0.0, -1.0),
            DVec3::new(0.5, 0.0, 1.0),
        ])
        .unwrap();
        let plane = Plane { normal: DVec3::Z, w: 0.0 };

        let mut out = SplitBuffers::default();
        poly.split(&plane, &mut out);

        assert_eq!(out.front.len(), 1);
        assert_eq!(out.back.len(), 1);
        assert_eq!(out.front[0].vertices().len(), 3);
        assert_eq!(out.back[0].vertices().len(), 4);
    }

    #[test]
    fn test_fragments_keep_source_and_area() {
        let square = Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
            DVec3::new(4.0, 4.0, 0.0),
            DVec3::new(0.0, 4.0, 0.0),
        ])
        .unwrap()
        .with_source(7);
        assert_eq!(square.area(), 16.0);

        let mut out = SplitBuffers::default();
        square.split(&Plane { normal: DVec3::X, w: 1.0 }, &mut out);
        assert_eq!(out.front[0].source(), Some(7));
        assert_eq!(out.back[0].source(), Some(7));
        assert_eq!(out.front[0].area() + out.back[0].area(), 16.0);
    }

    #[test]
    fn test_polygon_split_coplanar_orientation() {
        let plane = Plane { normal: DVec3::Z, w: 0.0 };
        let mut flipped = triangle_at(0.0);
        flipped.flip();

        let mut out = SplitBuffers::default();
        triangle_at(0.0).split(&plane, &mut out);
        flipped.split(&plane, &mut out);

        assert_eq!(out.coplanar_front.len(), 1);
        assert_eq!(out.coplanar_back.len(), 1);
    }
}
