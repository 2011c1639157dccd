//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Operations
//!
//! - `build`: Insert polygons, splitting them by existing node planes
//! - `clip_to`: Remove polygons from this tree that are inside another tree
//! - `invert`: Convert solid space to empty space and vice versa
//! - `all_polygons`: Collect all polygons from the tree
//!
//! ## Stack Safety
//!
//! Every traversal uses an explicit work stack. Trees built from convex
//! solids degenerate into long chains, so recursion depth would otherwise
//! grow with the number of distinct planes.

use super::plane::Plane;
use super::polygon::{Polygon, SplitBuffers};

/// A node in the BSP tree.
#[derive(Debug, Default)]
pub struct BspNode {
    /// Splitting plane, taken from the first polygon inserted here
    plane: Option<Plane>,
    /// Polygons coplanar with this node's plane
    polygons: Vec<Polygon>,
    /// Front subtree
    front: Option<Box<BspNode>>,
    /// Back subtree
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Creates a BSP tree from polygons.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut root = Self::default();
        root.build(polygons);
        root
    }

    /// Inserts polygons into the tree, creating nodes as needed.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut stack: Vec<(&mut BspNode, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, polys)) = stack.pop() {
            let Some(first) = polys.first() else {
                continue;
            };
            let plane = *node.plane.get_or_insert(*first.plane());

            let mut out = SplitBuffers::default();
            for poly in polys {
                poly.split(&plane, &mut out);
            }

            node.polygons.append(&mut out.coplanar_front);
            node.polygons.append(&mut out.coplanar_back);

            let BspNode { front, back, .. } = node;
            if !out.front.is_empty() {
                let child = front.get_or_insert_with(Box::default);
                stack.push((child.as_mut(), out.front));
            }
            if !out.back.is_empty() {
                let child = back.get_or_insert_with(Box::default);
                stack.push((child.as_mut(), out.back));
            }
        }
    }

    /// Inverts this BSP tree (flips all polygons and planes, swaps subtrees).
    pub fn invert(&mut self) {
        let mut stack: Vec<&mut BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            for poly in &mut node.polygons {
                poly.flip();
            }
            if let Some(plane) = &mut node.plane {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);

            let BspNode { front, back, .. } = node;
            if let Some(front) = front {
                stack.push(front.as_mut());
            }
            if let Some(back) = back {
                stack.push(back.as_mut());
            }
        }
    }

    /// Removes the parts of `polygons` that lie inside this tree's solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<(&BspNode, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }
            let Some(plane) = node.plane else {
                result.extend(polys);
                continue;
            };

            let mut out = SplitBuffers::default();
            for poly in polys {
                poly.split(&plane, &mut out);
            }

            let mut front_polys = out.front;
            front_polys.append(&mut out.coplanar_front);
            let mut back_polys = out.back;
            back_polys.append(&mut out.coplanar_back);

            match &node.front {
                Some(front) => stack.push((front.as_ref(), front_polys)),
                None => result.extend(front_polys),
            }
            // Without a back subtree the back fragments are inside the solid.
            if let Some(back) = &node.back {
                stack.push((back.as_ref(), back_polys));
            }
        }

        result
    }

    /// Removes the parts of this tree's polygons that are inside `other`.
    pub fn clip_to(&mut self, other: &BspNode) {
        let mut stack: Vec<&mut BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            node.polygons = other.clip_polygons(std::mem::take(&mut node.polygons));

            let BspNode { front, back, .. } = node;
            if let Some(front) = front {
                stack.push(front.as_mut());
            }
            if let Some(back) = back {
                stack.push(back.as_mut());
            }
        }
    }

    /// Collects all polygons from this tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            result.extend(node.polygons.iter().cloned());

            if let Some(front) = &node.front {
                stack.push(front.as_ref());
            }
            if let Some(back) = &node.back {
                stack.push(back.as_ref());
            }
        }

        result
    }

    /// Returns the number of polygons in this tree.
    #[cfg(test)]
    pub fn polygon_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            count += node.polygons.len();
            if let Some(front) = &node.front {
                stack.push(front.as_ref());
            }
            if let Some(back) = &node.back {
                stack.push(back.as_ref());
            }
        }

        count
    }
}

impl Drop for BspNode {
    fn drop(&mut self) {
        // Iterative drop to avoid recursion through long chains
        let mut stack = Vec::new();
        stack.extend(self.front.take());
        stack.extend(self.back.take());

        while let Some(mut node) = stack.pop() {
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }
    }
}
