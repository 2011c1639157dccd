//! # Mesh Operations
//!
//! Boolean operations (CSG) and linear extrusion of 2D outlines.

pub mod boolean;
pub mod extrude;

pub use boolean::{bounding_boxes_overlap, difference, intersection, union};
pub use extrude::{linear_extrude, LinearExtrudeParams, Polygon2D};
