//! # Profile Mesh
//!
//! Mesh representation and mesh-level CSG for structural profile cut solids.
//!
//! ## Architecture
//!
//! ```text
//! 2D outline (Polygon2D) → linear_extrude → Mesh
//! primitives (box, cylinder)             → Mesh
//! Mesh ⊕ Mesh (union / difference / intersection) → Mesh
//! ```
//!
//! ## Algorithms
//!
//! All algorithms are pure Rust:
//! - **Boolean Operations**: BSP trees (csg.js algorithm)
//! - **Triangulation**: Ear clipping with robust orientation predicates
//! - **Primitives**: Custom mesh generation
//!
//! ## Usage
//!
//! ```rust
//! use profile_mesh::{difference, primitives::create_cube, Mesh};
//! use glam::DVec3;
//!
//! let plate = create_cube(DVec3::new(100.0, 50.0, 10.0), false).unwrap();
//! let mut tool = create_cube(DVec3::new(20.0, 20.0, 20.0), true).unwrap();
//! tool.translate(DVec3::new(50.0, 25.0, 5.0));
//! let cut = difference(&plate, &tool).unwrap();
//! assert!(cut.triangle_count() > plate.triangle_count());
//! ```

pub mod error;
pub mod mesh;
pub mod ops;
pub mod primitives;

pub use error::MeshError;
pub use mesh::Mesh;
pub use ops::boolean::{bounding_boxes_overlap, difference, intersection, union};
pub use ops::extrude::{linear_extrude, LinearExtrudeParams, Polygon2D};
