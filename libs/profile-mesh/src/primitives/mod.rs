//! # Primitives
//!
//! Mesh generation for the solid tools used by cut handlers.

pub mod cube;
pub mod cylinder;

pub use cube::{create_box_between, create_cube};
pub use cylinder::create_cylinder;
