//! # Config Crate
//!
//! Centralized configuration constants for the steel feature-geometry
//! pipeline. Every tolerance, threshold and tessellation default used by the
//! contour kernel, the cut handlers and the CSG layer is defined here so the
//! crates stay consistent with each other.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{CONTOUR_EPSILON, DEFAULT_SEGMENTS};
//!
//! // Two contour points closer than CONTOUR_EPSILON are the same point
//! let gap: f64 = 0.05;
//! assert!(gap <= CONTOUR_EPSILON);
//!
//! // Circles default to DEFAULT_SEGMENTS facets
//! assert!(DEFAULT_SEGMENTS >= 12);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Length units agnostic**: Values assume millimetres but nothing depends on it
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
