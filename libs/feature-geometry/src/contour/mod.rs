//! # Contour Geometry Kernel
//!
//! Pure functions over 2D contour data:
//!
//! - **bounds**: single-scan bounding boxes
//! - **analysis**: closure, continuity, self-intersections, complexity
//! - **tessellate**: bulges, arcs, beziers, splines, obrounds
//! - **polygon**: orientation and point clean-up
//!
//! Nothing here allocates shared state or logs.

mod analysis;
mod bounds;
mod polygon;
mod tessellate;


pub use analysis::{
    classify_complexity, continuity_gaps, count_self_intersections, is_closed, is_continuous,
    ContourComplexity,
};
pub use bounds::{compute_bounds, ContourBounds};
pub use polygon::{
    clamp_to_rect, ensure_counter_clockwise, is_axis_aligned, normalize_points, signed_area,
};
pub use tessellate::{
    bulge_to_arc_midpoint, obround, polyline_with_bulges, tessellate_arc, tessellate_bezier,
    tessellate_segments,
};
