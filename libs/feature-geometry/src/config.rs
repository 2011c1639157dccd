//! Engine configuration building on the shared `config` crate.
//!
//! Literal tolerances live in `config::constants`; this struct carries the
//! tunables a caller may want to change per run.

use config::constants::{
    CSG_MAX_POLYGONS, CSG_TIME_BUDGET_MS, CUT_CLEARANCE, DEFAULT_CURVE_SUBDIVISIONS,
};
use std::time::Duration;
use thiserror::Error;

/// Runtime configuration for the feature engine.
///
/// # Examples
/// ```
/// use feature_geometry::EngineConfig;
/// let cfg = EngineConfig::default();
/// assert!(cfg.parallel);
/// assert_eq!(cfg.circle_segments, 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Fixed facet count for circles; 0 derives it from the radius.
    pub circle_segments: u32,
    /// Subdivisions per arc, bezier or spline span.
    pub curve_subdivisions: u32,
    /// Overshoot of cutting solids beyond each plate surface.
    pub cut_clearance: f64,
    /// Build batchable features on the rayon pool.
    pub parallel: bool,
    /// Polygon budget for a single boolean call.
    pub csg_max_polygons: usize,
    /// Wall-clock budget for a single boolean call.
    pub csg_time_budget: Duration,
}

impl EngineConfig {
    /// Creates a configuration with validated tessellation settings.
    ///
    /// # Examples
    /// ```
    /// use feature_geometry::EngineConfig;
    /// let cfg = EngineConfig::new(24, 0.25).unwrap();
    /// assert_eq!(cfg.curve_subdivisions, 24);
    /// assert!(EngineConfig::new(0, 0.25).is_err());
    /// ```
    pub fn new(curve_subdivisions: u32, cut_clearance: f64) -> Result<Self, EngineConfigError> {
        if curve_subdivisions == 0 {
            return Err(EngineConfigError::InvalidSubdivisions(curve_subdivisions));
        }
        if !cut_clearance.is_finite() || cut_clearance < 0.0 {
            return Err(EngineConfigError::InvalidClearance(cut_clearance));
        }
        Ok(Self {
            curve_subdivisions,
            cut_clearance,
            ..Self::default()
        })
    }

    /// Returns a copy with parallel construction switched on or off.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns a copy with a fixed circle facet count.
    pub fn with_circle_segments(mut self, segments: u32) -> Self {
        self.circle_segments = segments;
        self
    }

    /// Returns a copy with different CSG budgets.
    pub fn with_csg_budget(mut self, max_polygons: usize, time_budget: Duration) -> Self {
        self.csg_max_polygons = max_polygons;
        self.csg_time_budget = time_budget;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            circle_segments: 0,
            curve_subdivisions: DEFAULT_CURVE_SUBDIVISIONS,
            cut_clearance: CUT_CLEARANCE,
            parallel: true,
            csg_max_polygons: CSG_MAX_POLYGONS,
            csg_time_budget: Duration::from_millis(CSG_TIME_BUDGET_MS),
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineConfigError {
    /// Curves need at least one subdivision.
    #[error("curve_subdivisions must be >= 1: {0}")]
    InvalidSubdivisions(u32),
    /// Clearance must be a finite, non-negative distance.
    #[error("cut_clearance must be finite and non-negative: {0}")]
    InvalidClearance(f64),
}
