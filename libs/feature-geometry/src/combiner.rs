//! # Compound Combiner
//!
//! Folds several partial solids into one, and hosts the boolean backend
//! the batch executor subtracts cuts with.
//!
//! | Strategy | Operation | Can fail |
//! |----------|-----------|----------|
//! | Union | plain mesh merge, no dedup | no |
//! | Sequential | `acc - next` for each part | pairwise, falls back to merge |
//! | Intersection | `acc ∩ next` for each part | pairwise, falls back to merge |

use crate::config::EngineConfig;
use crate::error::CsgError;
use profile_mesh::{difference, intersection, Mesh};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Concatenates meshes without boolean cleanup.
pub fn merge_all(parts: &[Mesh]) -> Mesh {
    let (vertices, triangles) = parts
        .iter()
        .fold((0, 0), |(v, t), m| (v + m.vertex_count(), t + m.triangle_count()));
    let mut merged = Mesh::with_capacity(vertices, triangles);
    for part in parts {
        merged.merge(part);
    }
    merged
}

// =============================================================================
// CSG BACKEND
// =============================================================================

/// Boolean engine used for subtract and intersect.
pub trait CsgBackend: Send + Sync {
    /// Returns `a - b`.
    fn subtract(&self, a: &Mesh, b: &Mesh) -> Result<Mesh, CsgError>;

    /// Returns `a ∩ b`.
    fn intersect(&self, a: &Mesh, b: &Mesh) -> Result<Mesh, CsgError>;
}

/// BSP booleans from `profile-mesh`, bounded by a polygon and a time budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BspCsg {
    pub max_polygons: usize,
    pub time_budget: Duration,
}

impl BspCsg {
    /// Creates a backend with the budgets from `config`.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            max_polygons: config.csg_max_polygons,
            time_budget: config.csg_time_budget,
        }
    }

    fn run(
        &self,
        a: &Mesh,
        b: &Mesh,
        op: fn(&Mesh, &Mesh) -> Result<Mesh, profile_mesh::MeshError>,
    ) -> Result<Mesh, CsgError> {
        let polygons = a.triangle_count() + b.triangle_count();
        if polygons > self.max_polygons {
            return Err(CsgError::BudgetExceeded {
                polygons,
                limit: self.max_polygons,
            });
        }

        let started = Instant::now();
        let result = op(a, b)?;
        let elapsed = started.elapsed();
        // BSP calls cannot be interrupted; a late result is discarded
        if elapsed > self.time_budget {
            return Err(CsgError::TimedOut {
                elapsed_ms: elapsed.as_millis(),
                limit_ms: self.time_budget.as_millis(),
            });
        }
        Ok(result)
    }
}

impl Default for BspCsg {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl CsgBackend for BspCsg {
    fn subtract(&self, a: &Mesh, b: &Mesh) -> Result<Mesh, CsgError> {
        self.run(a, b, difference)
    }

    fn intersect(&self, a: &Mesh, b: &Mesh) -> Result<Mesh, CsgError> {
        self.run(a, b, intersection)
    }
}

// =============================================================================
// COMBINER
// =============================================================================

/// How partial solids are folded together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombineStrategy {
    #[default]
    Union,
    Sequential,
    Intersection,
}

/// Result of [`Combiner::combine`].
#[derive(Debug, Clone, Default)]
pub struct CombineOutcome {
    pub mesh: Mesh,
    /// One entry per pair that fell back to a merge
    pub warnings: Vec<String>,
}

/// Folds partial solids with a [`CombineStrategy`].
#[derive(Clone)]
pub struct Combiner {
    backend: Arc<dyn CsgBackend>,
}

impl Combiner {
    /// Creates a combiner over `backend`.
    pub fn new(backend: Arc<dyn CsgBackend>) -> Self {
        Self { backend }
    }

    /// Combines `parts` in order.
    ///
    /// Never fails: a failed boolean pair degrades to merging that pair.
    pub fn combine(&self, parts: Vec<Mesh>, strategy: CombineStrategy) -> CombineOutcome {
        if strategy == CombineStrategy::Union {
            return CombineOutcome {
                mesh: merge_all(&parts),
                warnings: Vec::new(),
            };
        }

        let mut warnings = Vec::new();
        let mut parts = parts.into_iter();
        let Some(mut acc) = parts.next() else {
            return CombineOutcome::default();
        };

        for (index, next) in parts.enumerate() {
            let result = match strategy {
                CombineStrategy::Sequential => self.backend.subtract(&acc, &next),
                _ => self.backend.intersect(&acc, &next),
            };
            match result {
                Ok(mesh) => acc = mesh,
                Err(err) => {
                    tracing::warn!("Combiner: part {} merged instead: {}", index + 1, err);
                    warnings.push(format!("part {}: {err}; merged instead", index + 1));
                    acc.merge(&next);
                }
            }
        }

        CombineOutcome { mesh: acc, warnings }
    }
}

impl Default for Combiner {
    fn default() -> Self {
        Self::new(Arc::new(BspCsg::default()))
    }
}

impl std::fmt::Debug for Combiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combiner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec3;
    use profile_mesh::primitives::create_cube;

    struct FailingCsg;

    impl CsgBackend for FailingCsg {
        fn subtract(&self, _a: &Mesh, _b: &Mesh) -> Result<Mesh, CsgError> {
            Err(CsgError::Failed {
                message: "boom".into(),
            })
        }

        fn intersect(&self, a: &Mesh, b: &Mesh) -> Result<Mesh, CsgError> {
            self.subtract(a, b)
        }
    }

    fn cube_at(size: f64, offset: DVec3) -> Mesh {
        let mut cube = create_cube(DVec3::splat(size), true).unwrap();
        cube.translate(offset);
        cube
    }

    #[test]
    fn test_merge_all_concatenates() {
        let a = cube_at(1.0, DVec3::ZERO);
        let b = cube_at(1.0, DVec3::X * 5.0);
        let merged = merge_all(&[a.clone(), b]);
        assert_eq!(merged.vertex_count(), 2 * a.vertex_count());
        assert_eq!(merged.triangle_count(), 2 * a.triangle_count());
        assert!(merged.validate());
    }

    #[test]
    fn test_union_strategy_never_calls_backend() {
        let combiner = Combiner::new(Arc::new(FailingCsg));
        let outcome = combiner.combine(
            vec![cube_at(1.0, DVec3::ZERO), cube_at(1.0, DVec3::X * 3.0)],
            CombineStrategy::Union,
        );
        assert!(outcome.warnings.is_empty());
        assert_relative_eq!(outcome.mesh.signed_volume(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sequential_subtracts_in_order() {
        let outcome = Combiner::default().combine(
            vec![cube_at(4.0, DVec3::ZERO), cube_at(2.0, DVec3::ZERO)],
            CombineStrategy::Sequential,
        );
        assert!(outcome.warnings.is_empty());
        assert_relative_eq!(outcome.mesh.signed_volume(), 56.0, epsilon = 1e-6);
    }

    #[test]
    fn test_intersection_strategy() {
        let outcome = Combiner::default().combine(
            vec![cube_at(4.0, DVec3::ZERO), cube_at(2.0, DVec3::ZERO)],
            CombineStrategy::Intersection,
        );
        assert_relative_eq!(outcome.mesh.signed_volume(), 8.0, epsilon = 1e-6);
    }

    #[test]
    fn test_failed_pair_falls_back_to_merge() {
        let combiner = Combiner::new(Arc::new(FailingCsg));
        let outcome = combiner.combine(
            vec![cube_at(4.0, DVec3::ZERO), cube_at(2.0, DVec3::ZERO)],
            CombineStrategy::Sequential,
        );
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("boom"));
        assert_eq!(outcome.mesh.triangle_count(), 24);
    }

    #[test]
    fn test_empty_input() {
        let outcome = Combiner::default().combine(Vec::new(), CombineStrategy::Sequential);
        assert!(outcome.mesh.is_empty());
    }

    #[test]
    fn test_polygon_budget() {
        let csg = BspCsg {
            max_polygons: 10,
            time_budget: Duration::from_secs(5),
        };
        let err = csg
            .subtract(&cube_at(4.0, DVec3::ZERO), &cube_at(2.0, DVec3::ZERO))
            .unwrap_err();
        assert_eq!(
            err,
            CsgError::BudgetExceeded {
                polygons: 24,
                limit: 10
            }
        );
    }

    #[test]
    fn test_time_budget_discards_late_result() {
        let csg = BspCsg {
            max_polygons: usize::MAX,
            time_budget: Duration::ZERO,
        };
        let err = csg
            .subtract(&cube_at(4.0, DVec3::ZERO), &cube_at(2.0, DVec3::ZERO))
            .unwrap_err();
        assert!(matches!(err, CsgError::TimedOut { limit_ms: 0, .. }));
    }
}
