//! # Feature Batch Executor
//!
//! Applies an ordered feature list to a profile solid.
//!
//! ```text
//! features ──group by tier──► Outline → EndCut → Cut → Hole → Marking
//!                                 │
//!             per feature: dispatch → validate → build → subtract
//! ```
//!
//! Non-batchable tiers run one feature at a time. Batchable tiers build
//! their cutting solids on the rayon pool, then subtract them from the
//! accumulator one by one in original order. Every failure is recorded in
//! the feature's report and leaves the accumulator untouched.

use crate::combiner::{BspCsg, CsgBackend};
use crate::config::EngineConfig;
use crate::construction::GeometryService;
use crate::error::{ErrorKind, HandlerError};
use crate::handlers::{CutHandler, FeatureMetadata, ValidationIssue};
use crate::model::{FeatureTier, NormalizedFeature, ProfileElement};
use crate::registry::HandlerRegistry;
use profile_mesh::Mesh;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Lifecycle state of one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureState {
    Received,
    Validating,
    /// Validation errors blocked the feature
    Rejected { errors: Vec<ValidationIssue> },
    Constructing,
    Constructed,
    MetadataAttached,
    /// Dispatch, construction or application failed
    Skipped { reason: String },
}

impl FeatureState {
    /// Returns true for states that end the lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FeatureState::Rejected { .. } | FeatureState::MetadataAttached | FeatureState::Skipped { .. }
        )
    }
}

/// Outcome of one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureReport {
    pub feature_id: String,
    /// Position in the input list
    pub index: usize,
    pub handler_name: Option<String>,
    pub history: Vec<FeatureState>,
    pub metadata: Option<FeatureMetadata>,
}

impl FeatureReport {
    fn new(feature: &NormalizedFeature, index: usize) -> Self {
        Self {
            feature_id: feature.id.clone(),
            index,
            handler_name: None,
            history: vec![FeatureState::Received],
            metadata: None,
        }
    }

    fn skip(&mut self, reason: String) {
        tracing::warn!("Feature {}: skipped: {}", self.feature_id, reason);
        if let Some(metadata) = &mut self.metadata {
            metadata.error = Some(reason.clone());
        }
        self.history.push(FeatureState::Skipped { reason });
    }

    /// Last recorded state.
    pub fn state(&self) -> &FeatureState {
        static RECEIVED: FeatureState = FeatureState::Received;
        self.history.last().unwrap_or(&RECEIVED)
    }

    /// Returns true when the feature's cut reached the solid.
    pub fn is_applied(&self) -> bool {
        *self.state() == FeatureState::MetadataAttached
    }
}

/// Final solid plus one report per input feature, in input order.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub mesh: Mesh,
    pub reports: Vec<FeatureReport>,
}

impl BatchResult {
    /// Number of features whose cut was applied.
    pub fn applied_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_applied()).count()
    }
}

type Admitted = (FeatureReport, Option<Arc<dyn CutHandler>>);

/// Runs features through dispatch, validation, construction and CSG.
pub struct FeatureBatchExecutor {
    registry: HandlerRegistry,
    service: GeometryService,
    backend: Arc<dyn CsgBackend>,
    config: EngineConfig,
}

impl FeatureBatchExecutor {
    /// Creates an executor with the BSP backend.
    pub fn new(registry: HandlerRegistry, config: EngineConfig) -> Self {
        Self {
            registry,
            service: GeometryService::new(config.clone()),
            backend: Arc::new(BspCsg::new(&config)),
            config,
        }
    }

    /// Returns a copy using a different boolean backend.
    /// Routes both the per-feature subtraction and compound-cut merging
    /// through `backend`.
    pub fn with_backend(mut self, backend: Arc<dyn CsgBackend>) -> Self {
        self.service = self.service.with_backend(backend.clone());
        self.backend = backend;
        self
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn service(&self) -> &GeometryService {
        &self.service
    }

    /// Applies `features` to `base` in tier order.
    pub fn execute(
        &self,
        base: Mesh,
        element: &ProfileElement,
        features: &[NormalizedFeature],
    ) -> BatchResult {
        let mut mesh = base;
        let mut reports = Vec::with_capacity(features.len());

        for tier in FeatureTier::ORDER {
            let indices: Vec<usize> = features
                .iter()
                .enumerate()
                .filter(|(_, f)| f.category.tier() == tier)
                .map(|(i, _)| i)
                .collect();
            if indices.is_empty() {
                continue;
            }
            tracing::debug!("Executor: tier {:?} with {} features", tier, indices.len());

            if tier.is_batchable() {
                self.run_batch(&mut mesh, element, features, &indices, &mut reports);
            } else {
                for index in indices {
                    let (report, handler) = self.admit(index, &features[index], element);
                    let report = match handler {
                        Some(handler) => {
                            let built = handler.create_cut_geometry(&features[index], element, &self.service);
                            self.apply(&mut mesh, report, built)
                        }
                        None => report,
                    };
                    reports.push(report);
                }
            }
        }

        reports.sort_by_key(|r| r.index);
        BatchResult { mesh, reports }
    }

    fn run_batch(
        &self,
        mesh: &mut Mesh,
        element: &ProfileElement,
        features: &[NormalizedFeature],
        indices: &[usize],
        reports: &mut Vec<FeatureReport>,
    ) {
        let admitted: Vec<Admitted> = indices
            .iter()
            .map(|&i| self.admit(i, &features[i], element))
            .collect();

        let build = |(report, handler): Admitted| {
            let built = handler
                .map(|h| h.create_cut_geometry(&features[report.index], element, &self.service));
            (report, built)
        };
        let built: Vec<_> = if self.config.parallel {
            admitted.into_par_iter().map(build).collect()
        } else {
            admitted.into_iter().map(build).collect()
        };

        for (report, result) in built {
            let report = match result {
                Some(result) => self.apply(mesh, report, result),
                None => report,
            };
            reports.push(report);
        }
    }

    /// Dispatches and validates. Returns the handler when the feature may
    /// be built.
    fn admit(&self, index: usize, feature: &NormalizedFeature, element: &ProfileElement) -> Admitted {
        let mut report = FeatureReport::new(feature, index);

        let Some(handler) = self.registry.dispatch(&feature.category, feature, element) else {
            report.skip(format!("no handler for category {}", feature.category));
            return (report, None);
        };
        report.handler_name = Some(handler.name().to_string());
        report.history.push(FeatureState::Validating);

        let validation = handler.validate(feature, element);
        let mut metadata = handler.generate_metadata(feature, element);
        metadata.warnings = validation.warnings.iter().map(ToString::to_string).collect();
        for warning in &metadata.warnings {
            tracing::debug!("Feature {}: {}", feature.id, warning);
        }

        if !validation.is_valid() {
            let message = validation
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            tracing::warn!("Feature {}: rejected: {}", feature.id, message);
            metadata.error = Some(message);
            report.metadata = Some(metadata);
            report.history.push(FeatureState::Rejected {
                errors: validation.errors,
            });
            return (report, None);
        }

        report.metadata = Some(metadata);
        report.history.push(FeatureState::Constructing);
        (report, Some(handler))
    }

    /// Subtracts a built cut from the accumulator.
    fn apply(
        &self,
        mesh: &mut Mesh,
        mut report: FeatureReport,
        built: Result<Mesh, HandlerError>,
    ) -> FeatureReport {
        let cut = match built {
            Ok(cut) if cut.is_empty() => {
                report.skip(HandlerError::construction("cut solid is empty").to_string());
                return report;
            }
            Ok(cut) => cut,
            Err(err) => {
                report.skip(err.to_string());
                return report;
            }
        };
        report.history.push(FeatureState::Constructed);

        match self.backend.subtract(mesh, &cut) {
            Ok(result) => {
                *mesh = result;
                report.history.push(FeatureState::MetadataAttached);
            }
            Err(err) => {
                report.skip(HandlerError::new(ErrorKind::CombinerFailure, err.to_string()).to_string());
            }
        }
        report
    }
}

impl Default for FeatureBatchExecutor {
    fn default() -> Self {
        Self::new(HandlerRegistry::with_default_handlers(), EngineConfig::default())
    }
}

impl std::fmt::Debug for FeatureBatchExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureBatchExecutor")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
