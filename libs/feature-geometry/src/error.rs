//! # Engine Errors
//!
//! Error types for geometry construction, handler execution and CSG calls.
//!
//! Validation problems are not errors: they are collected as
//! [`ValidationIssue`](crate::handlers::ValidationIssue) data and reported.

use profile_mesh::MeshError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for geometry construction.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors raised while building a cutting solid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Input is missing or unusable
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Input has no usable area or volume
    #[error("Degenerate geometry: {message}")]
    Degenerate { message: String },

    /// Mesh generation failed
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl GeometryError {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::Degenerate {
            message: message.into(),
        }
    }
}

/// Failure classes for features, from malformed input to CSG failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Missing or non-finite coordinates, too few points
    MalformedFeature,
    /// Zero area, negative sizes, angles out of range
    GeometricDegenerate,
    /// Contour leaves the profile envelope
    OutOfEnvelope,
    /// Too many points or self-intersections
    ComplexityExceeded,
    /// Handler failed while building the solid
    ConstructionFailure,
    /// Boolean operation failed or ran over budget
    CombinerFailure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::MalformedFeature => "malformed feature",
            ErrorKind::GeometricDegenerate => "degenerate geometry",
            ErrorKind::OutOfEnvelope => "out of envelope",
            ErrorKind::ComplexityExceeded => "complexity exceeded",
            ErrorKind::ConstructionFailure => "construction failure",
            ErrorKind::CombinerFailure => "combiner failure",
        };
        f.write_str(name)
    }
}

/// Error returned by a cut handler operation.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct HandlerError {
    /// Failure class
    pub kind: ErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl HandlerError {
    /// Creates a handler error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a malformed feature error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedFeature, message)
    }

    /// Creates a construction failure error.
    pub fn construction(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConstructionFailure, message)
    }
}

impl From<GeometryError> for HandlerError {
    fn from(err: GeometryError) -> Self {
        let kind = match err {
            GeometryError::InvalidInput { .. } => ErrorKind::MalformedFeature,
            GeometryError::Degenerate { .. } => ErrorKind::GeometricDegenerate,
            GeometryError::Mesh(_) => ErrorKind::ConstructionFailure,
        };
        Self::new(kind, err.to_string())
    }
}

/// Errors reported by a [`CsgBackend`](crate::combiner::CsgBackend).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsgError {
    /// Operands are too large for a single call
    #[error("CSG polygon budget exceeded: {polygons} > {limit}")]
    BudgetExceeded { polygons: usize, limit: usize },

    /// The call finished after its wall-clock budget
    #[error("CSG call took {elapsed_ms} ms, budget is {limit_ms} ms")]
    TimedOut { elapsed_ms: u128, limit_ms: u128 },

    /// The boolean engine failed
    #[error("CSG operation failed: {message}")]
    Failed { message: String },
}

impl From<MeshError> for CsgError {
    fn from(err: MeshError) -> Self {
        Self::Failed {
            message: err.to_string(),
        }
    }
}
