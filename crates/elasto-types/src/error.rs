//! Error types for the elasto engine.
//!
//! All crates return `ElastoResult<T>` from fallible operations.
//! Numerical degeneracies are not errors: they are absorbed by the
//! safe helpers in `elasto-math`. Only structural problems
//! (bad winding, bad indices, bad configuration) surface here.

use thiserror::Error;

/// Unified error type for the elasto engine.
#[derive(Debug, Error)]
pub enum ElastoError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Material parameter is out of valid range.
    #[error("Invalid material parameter: {0}")]
    InvalidMaterial(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A geometric precondition was violated (e.g. clockwise winding
    /// handed to the circumcircle computation). Never retried.
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A simulation invariant was violated (e.g. non-finite state).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, ElastoError>`.
pub type ElastoResult<T> = Result<T, ElastoError>;
