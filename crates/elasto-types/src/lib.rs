//! # elasto-types
//!
//! Shared types, identifiers, error types, and numerical constants
//! for the elasto 2D deformable-body engine.
//!
//! This crate has no domain logic. It defines the vocabulary
//! that the mesher, solver and tooling crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{ElastoError, ElastoResult};
pub use ids::{ElementId, ParticleId, TriangleId};
pub use scalar::Scalar;
