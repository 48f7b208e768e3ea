//! # elasto-math
//!
//! Linear algebra primitives for the elasto engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec2`, `Mat2`)
//! - "Safe" scalar and vector helpers that return a defined fallback
//!   instead of NaN/Infinity
//! - 2×2 matrix helpers used by the constitutive model (trace, Frobenius
//!   norm, symmetric part, safe inverse)
//! - QR rotation extraction and symmetric eigen decomposition for 2×2
//!   matrices

pub mod decomposition;
pub mod mat2;
pub mod safe;

pub use mat2::Mat2Ext;
pub use safe::Vec2Ext;

// Re-export glam types as the canonical math types for elasto.
pub use glam::{Mat2, Vec2};
