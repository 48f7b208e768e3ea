//! Scalar type alias for the simulation.

/// The floating-point type used throughout the engine.
///
/// `glam::Vec2`/`glam::Mat2` are single precision, so everything else
/// follows.
pub type Scalar = f32;
