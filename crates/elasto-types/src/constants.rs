//! Numerical thresholds and simulation defaults.

/// Gravitational acceleration (m/s²) used by the default configuration.
pub const GRAVITY: f32 = 9.8;

/// Default frame duration (seconds). 1/60th of a second.
pub const DEFAULT_FRAME_DT: f32 = 1.0 / 60.0;

/// Epsilon below which a divisor is treated as zero by the safe helpers.
pub const EPSILON: f32 = 1.0e-9;

/// Area below which a triangle is considered degenerate.
pub const DEGENERATE_AREA_THRESHOLD: f32 = 1.0e-10;

/// Upper bound on the Frobenius norm of an element's plastic strain.
pub const DEFAULT_PLASTIC_STRAIN_CAP: f32 = 0.6;
