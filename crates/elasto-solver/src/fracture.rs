//! Fracture detection records.
//!
//! When an element's largest principal stress exceeds the material
//! toughness, the engine records where the element would split. No
//! splitting happens; the events are diagnostics that are cleared at the
//! start of every substep.

use serde::{Deserialize, Serialize};

use elasto_math::Vec2;
use elasto_types::{ParticleId, TriangleId};

/// Candidate splitting line through a vertex, `normal·p + offset = 0`.
///
/// The normal is the principal stress direction, so the line is
/// perpendicular to the direction of greatest tension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FracturePlane {
    pub normal: Vec2,
    pub offset: f32,
}

impl FracturePlane {
    /// Line through `point` perpendicular to `normal`.
    pub fn through(point: Vec2, normal: Vec2) -> Self {
        Self {
            normal,
            offset: -normal.dot(point),
        }
    }

    /// Signed distance of `p` from the line.
    #[inline]
    pub fn signed_distance(&self, p: Vec2) -> f32 {
        self.normal.dot(p) + self.offset
    }
}

/// One detected fracture candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractureEvent {
    /// Triangle whose stress exceeded the toughness.
    pub triangle: TriangleId,
    /// Local corner (0..3) chosen as the split vertex.
    pub node: usize,
    /// Particle at that corner.
    pub particle: ParticleId,
    /// Largest principal stress that triggered the event.
    pub stress: f32,
    /// Candidate splitting line.
    pub plane: FracturePlane,
}
