//! Simulation particles.

use serde::{Deserialize, Serialize};

use elasto_math::Vec2;
use elasto_types::ParticleId;

/// A mass point of the simulated body.
///
/// `inv_mass == 0` marks the particle as pinned: it never moves, whatever
/// forces accumulate on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Slot in the particle arena.
    pub id: ParticleId,
    /// Current position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Force accumulated during the current substep.
    pub force: Vec2,
    /// Inverse mass; zero for pinned particles.
    pub inv_mass: f32,
    /// Material/texture coordinate carried from the source mesh.
    pub uv: Option<Vec2>,
}

impl Particle {
    /// Creates a particle at rest.
    pub fn new(id: ParticleId, position: Vec2, inv_mass: f32) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            inv_mass,
            uv: None,
        }
    }

    /// True if the particle cannot move.
    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// Mass, or `None` for pinned particles.
    #[inline]
    pub fn mass(&self) -> Option<f32> {
        if self.is_pinned() {
            None
        } else {
            Some(1.0 / self.inv_mass)
        }
    }

    /// `½ m |v|²`; zero for pinned particles.
    pub fn kinetic_energy(&self) -> f32 {
        self.mass()
            .map_or(0.0, |m| 0.5 * m * self.velocity.length_squared())
    }
}
