//! Static half-plane collision.
//!
//! A plane `n·p + offset = 0` with unit normal `n` bounds the free
//! half-space `n·p + offset >= 0`. Particles found behind it are
//! projected back onto it, their inbound normal velocity is removed and
//! the remaining tangential velocity is scaled by the friction factor.

use serde::{Deserialize, Serialize};

use elasto_math::safe::safe_normalize;
use elasto_math::{Vec2, Vec2Ext};
use elasto_types::{ElastoError, ElastoResult};

use crate::config::PlaneConfig;
use crate::particle::Particle;

/// A static collision half-plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionPlane {
    normal: Vec2,
    offset: f32,
}

/// Summary of one collision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionSummary {
    /// Particle/plane pairs that were in penetration.
    pub resolved_count: u32,
    /// Deepest penetration found (positive distance).
    pub max_penetration: f32,
}

impl CollisionPlane {
    /// Creates a plane from a normal and offset.
    ///
    /// The normal is normalized and the offset scaled with it, so the
    /// described line is unchanged. A zero normal is rejected.
    pub fn new(normal: Vec2, offset: f32) -> ElastoResult<Self> {
        let len = normal.length();
        let unit = safe_normalize(normal);
        if unit == Vec2::ZERO || !offset.is_finite() {
            return Err(ElastoError::InvalidConfig(format!(
                "collision plane needs a non-zero normal and finite offset, got {:?} / {}",
                normal, offset
            )));
        }
        Ok(Self {
            normal: unit,
            offset: offset / len,
        })
    }

    /// Floor at height `y`.
    pub fn floor(y: f32) -> Self {
        Self {
            normal: Vec2::Y,
            offset: -y,
        }
    }

    /// Builds a plane from its configuration entry.
    pub fn from_config(config: &PlaneConfig) -> ElastoResult<Self> {
        Self::new(config.normal, config.offset)
    }

    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Signed distance of `p`; negative means penetration.
    #[inline]
    pub fn signed_distance(&self, p: Vec2) -> f32 {
        self.normal.dot(p) + self.offset
    }

    /// Resolves one particle against this plane. Returns the penetration
    /// depth if there was contact.
    pub fn resolve_particle(&self, particle: &mut Particle, friction: f32) -> Option<f32> {
        let d = self.signed_distance(particle.position);
        if d >= 0.0 {
            return None;
        }

        particle.position -= d * self.normal;
        self.push_out(&mut particle.position);

        let vn = particle.velocity.dot(self.normal);
        if vn < 0.0 {
            particle.velocity = tangential_velocity(particle.velocity, self.normal, friction);
        }

        Some(-d)
    }

    /// Moves `p` along the normal until its signed distance, as evaluated
    /// in f32, is no longer negative.
    fn push_out(&self, p: &mut Vec2) {
        let mut slack = f32::EPSILON * (1.0 + p.abs().max_element());
        for _ in 0..MAX_PUSH_OUT_STEPS {
            let d = self.signed_distance(*p);
            if d >= 0.0 {
                return;
            }
            *p += (slack - d) * self.normal;
            slack *= 2.0;
        }
    }
}

/// Bound on the push-out refinement in [`CollisionPlane::resolve_particle`].
const MAX_PUSH_OUT_STEPS: usize = 32;

/// Tangential part of `v` along the line of unit normal `n`, scaled by
/// `friction`. The result's f32 dot product with `n` is exactly zero.
fn tangential_velocity(v: Vec2, n: Vec2, friction: f32) -> Vec2 {
    let tangent = n.perp_ccw();
    let speed = v.dot(tangent) * friction;
    let t = tangent * speed;
    if t.dot(n) == 0.0 {
        return t;
    }

    // Re-solve the component along the dominant normal axis and walk its
    // neighbouring floats until the two products cancel.
    let (major, minor) = if n.x.abs() >= n.y.abs() { (0, 1) } else { (1, 0) };
    let target = -(t[minor] * n[minor]) / n[major];
    let bits = target.to_bits();
    for step in 0..=8u32 {
        for candidate in [bits.wrapping_add(step), bits.wrapping_sub(step)] {
            let value = f32::from_bits(candidate);
            if !value.is_finite() {
                continue;
            }
            let mut c = t;
            c[major] = value;
            if c.dot(n) == 0.0 {
                return c;
            }
        }
    }

    // A power-of-two multiple of the tangent cancels exactly, since both
    // products then round the same real value.
    let scale = speed.abs().log2().round().exp2().copysign(speed);
    tangent * scale
}

/// Resolves every movable particle against every plane, in order.
///
/// Pinned particles are skipped.
pub fn resolve_planes(
    particles: &mut [Particle],
    planes: &[CollisionPlane],
    friction: f32,
) -> CollisionSummary {
    let mut summary = CollisionSummary::default();

    for particle in particles.iter_mut().filter(|p| !p.is_pinned()) {
        for plane in planes {
            if let Some(depth) = plane.resolve_particle(particle, friction) {
                summary.resolved_count += 1;
                summary.max_penetration = summary.max_penetration.max(depth);
            }
        }
    }

    summary
}
