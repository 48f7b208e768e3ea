//! The simulation engine.
//!
//! Owns the particle and element arenas plus the collision planes, and
//! advances them with symplectic Euler:
//!
//! ```text
//! clear fracture events
//! accumulate forces   (gravity/drag, element stress)
//! resolve collisions  (movable particles vs planes)
//! integrate           (v += f·w·dt, p += v·dt, f = 0)
//! ```
//!
//! Everything runs sequentially on the calling thread.

use rand::Rng;
use tracing::{debug, trace, warn};

use elasto_material::{ConstitutiveModel, CorotationalModel};
use elasto_math::decomposition::eigen_decomposition;
use elasto_math::safe::safe_normalize;
use elasto_math::Vec2;
use elasto_types::{ElastoError, ElastoResult, ParticleId, TriangleId};

use crate::collision::{resolve_planes, CollisionPlane, CollisionSummary};
use crate::config::SolverConfig;
use crate::element::Element;
use crate::fracture::{FractureEvent, FracturePlane};
use crate::particle::Particle;
use crate::scene::SceneDescription;

/// What happened during one substep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SubstepReport {
    /// Substep size used.
    pub dt: f32,
    /// Fracture candidates recorded.
    pub fracture_count: u32,
    /// Elements whose strain exceeded the yield threshold.
    pub yielded_count: u32,
    /// Largest principal stress over all elements.
    pub max_stress: f32,
    /// Collision pass results.
    pub collisions: CollisionSummary,
}

/// Accumulated results of one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Substeps taken.
    pub substeps: u32,
    /// Frame duration.
    pub duration: f32,
    /// Fracture candidates over all substeps.
    pub fracture_count: u32,
    /// Yielded element-substeps.
    pub yielded_count: u32,
    /// Largest principal stress seen.
    pub max_stress: f32,
    /// Contacts resolved over all substeps.
    pub contact_count: u32,
    /// Deepest penetration seen.
    pub max_penetration: f32,
    /// Kinetic energy at the end of the frame.
    pub kinetic_energy: f32,
}

/// A deformable body plus its static environment.
pub struct Simulation {
    particles: Vec<Particle>,
    triangles: Vec<[u32; 3]>,
    elements: Vec<Element>,
    planes: Vec<CollisionPlane>,
    fractures: Vec<FractureEvent>,
    config: SolverConfig,
    model: CorotationalModel,
    time: f32,
    substep_count: u64,
}

impl Simulation {
    /// Builds a simulation from a validated scene and configuration.
    ///
    /// Element rest data is computed from the scene's positions.
    pub fn new(scene: SceneDescription, config: SolverConfig) -> ElastoResult<Self> {
        scene.validate()?;
        config.validate()?;

        let planes = config
            .planes
            .iter()
            .map(CollisionPlane::from_config)
            .collect::<ElastoResult<Vec<_>>>()?;

        let mut particles: Vec<Particle> = scene
            .positions
            .iter()
            .zip(&scene.inv_masses)
            .enumerate()
            .map(|(i, (&p, &w))| Particle::new(ParticleId(i as u32), p, w))
            .collect();

        if let Some(uvs) = &scene.uvs {
            for (particle, &uv) in particles.iter_mut().zip(uvs) {
                particle.uv = Some(uv);
            }
        }

        let elements: Vec<Element> = scene
            .triangles
            .iter()
            .map(|tri| Element::new(tri.map(|i| scene.positions[i as usize])))
            .collect();

        let pinned = particles.iter().filter(|p| p.is_pinned()).count();
        debug!(
            particles = particles.len(),
            triangles = elements.len(),
            pinned,
            planes = planes.len(),
            "Simulation built"
        );

        Ok(Self {
            particles,
            triangles: scene.triangles,
            elements,
            planes,
            fractures: Vec::new(),
            model: CorotationalModel::new(config.material.clone()),
            config,
            time: 0.0,
            substep_count: 0,
        })
    }

    // ─── Stepping ─────────────────────────────────────────────

    /// Advances one frame of `frame_duration` seconds in
    /// `config.substeps` equal substeps.
    pub fn step_frame<R: Rng + ?Sized>(&mut self, frame_duration: f32, rng: &mut R) -> FrameReport {
        let substeps = self.config.substeps.max(1);
        let dt = frame_duration / substeps as f32;

        let mut report = FrameReport {
            substeps,
            duration: frame_duration,
            ..Default::default()
        };

        for _ in 0..substeps {
            let step = self.substep(dt, rng);
            report.fracture_count += step.fracture_count;
            report.yielded_count += step.yielded_count;
            report.max_stress = report.max_stress.max(step.max_stress);
            report.contact_count += step.collisions.resolved_count;
            report.max_penetration = report.max_penetration.max(step.collisions.max_penetration);
        }

        report.kinetic_energy = self.kinetic_energy();
        report
    }

    /// Advances the simulation by `dt`.
    ///
    /// Fracture events from the previous substep are discarded first, so
    /// afterwards [`fractures`](Self::fractures) holds only this substep's.
    pub fn substep<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> SubstepReport {
        self.fractures.clear();

        let mut report = SubstepReport {
            dt,
            ..Default::default()
        };

        self.apply_external_forces();
        self.apply_element_forces(dt, rng, &mut report);

        report.collisions = resolve_planes(&mut self.particles, &self.planes, self.config.friction);

        self.integrate(dt);

        self.time += dt;
        self.substep_count += 1;

        if report.fracture_count > 0 {
            trace!(
                substep = self.substep_count,
                fractures = report.fracture_count,
                max_stress = report.max_stress,
                "Fracture candidates detected"
            );
        }

        report
    }

    fn apply_external_forces(&mut self) {
        let gravity = self.config.gravity;
        let drag = self.config.drag;

        for particle in &mut self.particles {
            if particle.is_pinned() {
                particle.force -= drag * particle.velocity;
            } else {
                particle.force += gravity / particle.inv_mass;
            }
        }
    }

    fn apply_element_forces<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        rng: &mut R,
        report: &mut SubstepReport,
    ) {
        let toughness = self.model.properties().toughness;

        for (t, (tri, element)) in self.triangles.iter().zip(&mut self.elements).enumerate() {
            let idx = tri.map(|i| i as usize);
            let x = idx.map(|i| self.particles[i].position);
            let v = idx.map(|i| self.particles[i].velocity);

            let f = element.deformation_gradient(x);
            let f_dot = element.deformation_gradient(v);

            let state = self
                .model
                .evaluate(f, f_dot, element.plastic_strain_mut(), dt);
            if state.yielded {
                report.yielded_count += 1;
            }

            let eig = eigen_decomposition(state.stress);
            report.max_stress = report.max_stress.max(eig.max);

            if eig.max > toughness {
                let node = rng.gen_range(0..3);
                let particle = &self.particles[idx[node]];

                if !particle.is_pinned() {
                    let normal = safe_normalize(state.rotation * eig.max_vector);
                    self.fractures.push(FractureEvent {
                        triangle: TriangleId(t as u32),
                        node,
                        particle: particle.id,
                        stress: eig.max,
                        plane: FracturePlane::through(particle.position, normal),
                    });
                    report.fracture_count += 1;
                }
            }

            let rp = state.rotation * state.stress;
            for (k, b) in element.area_normals().iter().enumerate() {
                self.particles[idx[k]].force -= rp * *b / 3.0;
            }
        }
    }

    fn integrate(&mut self, dt: f32) {
        for particle in &mut self.particles {
            if !particle.is_pinned() {
                particle.velocity += particle.force * particle.inv_mass * dt;
                particle.position += particle.velocity * dt;
            }
            particle.force = Vec2::ZERO;
        }
    }

    // ─── Interaction ──────────────────────────────────────────

    /// Adds an external force to a particle for the next substep.
    pub fn apply_force(&mut self, id: ParticleId, force: Vec2) -> ElastoResult<()> {
        let count = self.particles.len();
        let particle = self.particles.get_mut(id.index()).ok_or_else(|| {
            ElastoError::InvariantViolation(format!(
                "Particle {} out of range (count: {})",
                id.0, count
            ))
        })?;

        if !force.is_finite() {
            warn!(particle = id.0, ?force, "Ignoring non-finite external force");
            return Ok(());
        }

        particle.force += force;
        Ok(())
    }

    /// Particle nearest to `p`; the first one wins on ties.
    pub fn find_closest_particle(&self, p: Vec2) -> Option<ParticleId> {
        let mut best: Option<(ParticleId, f32)> = None;
        for particle in &self.particles {
            let d = particle.position.distance_squared(p);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((particle.id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    // ─── Accessors ────────────────────────────────────────────

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Fracture candidates recorded during the last substep.
    pub fn fractures(&self) -> &[FractureEvent] {
        &self.fractures
    }

    pub fn planes(&self) -> &[CollisionPlane] {
        &self.planes
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Name of the constitutive model in use.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Simulated time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Substeps taken so far.
    pub fn substep_count(&self) -> u64 {
        self.substep_count
    }

    /// Total kinetic energy of movable particles.
    pub fn kinetic_energy(&self) -> f32 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    /// Current positions, in particle order.
    pub fn positions(&self) -> Vec<Vec2> {
        self.particles.iter().map(|p| p.position).collect()
    }
}
