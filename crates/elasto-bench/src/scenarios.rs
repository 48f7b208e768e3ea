//! Scenarios: procedural mesh + masses + pinning + config for each case.
//!
//! 1. **Beam**: cantilever strip welded at its left end
//! 2. **Convex**: Delaunay triangulation of random points, free fall
//! 3. **Torus**: one-quad-thick ring, free fall
//! 4. **Blob**: variationally meshed disc with area-lumped masses
//!
//! All of them fall inside the demo box (floor at `y = -1.8`, walls at
//! `x = ±2.8`).

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use elasto_math::Vec2;
use elasto_mesh::generators::{cantilever_beam, disc_samples, random_points, torus};
use elasto_mesh::{triangulate_delaunay, IterationStats, TriangleMesh2D, VariationalMesher};
use elasto_solver::{SceneDescription, SolverConfig};
use elasto_types::constants::DEFAULT_FRAME_DT;
use elasto_types::{ElastoError, ElastoResult};

/// Which scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Cantilever beam welded at the left end.
    Beam,
    /// Random convex blob.
    Convex,
    /// Ring.
    Torus,
    /// Variationally meshed disc.
    Blob,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::Beam,
            ScenarioKind::Convex,
            ScenarioKind::Torus,
            ScenarioKind::Blob,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Beam => "beam",
            ScenarioKind::Convex => "convex",
            ScenarioKind::Torus => "torus",
            ScenarioKind::Blob => "blob",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = ElastoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                ElastoError::InvalidConfig(format!(
                    "unknown scenario '{}' (expected beam, convex, torus or blob)",
                    s
                ))
            })
    }
}

/// A fully specified scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Body to simulate.
    pub scene: SceneDescription,
    /// Engine configuration.
    pub config: SolverConfig,
    /// Number of frames to simulate.
    pub frames: u32,
    /// Frame duration (seconds).
    pub frame_dt: f32,
    /// Seed for mesh generation and fracture vertex choice.
    pub seed: u64,
    /// Per-pass statistics when the mesh came from the variational mesher.
    pub mesher_stats: Vec<IterationStats>,
}

impl Scenario {
    /// Welded cantilever beam: 5 square cells, 1 unit long.
    pub fn beam() -> Self {
        let mesh = cantilever_beam(Vec2::new(-0.5, 0.5), 1.0, 5);
        let scene = SceneDescription::from_mesh(&mesh, 1.0).pin(&[0, 1]);

        Self::new(ScenarioKind::Beam, scene, SolverConfig::beam(), 0)
    }

    /// Delaunay triangulation of 10 random points in a unit square.
    pub fn convex(seed: u64) -> ElastoResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let points = random_points(Vec2::new(0.0, 0.5), 1.0, 10, &mut rng);
        let mesh = triangulate_delaunay(&points)?;
        let scene = SceneDescription::from_mesh(&mesh, 1.0);

        Ok(Self::new(ScenarioKind::Convex, scene, SolverConfig::convex(), seed))
    }

    /// Ring with inner radius 0.2 and outer radius 0.5.
    pub fn torus() -> Self {
        let mut mesh = torus(0.2, 0.5, 12);
        translate(&mut mesh, Vec2::new(0.0, 0.5));
        let scene = SceneDescription::from_mesh(&mesh, 1.0);

        Self::new(ScenarioKind::Torus, scene, SolverConfig::torus(), 0)
    }

    /// Disc of radius 0.5 meshed by the variational mesher, with masses
    /// lumped from the material density.
    pub fn blob(seed: u64) -> ElastoResult<Self> {
        let center = Vec2::new(0.0, 0.5);
        let radius = 0.5;

        let mut rng = StdRng::seed_from_u64(seed);
        let samples = disc_samples(center, radius, 0.125, 0.25, &mut rng);

        let mut stats = Vec::new();
        let mut observer = |s: &IterationStats| stats.push(*s);
        let mut mesh = VariationalMesher::default().run_observed(
            &samples.interior,
            &samples.boundary,
            &mut observer,
        )?;

        let dropped = mesh.retain_triangles(|c| c.distance(center) <= radius);
        debug!(dropped, kept = mesh.triangle_count(), "Trimmed blob to disc");

        let config = SolverConfig::shape();
        let scene = SceneDescription::from_mesh(&mesh, 1.0).with_area_masses(config.material.density);

        let mut scenario = Self::new(ScenarioKind::Blob, scene, config, seed);
        scenario.mesher_stats = stats;
        Ok(scenario)
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind, seed: u64) -> ElastoResult<Self> {
        match kind {
            ScenarioKind::Beam => Ok(Self::beam()),
            ScenarioKind::Convex => Self::convex(seed),
            ScenarioKind::Torus => Ok(Self::torus()),
            ScenarioKind::Blob => Self::blob(seed),
        }
    }

    /// Replaces the configuration, keeping the demo planes if the new one
    /// has none.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = if config.planes.is_empty() {
            config.with_demo_planes()
        } else {
            config
        };
        self
    }

    /// Sets the number of frames.
    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }

    fn new(kind: ScenarioKind, scene: SceneDescription, config: SolverConfig, seed: u64) -> Self {
        Self {
            kind,
            scene,
            config: config.with_demo_planes(),
            frames: 120, // 2 seconds at 60fps
            frame_dt: DEFAULT_FRAME_DT,
            seed,
            mesher_stats: Vec::new(),
        }
    }
}

fn translate(mesh: &mut TriangleMesh2D, offset: Vec2) {
    for v in &mut mesh.vertices {
        *v += offset;
    }
}
