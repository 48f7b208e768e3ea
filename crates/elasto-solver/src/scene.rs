//! Scene description: the topology and initial state handed to the engine.
//!
//! A scene is validated once when a [`Simulation`](crate::Simulation) is
//! built. Topology is frozen from then on.

use serde::{Deserialize, Serialize};

use elasto_math::{Vec2, Vec2Ext};
use elasto_mesh::TriangleMesh2D;
use elasto_types::constants::DEGENERATE_AREA_THRESHOLD;
use elasto_types::{ElastoError, ElastoResult};

/// Particles and triangles of a deformable body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Rest positions; also the initial positions.
    pub positions: Vec<Vec2>,
    /// Inverse mass per particle; zero pins the particle.
    pub inv_masses: Vec<f32>,
    /// Optional per-particle texture coordinates.
    #[serde(default)]
    pub uvs: Option<Vec<Vec2>>,
    /// CCW particle index triples.
    pub triangles: Vec<[u32; 3]>,
}

impl SceneDescription {
    /// Scene from a mesh with one inverse mass for every particle.
    pub fn from_mesh(mesh: &TriangleMesh2D, inv_mass: f32) -> Self {
        let uvs = if mesh.uvs.len() == mesh.vertices.len() && !mesh.uvs.is_empty() {
            Some(mesh.uvs.clone())
        } else {
            None
        };

        Self {
            positions: mesh.vertices.clone(),
            inv_masses: vec![inv_mass; mesh.vertex_count()],
            uvs,
            triangles: mesh.triangles().collect(),
        }
    }

    /// Number of particles.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Replaces the inverse masses with area-lumped ones.
    ///
    /// Each triangle adds `density · area / 3` to each of its vertices.
    /// Vertices that end up with no mass are pinned. Already pinned
    /// particles stay pinned.
    pub fn with_area_masses(mut self, density: f32) -> Self {
        let mut masses = vec![0.0f32; self.positions.len()];

        for tri in &self.triangles {
            let [a, b, c] = tri.map(|i| self.positions.get(i as usize).copied());
            let (Some(a), Some(b), Some(c)) = (a, b, c) else {
                continue;
            };
            let share = density * (0.5 * (b - a).cross(c - a)).abs() / 3.0;
            for &i in tri {
                masses[i as usize] += share;
            }
        }

        let pinned: Vec<bool> = self.inv_masses.iter().map(|&w| w == 0.0).collect();
        self.inv_masses = masses
            .iter()
            .enumerate()
            .map(|(i, &m)| {
                if pinned.get(i).copied().unwrap_or(false) || m <= 0.0 {
                    0.0
                } else {
                    1.0 / m
                }
            })
            .collect();
        self
    }

    /// Pins the given particles. Out-of-range indices are ignored here and
    /// left for [`validate`](Self::validate) to catch on the triangles.
    pub fn pin(mut self, indices: &[usize]) -> Self {
        for &i in indices {
            if let Some(w) = self.inv_masses.get_mut(i) {
                *w = 0.0;
            }
        }
        self
    }

    /// Pins every particle for which `predicate(position)` is true.
    pub fn pin_where<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Vec2) -> bool,
    {
        for (w, &p) in self.inv_masses.iter_mut().zip(&self.positions) {
            if predicate(p) {
                *w = 0.0;
            }
        }
        self
    }

    /// Checks array lengths, index bounds, finiteness and winding.
    pub fn validate(&self) -> ElastoResult<()> {
        let n = self.positions.len();

        if self.inv_masses.len() != n {
            return Err(ElastoError::InvalidMesh(format!(
                "Inverse mass count ({}) != particle count ({})",
                self.inv_masses.len(),
                n
            )));
        }
        if let Some(uvs) = &self.uvs {
            if uvs.len() != n {
                return Err(ElastoError::InvalidMesh(format!(
                    "UV count ({}) != particle count ({})",
                    uvs.len(),
                    n
                )));
            }
        }
        if let Some(i) = self.positions.iter().position(|p| !p.is_finite()) {
            return Err(ElastoError::InvalidMesh(format!(
                "Particle {} has a non-finite position",
                i
            )));
        }
        if let Some(i) = self
            .inv_masses
            .iter()
            .position(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(ElastoError::InvalidMesh(format!(
                "Particle {} has invalid inverse mass {}",
                i, self.inv_masses[i]
            )));
        }

        for (t, tri) in self.triangles.iter().enumerate() {
            for &i in tri {
                if i as usize >= n {
                    return Err(ElastoError::InvalidMesh(format!(
                        "Triangle {} references particle {} (count: {})",
                        t, i, n
                    )));
                }
            }
            let [a, b, c] = tri.map(|i| self.positions[i as usize]);
            let area = 0.5 * (b - a).cross(c - a);
            if area <= DEGENERATE_AREA_THRESHOLD {
                return Err(ElastoError::InvalidMesh(format!(
                    "Triangle {} is degenerate or clockwise (signed area {:e})",
                    t, area
                )));
            }
        }

        Ok(())
    }
}
