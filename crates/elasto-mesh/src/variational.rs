//! Variational mesh relaxation.
//!
//! Each pass re-triangulates the interior points, then moves every
//! point to the area-weighted average of the circumcenters of its
//! incident triangles. Boundary samples claim their nearest vertex and
//! pull it onto the boundary instead. Circumcenters (not centroids) are
//! the relaxation targets: they approximate a centroidal Voronoi
//! tessellation using only data the Delaunay pass already has.

use serde::{Deserialize, Serialize};
use tracing::debug;

use elasto_math::Vec2;
use elasto_types::ElastoResult;

use crate::delaunay::DelaunayTriangulation;
use crate::mesh::TriangleMesh2D;

/// Per-iteration summary handed to a [`MesherObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// Zero-based iteration index.
    pub iteration: u32,
    /// Vertices in this iteration's triangulation.
    pub vertex_count: usize,
    /// Triangles in this iteration's triangulation.
    pub triangle_count: usize,
    /// Vertices pulled by at least one boundary sample.
    pub boundary_claimed: usize,
    /// Vertices with zero accumulated weight, left in place.
    pub unmoved: usize,
}

/// Receives [`IterationStats`] after every relaxation pass.
pub trait MesherObserver {
    fn on_iteration(&mut self, stats: &IterationStats);
}

impl<F: FnMut(&IterationStats)> MesherObserver for F {
    fn on_iteration(&mut self, stats: &IterationStats) {
        self(stats)
    }
}

/// Observer that ignores everything.
struct NoopObserver;

impl MesherObserver for NoopObserver {
    fn on_iteration(&mut self, _stats: &IterationStats) {}
}

/// Iterative circumcenter relaxation on top of the Delaunay triangulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationalMesher {
    /// Number of relaxation passes before the final triangulation.
    pub iterations: u32,
}

impl Default for VariationalMesher {
    fn default() -> Self {
        Self { iterations: 7 }
    }
}

impl VariationalMesher {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Relaxes `interior` against `boundary` and returns the final mesh.
    pub fn run(&self, interior: &[Vec2], boundary: &[Vec2]) -> ElastoResult<TriangleMesh2D> {
        self.run_observed(interior, boundary, &mut NoopObserver)
    }

    /// Like [`run`](Self::run), reporting each pass to `observer`.
    pub fn run_observed(
        &self,
        interior: &[Vec2],
        boundary: &[Vec2],
        observer: &mut dyn MesherObserver,
    ) -> ElastoResult<TriangleMesh2D> {
        let mut points = interior.to_vec();
        let mut triangulation = DelaunayTriangulation::new();

        let mut accum = vec![Vec2::ZERO; points.len()];
        let mut weights = vec![0.0f32; points.len()];

        for iteration in 0..self.iterations {
            triangulation.triangulate(&points)?;

            accum.iter_mut().for_each(|a| *a = Vec2::ZERO);
            weights.iter_mut().for_each(|w| *w = 0.0);

            let vertices = triangulation.vertices();

            for &sample in boundary {
                if let Some(nearest) = nearest_vertex(vertices, sample) {
                    accum[nearest] -= sample;
                    weights[nearest] -= 1.0;
                }
            }

            for tri in triangulation.triangles() {
                let w = tri.signed_area(vertices);
                let c = tri.circumcenter();
                for &v in &tri.indices() {
                    if weights[v] >= 0.0 {
                        accum[v] += w * c;
                        weights[v] += w;
                    }
                }
            }

            let mut unmoved = 0;
            for (i, p) in points.iter_mut().enumerate() {
                if weights[i] == 0.0 {
                    unmoved += 1;
                    continue;
                }
                *p = accum[i] / weights[i];
            }

            let stats = IterationStats {
                iteration,
                vertex_count: vertices.len(),
                triangle_count: triangulation.triangles().len(),
                boundary_claimed: weights.iter().filter(|&&w| w < 0.0).count(),
                unmoved,
            };
            debug!(
                iteration = stats.iteration,
                vertices = stats.vertex_count,
                triangles = stats.triangle_count,
                boundary_claimed = stats.boundary_claimed,
                unmoved = stats.unmoved,
                "variational pass"
            );
            observer.on_iteration(&stats);
        }

        triangulation.triangulate(&points)?;
        Ok(triangulation.into_mesh())
    }
}

/// Index of the vertex closest to `p`. Ties go to the lowest index.
pub fn nearest_vertex(vertices: &[Vec2], p: Vec2) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, v) in vertices.iter().enumerate() {
        let d = v.distance_squared(p);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Runs `iterations` relaxation passes and returns the final mesh.
pub fn triangulate_variational(
    interior: &[Vec2],
    boundary: &[Vec2],
    iterations: u32,
) -> ElastoResult<TriangleMesh2D> {
    VariationalMesher::new(iterations).run(interior, boundary)
}
