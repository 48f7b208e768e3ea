//! Mesh topology queries.
//!
//! Adjacency built from the triangle index buffer: vertex-to-triangle
//! fans and undirected edges with their incident triangles. Used to
//! check mesher output (manifoldness, boundary loops) and to pick pinned
//! vertices in scenarios.

use std::collections::{BTreeMap, BTreeSet};

use crate::mesh::TriangleMesh2D;

/// Precomputed adjacency for a [`TriangleMesh2D`].
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each vertex, the triangles that contain it.
    pub vertex_triangles: Vec<Vec<u32>>,

    /// Unique edges as `[v_min, v_max]`, sorted.
    pub edges: Vec<[u32; 2]>,

    /// For each edge, its one (boundary) or two (interior) triangles.
    /// More than two means the mesh is non-manifold.
    pub edge_triangles: Vec<Vec<u32>>,
}

impl Topology {
    /// Build topology from a mesh.
    pub fn build(mesh: &TriangleMesh2D) -> Self {
        let mut vertex_triangles: Vec<Vec<u32>> = vec![Vec::new(); mesh.vertex_count()];
        // Ordered map so edge order is deterministic.
        let mut edge_map: BTreeMap<(u32, u32), Vec<u32>> = BTreeMap::new();

        for (t, [a, b, c]) in mesh.triangles().enumerate() {
            let t = t as u32;
            vertex_triangles[a as usize].push(t);
            vertex_triangles[b as usize].push(t);
            vertex_triangles[c as usize].push(t);

            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                edge_map.entry(key).or_default().push(t);
            }
        }

        let mut edges = Vec::with_capacity(edge_map.len());
        let mut edge_triangles = Vec::with_capacity(edge_map.len());
        for ((v0, v1), tris) in edge_map {
            edges.push([v0, v1]);
            edge_triangles.push(tris);
        }

        Self {
            vertex_triangles,
            edges,
            edge_triangles,
        }
    }

    /// Vertices sharing an edge with `v`, sorted.
    pub fn one_ring(&self, v: u32, mesh: &TriangleMesh2D) -> BTreeSet<u32> {
        let mut neighbors = BTreeSet::new();
        for &tri in &self.vertex_triangles[v as usize] {
            for u in mesh.triangle(tri as usize) {
                if u != v {
                    neighbors.insert(u);
                }
            }
        }
        neighbors
    }

    /// Edges with exactly one adjacent triangle.
    pub fn boundary_edges(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        self.edges
            .iter()
            .zip(&self.edge_triangles)
            .filter(|(_, tris)| tris.len() == 1)
            .map(|(&e, _)| e)
    }

    /// Number of boundary edges.
    pub fn boundary_edge_count(&self) -> usize {
        self.boundary_edges().count()
    }

    /// Vertices on at least one boundary edge, sorted.
    pub fn boundary_vertices(&self) -> BTreeSet<u32> {
        self.boundary_edges().flatten().collect()
    }

    /// True if no edge is shared by more than two triangles.
    pub fn is_manifold(&self) -> bool {
        self.edge_triangles.iter().all(|tris| tris.len() <= 2)
    }

    /// Vertices referenced by no triangle.
    pub fn isolated_vertices(&self) -> Vec<u32> {
        self.vertex_triangles
            .iter()
            .enumerate()
            .filter(|(_, tris)| tris.is_empty())
            .map(|(v, _)| v as u32)
            .collect()
    }
}
