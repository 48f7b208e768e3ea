//! Core 2D triangle mesh type.
//!
//! This is the hand-off format between the meshing pipeline and scene
//! construction: an ordered vertex list plus a flat index buffer.
//! Triangles are stored flat, `[t0v0, t0v1, t0v2, t1v0, ...]`, and are
//! counter clock-wise.

use serde::{Deserialize, Serialize};

use elasto_math::{Vec2, Vec2Ext};
use elasto_types::constants::DEGENERATE_AREA_THRESHOLD;
use elasto_types::{ElastoError, ElastoResult};

/// A 2D triangle mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh2D {
    /// Vertex positions.
    pub vertices: Vec<Vec2>,

    /// Optional per-vertex material/texture coordinates.
    /// Either empty or the same length as `vertices`.
    #[serde(default)]
    pub uvs: Vec<Vec2>,

    /// Triangle indices, three per triangle, CCW.
    pub indices: Vec<u32>,
}

impl TriangleMesh2D {
    /// Creates a mesh from vertices and a flat index buffer (no UVs).
    pub fn new(vertices: Vec<Vec2>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            uvs: Vec::new(),
            indices,
        }
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            uvs: Vec::new(),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec2 {
        self.vertices[i]
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Iterator over all triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Corner positions of triangle `t`.
    #[inline]
    pub fn triangle_positions(&self, t: usize) -> [Vec2; 3] {
        let [a, b, c] = self.triangle(t);
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Signed area of triangle `t` (positive when CCW).
    pub fn signed_area(&self, t: usize) -> f32 {
        let [a, b, c] = self.triangle_positions(t);
        0.5 * (b - a).cross(c - a)
    }

    /// Sum of all signed triangle areas.
    pub fn total_area(&self) -> f32 {
        (0..self.triangle_count()).map(|t| self.signed_area(t)).sum()
    }

    /// Centroid of triangle `t`.
    pub fn centroid(&self, t: usize) -> Vec2 {
        let [a, b, c] = self.triangle_positions(t);
        (a + b + c) / 3.0
    }

    /// Drops every triangle whose centroid fails `keep`.
    ///
    /// Vertices are left untouched, so indices stay valid. Returns the
    /// number of triangles removed.
    pub fn retain_triangles<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(Vec2) -> bool,
    {
        let before = self.triangle_count();
        let mut kept = Vec::with_capacity(self.indices.len());
        for t in 0..before {
            if keep(self.centroid(t)) {
                kept.extend_from_slice(&self.triangle(t));
            }
        }
        self.indices = kept;
        before - self.triangle_count()
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - UVs are absent or match the vertex count
    /// - Index count is a multiple of 3 and every index is in range
    /// - No repeated vertex indices within a triangle
    /// - Every triangle is CCW with non-degenerate area
    pub fn validate(&self) -> ElastoResult<()> {
        let n = self.vertices.len();

        if !self.uvs.is_empty() && self.uvs.len() != n {
            return Err(ElastoError::InvalidMesh(format!(
                "UV count ({}) != vertex count ({})",
                self.uvs.len(),
                n
            )));
        }

        if self.indices.len() % 3 != 0 {
            return Err(ElastoError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(ElastoError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(ElastoError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
            let area = self.signed_area(t);
            if area <= DEGENERATE_AREA_THRESHOLD {
                return Err(ElastoError::InvalidMesh(format!(
                    "Triangle {} is clockwise or degenerate (signed area {:e})",
                    t, area
                )));
            }
        }

        Ok(())
    }
}
