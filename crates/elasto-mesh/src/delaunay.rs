//! Incremental Delaunay triangulation (Bowyer–Watson).
//!
//! Points are inserted one at a time into a mesh seeded with a large
//! "super triangle". Each insertion removes every triangle whose
//! circumcircle strictly contains the new point and re-triangulates the
//! resulting cavity by connecting its boundary edges to the point. Once
//! all points are in, triangles touching the super triangle are dropped.
//!
//! ## Invariants
//!
//! - Every live triangle is CCW and carries an up-to-date circumcircle.
//! - No vertex lies strictly inside the circumcircle of a live triangle
//!   it does not belong to. This holds incrementally; it is never
//!   re-verified globally.
//!
//! Insertion order matters: the same point set in a different order can
//! give a different (equally valid) triangulation.

use std::ops::Index;

use tracing::debug;

use elasto_math::safe::{distance, safe_div};
use elasto_math::{Vec2, Vec2Ext};
use elasto_types::constants::EPSILON;
use elasto_types::{ElastoError, ElastoResult};

use crate::mesh::TriangleMesh2D;

/// Number of synthetic vertices prepended for the super triangle.
const SUPER_VERTEX_COUNT: usize = 3;

/// A triangle in the working mesh, with its cached circumcircle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaunayTriangle {
    indices: [usize; 3],
    circumcenter: Vec2,
    circumradius: f32,
}

impl DelaunayTriangle {
    /// Creates a triangle with an empty (zero) circumcircle. Only
    /// [`build`](Self::build) hands one out, with the cache filled.
    pub(crate) fn new(i: usize, j: usize, k: usize) -> Self {
        Self {
            indices: [i, j, k],
            circumcenter: Vec2::ZERO,
            circumradius: 0.0,
        }
    }

    /// Creates a CCW triangle with its circumcircle computed.
    pub fn build(i: usize, j: usize, k: usize, vertices: &[Vec2]) -> ElastoResult<Self> {
        let mut tri = Self::new(i, j, k);
        tri.make_ccw(vertices);
        tri.compute_circumcircle(vertices)?;
        Ok(tri)
    }

    /// Vertex indices in CCW order.
    #[inline]
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// Cached circumcenter.
    #[inline]
    pub fn circumcenter(&self) -> Vec2 {
        self.circumcenter
    }

    /// Cached circumradius.
    #[inline]
    pub fn circumradius(&self) -> f32 {
        self.circumradius
    }

    /// True if the triangle references vertex `v`.
    #[inline]
    pub fn contains_vertex(&self, v: usize) -> bool {
        self.indices.contains(&v)
    }

    /// Signed area; positive for CCW winding.
    pub fn signed_area(&self, vertices: &[Vec2]) -> f32 {
        let a = vertices[self.indices[0]];
        let b = vertices[self.indices[1]];
        let c = vertices[self.indices[2]];
        0.5 * (b - a).cross(c - a)
    }

    /// Swaps the first and last index if the triangle is clockwise.
    pub fn make_ccw(&mut self, vertices: &[Vec2]) {
        if self.orientation(vertices) < 0.0 {
            self.indices.swap(0, 2);
        }
    }

    /// Twice the signed area, in f64. Every intermediate of a determinant
    /// of f32 inputs is exact here, so the sign agrees for both windings.
    fn orientation(&self, vertices: &[Vec2]) -> f64 {
        let a = vertices[self.indices[0]].as_dvec2();
        let b = vertices[self.indices[1]].as_dvec2();
        let c = vertices[self.indices[2]].as_dvec2();
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }

    /// Recomputes the circumcircle as the intersection of two
    /// perpendicular edge bisectors.
    ///
    /// Returns [`ElastoError::Geometry`] if the triangle is clockwise:
    /// the bisector construction assumes CCW winding, and a clockwise
    /// triangle at this point means the input was degenerate.
    pub fn compute_circumcircle(&mut self, vertices: &[Vec2]) -> ElastoResult<()> {
        let p = vertices[self.indices[0]];
        let q = vertices[self.indices[1]];
        let r = vertices[self.indices[2]];

        if self.orientation(vertices) < 0.0 {
            return Err(ElastoError::Geometry(format!(
                "triangle ({}, {}, {}) winding order incorrect",
                self.indices[0], self.indices[1], self.indices[2]
            )));
        }

        let pq = q - p;
        let qr = r - q;

        // Mid-points of pq and qr; the center lies on a + t * perp(pq).
        let a = 0.5 * (p + q);
        let b = 0.5 * (q + r);
        let u = pq.perp_ccw();

        let t = safe_div((b - a).dot(qr), u.dot(qr));

        self.circumcenter = a + t * u;
        self.circumradius = distance(self.circumcenter, p);
        Ok(())
    }

    /// Strict in-circle test. Points exactly on the circle are outside.
    #[inline]
    pub fn circumcircle_contains(&self, p: Vec2) -> bool {
        distance(self.circumcenter, p) < self.circumradius
    }

    /// Undirected edge `e` (0..3), from corner `e` to corner `e + 1`.
    #[inline]
    pub fn edge(&self, e: usize) -> Edge {
        Edge::new(self.indices[e], self.indices[(e + 1) % 3])
    }
}

impl Index<usize> for DelaunayTriangle {
    type Output = usize;

    /// Corner `i`. Panics for `i > 2`.
    fn index(&self, i: usize) -> &usize {
        match i {
            0..=2 => &self.indices[i],
            _ => panic!("triangle corner index out of range: {i}"),
        }
    }
}

/// Edge between two vertex indices, compared without direction.
#[derive(Debug, Clone, Copy)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Edge(a, b)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.0 == other.0 && self.1 == other.1) || (self.0 == other.1 && self.1 == other.0)
    }
}

impl Eq for Edge {}

/// Working Delaunay mesh.
///
/// The value is reusable: each [`triangulate`](Self::triangulate) call
/// clears previous state, which lets the variational mesher keep one
/// allocation across iterations.
#[derive(Debug, Clone, Default)]
pub struct DelaunayTriangulation {
    vertices: Vec<Vec2>,
    triangles: Vec<DelaunayTriangle>,
}

impl DelaunayTriangulation {
    /// Creates an empty triangulation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Live triangles.
    pub fn triangles(&self) -> &[DelaunayTriangle] {
        &self.triangles
    }

    /// Triangulates `points`, replacing any previous contents.
    ///
    /// Vertex `i` of the result is `points[i]`. With fewer than three
    /// points the vertices are kept and no triangles are produced.
    pub fn triangulate(&mut self, points: &[Vec2]) -> ElastoResult<()> {
        self.vertices.clear();
        self.triangles.clear();

        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(ElastoError::Geometry(format!(
                "input point {i} is not finite"
            )));
        }

        if points.len() < 3 {
            self.vertices.extend_from_slice(points);
            return Ok(());
        }

        self.vertices.reserve(points.len() + SUPER_VERTEX_COUNT);
        self.add_super_triangle(points)?;

        for &p in points {
            self.insert(p)?;
        }

        self.remove_super_triangle();

        debug!(
            vertices = self.vertices.len(),
            triangles = self.triangles.len(),
            "delaunay triangulation complete"
        );
        Ok(())
    }

    /// Flattens the triangulation into a [`TriangleMesh2D`].
    pub fn to_mesh(&self) -> TriangleMesh2D {
        let mut mesh = TriangleMesh2D::with_capacity(self.vertices.len(), self.triangles.len());
        mesh.vertices.extend_from_slice(&self.vertices);
        for t in &self.triangles {
            mesh.indices.extend(t.indices.iter().map(|&i| i as u32));
        }
        mesh
    }

    /// Consumes the triangulation, see [`to_mesh`](Self::to_mesh).
    pub fn into_mesh(self) -> TriangleMesh2D {
        self.to_mesh()
    }

    fn add_super_triangle(&mut self, points: &[Vec2]) -> ElastoResult<()> {
        let mut lower = Vec2::splat(f32::INFINITY);
        let mut upper = Vec2::splat(f32::NEG_INFINITY);
        for &p in points {
            lower = lower.min(p);
            upper = upper.max(p);
        }

        // A flat axis would give a flat super triangle; borrow the other
        // axis' extent instead.
        let mut margin = upper - lower;
        let fallback = if margin.max_element() > EPSILON {
            margin.max_element()
        } else {
            1.0
        };
        if margin.x <= EPSILON {
            margin.x = fallback;
        }
        if margin.y <= EPSILON {
            margin.y = fallback;
        }

        let lower = lower - margin;
        let upper = upper + margin;
        let extents = upper - lower;

        self.vertices.push(lower);
        self.vertices.push(lower + 2.0 * Vec2::new(extents.x, 0.0));
        self.vertices.push(lower + 2.0 * Vec2::new(0.0, extents.y));

        let tri = DelaunayTriangle::build(0, 1, 2, &self.vertices)?;
        self.triangles.push(tri);
        Ok(())
    }

    fn insert(&mut self, p: Vec2) -> ElastoResult<()> {
        let index = self.vertices.len();
        self.vertices.push(p);

        // Boundary of the cavity: edges seen by exactly one conflicting
        // triangle. An edge shared by two of them cancels out.
        let mut boundary: Vec<Edge> = Vec::new();

        self.triangles.retain(|t| {
            if !t.circumcircle_contains(p) {
                return true;
            }
            for e in 0..3 {
                let edge = t.edge(e);
                match boundary.iter().position(|&b| b == edge) {
                    Some(existing) => {
                        boundary.remove(existing);
                    }
                    None => boundary.push(edge),
                }
            }
            false
        });

        for edge in boundary {
            let tri = DelaunayTriangle::build(edge.0, edge.1, index, &self.vertices)?;
            self.triangles.push(tri);
        }

        Ok(())
    }

    fn remove_super_triangle(&mut self) {
        self.vertices.drain(0..SUPER_VERTEX_COUNT);

        self.triangles
            .retain(|t| t.indices.iter().all(|&i| i >= SUPER_VERTEX_COUNT));

        // Positions are unchanged, so the cached circumcircles stay valid.
        for t in &mut self.triangles {
            for i in &mut t.indices {
                *i -= SUPER_VERTEX_COUNT;
            }
        }
    }
}

/// Triangulates `points` and returns the flattened mesh.
pub fn triangulate_delaunay(points: &[Vec2]) -> ElastoResult<TriangleMesh2D> {
    let mut triangulation = DelaunayTriangulation::new();
    triangulation.triangulate(points)?;
    Ok(triangulation.into_mesh())
}
