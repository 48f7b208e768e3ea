//! Procedural mesh and point-set generators for scenarios and testing.
//!
//! Mesh generators produce deterministic, resolution-configurable meshes
//! with CCW winding. Point generators feed the Delaunay triangulator and
//! the variational mesher.

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use elasto_math::Vec2;

use crate::mesh::TriangleMesh2D;

/// Generates a rectangular quad grid with its lower-left corner at `origin`.
///
/// Rows run bottom to top, vertices are row-major and each quad is split
/// into `(bl, br, tr)` and `(bl, tr, tl)`. UVs span `[0, 1]²`.
///
/// # Example
/// ```
/// use elasto_math::Vec2;
/// use elasto_mesh::generators::quad_grid;
/// let mesh = quad_grid(Vec2::ZERO, 2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn quad_grid(origin: Vec2, cols: usize, rows: usize, width: f32, height: f32) -> TriangleMesh2D {
    let verts_x = cols + 1;
    let verts_y = rows + 1;
    let mut mesh = TriangleMesh2D::with_capacity(verts_x * verts_y, cols * rows * 2);

    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f32 / cols.max(1) as f32;
            let v = j as f32 / rows.max(1) as f32;
            mesh.vertices.push(origin + Vec2::new(u * width, v * height));
            mesh.uvs.push(Vec2::new(u, v));
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            let bl = (j * verts_x + i) as u32;
            let br = bl + 1;
            let tl = bl + verts_x as u32;
            let tr = tl + 1;

            mesh.indices.extend_from_slice(&[bl, br, tr]);
            mesh.indices.extend_from_slice(&[bl, tr, tl]);
        }
    }

    mesh
}

/// A strip of `segments` square cells along +X, one cell tall.
///
/// Vertex `2i` is on the bottom edge and `2i + 1` on the top edge at
/// `x = i * length / segments`, so vertices 0 and 1 form the left end.
pub fn cantilever_beam(origin: Vec2, length: f32, segments: usize) -> TriangleMesh2D {
    let segments = segments.max(1);
    let u = length / segments as f32;
    let mut mesh = TriangleMesh2D::with_capacity((segments + 1) * 2, segments * 2);

    for i in 0..=segments {
        mesh.vertices.push(origin + Vec2::new(i as f32 * u, 0.0));
        mesh.vertices.push(origin + Vec2::new(i as f32 * u, u));

        if i != 0 {
            let start = ((i - 1) * 2) as u32;
            mesh.indices.extend_from_slice(&[start, start + 2, start + 1]);
            mesh.indices.extend_from_slice(&[start + 1, start + 2, start + 3]);
        }
    }

    mesh
}

/// An annulus centered at the origin, one ring of quads thick.
///
/// Vertex `2i` lies on the outer circle and `2i + 1` on the inner circle.
pub fn torus(inner: f32, outer: f32, segments: usize) -> TriangleMesh2D {
    let segments = segments.max(3);
    let mut mesh = TriangleMesh2D::with_capacity(segments * 2, segments * 2);

    for i in 0..segments {
        let theta = i as f32 / segments as f32 * TAU;
        let dir = Vec2::new(theta.sin(), theta.cos());

        mesh.vertices.push(dir * outer);
        mesh.vertices.push(dir * inner);

        if i > 0 {
            let b = ((i - 1) * 2) as u32;
            mesh.indices.extend_from_slice(&[b, b + 1, b + 2]);
            mesh.indices.extend_from_slice(&[b + 2, b + 1, b + 3]);
        }
    }

    // Close the ring.
    let b = (mesh.vertices.len() - 2) as u32;
    mesh.indices.extend_from_slice(&[b, b + 1, 0]);
    mesh.indices.extend_from_slice(&[0, b + 1, 1]);

    mesh
}

/// `count` points uniformly distributed in a square of side `scale`
/// centered on `origin`.
pub fn random_points<R: Rng + ?Sized>(origin: Vec2, scale: f32, count: usize, rng: &mut R) -> Vec<Vec2> {
    if scale <= 0.0 {
        return vec![origin; count];
    }
    (0..count)
        .map(|_| {
            let rx = rng.gen_range(-scale..scale) * 0.5;
            let ry = rng.gen_range(-scale..scale) * 0.5;
            origin + Vec2::new(rx, ry)
        })
        .collect()
}

/// Input for the variational mesher: movable seeds plus fixed boundary
/// attraction targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSamples {
    pub interior: Vec<Vec2>,
    pub boundary: Vec<Vec2>,
}

/// Samples a disc for meshing.
///
/// Interior seeds sit on a square lattice of pitch `spacing`, each
/// displaced by up to `jitter * spacing` per axis; seeds within half a
/// pitch outside the rim are kept so the boundary has vertices to claim.
/// Boundary samples are spaced a quarter pitch apart along the rim.
pub fn disc_samples<R: Rng + ?Sized>(
    center: Vec2,
    radius: f32,
    spacing: f32,
    jitter: f32,
    rng: &mut R,
) -> PointSamples {
    let mut samples = PointSamples::default();
    if radius <= 0.0 || spacing <= 0.0 {
        return samples;
    }

    let steps = (radius / spacing).ceil() as i32;
    let reach = radius + 0.5 * spacing;
    let amplitude = jitter.abs() * spacing;

    for j in -steps..=steps {
        for i in -steps..=steps {
            let mut offset = Vec2::new(i as f32, j as f32) * spacing;
            if offset.length() > reach {
                continue;
            }
            if amplitude > 0.0 {
                offset += Vec2::new(
                    rng.gen_range(-amplitude..amplitude),
                    rng.gen_range(-amplitude..amplitude),
                );
            }
            samples.interior.push(center + offset);
        }
    }

    let rim = ((TAU * radius) / (0.25 * spacing)).ceil().max(3.0) as usize;
    for k in 0..rim {
        let theta = k as f32 / rim as f32 * TAU;
        samples
            .boundary
            .push(center + Vec2::new(theta.cos(), theta.sin()) * radius);
    }

    samples
}
