//! Integration tests for elasto-mesh: mesh type, generators, topology.

use elasto_math::Vec2;
use elasto_mesh::generators::{cantilever_beam, disc_samples, quad_grid, random_points, torus};
use elasto_mesh::topology::Topology;
use elasto_mesh::TriangleMesh2D;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ─── TriangleMesh2D Tests ─────────────────────────────────────

fn make_single_triangle() -> TriangleMesh2D {
    TriangleMesh2D::new(
        vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
        vec![0, 1, 2],
    )
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn position_and_triangle_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.position(1), Vec2::new(1.0, 0.0));
    assert_eq!(mesh.triangle(0), [0, 1, 2]);
    assert_eq!(mesh.triangles().count(), 1);
}

#[test]
fn area_and_centroid() {
    let mesh = make_single_triangle();
    assert!((mesh.signed_area(0) - 0.5).abs() < 1e-6);
    assert!((mesh.total_area() - 0.5).abs() < 1e-6);
    let c = mesh.centroid(0);
    assert!((c - Vec2::splat(1.0 / 3.0)).length() < 1e-6);
}

#[test]
fn validate_ok() {
    let mesh = make_single_triangle();
    assert!(mesh.validate().is_ok());
}

#[test]
fn validate_catches_uv_mismatch() {
    let mut mesh = make_single_triangle();
    mesh.uvs.push(Vec2::ZERO);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_repeated_index() {
    let mut mesh = make_single_triangle();
    mesh.indices = vec![0, 0, 1];
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_clockwise() {
    let mut mesh = make_single_triangle();
    mesh.indices = vec![0, 2, 1];
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_partial_triangle() {
    let mut mesh = make_single_triangle();
    mesh.indices.push(0);
    assert!(mesh.validate().is_err());
}

#[test]
fn retain_triangles_by_centroid() {
    let mut mesh = quad_grid(Vec2::ZERO, 2, 1, 2.0, 1.0);
    let removed = mesh.retain_triangles(|c| c.x < 1.0);
    assert_eq!(removed, 2);
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.vertex_count(), 6);
    assert!(mesh.validate().is_ok());
}

#[test]
fn mesh_serde_roundtrip() {
    let mesh = quad_grid(Vec2::ZERO, 1, 1, 1.0, 1.0);
    let json = serde_json::to_string(&mesh).unwrap();
    let back: TriangleMesh2D = serde_json::from_str(&json).unwrap();
    assert_eq!(mesh, back);
}

#[test]
fn mesh_deserializes_without_uvs() {
    let json = r#"{"vertices":[[0,0],[1,0],[0,1]],"indices":[0,1,2]}"#;
    let mesh: TriangleMesh2D = serde_json::from_str(json).unwrap();
    assert!(mesh.uvs.is_empty());
    assert!(mesh.validate().is_ok());
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn quad_grid_2x2() {
    let mesh = quad_grid(Vec2::ZERO, 2, 2, 1.0, 1.0);
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.triangle_count(), 8);
    assert!(mesh.validate().is_ok());
    assert!((mesh.total_area() - 1.0).abs() < 1e-5);
}

#[test]
fn quad_grid_20x20() {
    let mesh = quad_grid(Vec2::new(-1.0, -1.0), 20, 20, 2.0, 2.0);
    assert_eq!(mesh.vertex_count(), 441);
    assert_eq!(mesh.triangle_count(), 800);
    assert!(mesh.validate().is_ok());
}

#[test]
fn quad_grid_layout_is_bottom_up() {
    let mesh = quad_grid(Vec2::new(1.0, 2.0), 2, 1, 4.0, 1.0);
    assert_eq!(mesh.position(0), Vec2::new(1.0, 2.0));
    assert_eq!(mesh.position(2), Vec2::new(5.0, 2.0));
    assert_eq!(mesh.position(3), Vec2::new(1.0, 3.0));
    assert_eq!(mesh.uvs[5], Vec2::new(1.0, 1.0));
}

#[test]
fn cantilever_beam_layout() {
    let mesh = cantilever_beam(Vec2::ZERO, 4.0, 4);
    assert_eq!(mesh.vertex_count(), 10);
    assert_eq!(mesh.triangle_count(), 8);
    assert!(mesh.validate().is_ok());
    assert_eq!(mesh.position(0), Vec2::new(0.0, 0.0));
    assert_eq!(mesh.position(1), Vec2::new(0.0, 1.0));
    assert!((mesh.total_area() - 4.0).abs() < 1e-5);
}

#[test]
fn torus_is_ccw_ring() {
    let mesh = torus(0.5, 1.0, 16);
    assert_eq!(mesh.vertex_count(), 32);
    assert_eq!(mesh.triangle_count(), 32);
    assert!(mesh.validate().is_ok());

    let topo = Topology::build(&mesh);
    // Inner and outer loops.
    assert_eq!(topo.boundary_edge_count(), 32);
    assert!(topo.is_manifold());
}

#[test]
fn random_points_stay_in_square() {
    let mut rng = StdRng::seed_from_u64(7);
    let origin = Vec2::new(3.0, -1.0);
    let points = random_points(origin, 2.0, 64, &mut rng);
    assert_eq!(points.len(), 64);
    for p in points {
        assert!((p.x - origin.x).abs() <= 1.0);
        assert!((p.y - origin.y).abs() <= 1.0);
    }
}

#[test]
fn random_points_are_seed_deterministic() {
    let a = random_points(Vec2::ZERO, 1.0, 10, &mut StdRng::seed_from_u64(3));
    let b = random_points(Vec2::ZERO, 1.0, 10, &mut StdRng::seed_from_u64(3));
    assert_eq!(a, b);
}

#[test]
fn disc_samples_cover_disc() {
    let mut rng = StdRng::seed_from_u64(11);
    let center = Vec2::new(0.5, 0.5);
    let samples = disc_samples(center, 1.0, 0.2, 0.1, &mut rng);

    assert!(!samples.interior.is_empty());
    assert!(samples.boundary.len() >= 3);
    for p in &samples.boundary {
        assert!(((*p - center).length() - 1.0).abs() < 1e-5);
    }
    for p in &samples.interior {
        assert!((*p - center).length() < 1.0 + 0.1 + 0.2 * 0.2);
    }
}

#[test]
fn disc_samples_degenerate_input_is_empty() {
    let mut rng = StdRng::seed_from_u64(0);
    let samples = disc_samples(Vec2::ZERO, 0.0, 0.1, 0.0, &mut rng);
    assert!(samples.interior.is_empty());
    assert!(samples.boundary.is_empty());
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn topology_single_quad() {
    let mesh = quad_grid(Vec2::ZERO, 1, 1, 1.0, 1.0);
    let topo = Topology::build(&mesh);
    assert_eq!(topo.edges.len(), 5);
    assert_eq!(topo.boundary_edge_count(), 4);
    assert!(topo.is_manifold());
    assert!(topo.isolated_vertices().is_empty());
}

#[test]
fn vertex_triangle_adjacency() {
    let mesh = quad_grid(Vec2::ZERO, 2, 2, 1.0, 1.0);
    let topo = Topology::build(&mesh);
    let center = 4;
    assert_eq!(topo.vertex_triangles[center].len(), 6);
}

#[test]
fn one_ring() {
    let mesh = quad_grid(Vec2::ZERO, 2, 2, 1.0, 1.0);
    let topo = Topology::build(&mesh);
    let ring = topo.one_ring(4, &mesh);
    assert_eq!(ring.len(), 6);
    assert!(!ring.contains(&4));
}

#[test]
fn boundary_vertices_of_grid() {
    let mesh = quad_grid(Vec2::ZERO, 2, 2, 1.0, 1.0);
    let topo = Topology::build(&mesh);
    let boundary = topo.boundary_vertices();
    assert_eq!(boundary.len(), 8);
    assert!(!boundary.contains(&4));
}

#[test]
fn isolated_vertex_detected() {
    let mut mesh = make_single_triangle();
    mesh.vertices.push(Vec2::new(5.0, 5.0));
    let topo = Topology::build(&mesh);
    assert_eq!(topo.isolated_vertices(), vec![3]);
}
