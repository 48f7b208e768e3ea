//! # elasto-mesh
//!
//! Mesh generation for the elasto engine.
//!
//! ## Key Types
//!
//! - [`DelaunayTriangulation`]: Incremental Bowyer–Watson triangulator
//!   with cached circumcircles.
//! - [`VariationalMesher`]: Circumcenter relaxation that improves element
//!   quality and snaps the hull to boundary samples.
//! - [`TriangleMesh2D`]: Flat vertex/index result handed to the solver.
//! - [`Topology`]: Adjacency queries (vertex fans, edges, boundary).
//! - Procedural generators for scenario meshes and point sets.

pub mod delaunay;
pub mod generators;
pub mod mesh;
pub mod topology;
pub mod variational;

pub use delaunay::{triangulate_delaunay, DelaunayTriangle, DelaunayTriangulation, Edge};
pub use mesh::TriangleMesh2D;
pub use topology::Topology;
pub use variational::{
    triangulate_variational, IterationStats, MesherObserver, VariationalMesher,
};
