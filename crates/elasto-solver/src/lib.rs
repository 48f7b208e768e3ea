//! # elasto-solver
//!
//! Corotational FEM simulation of a single 2D deformable body.
//!
//! ## Key Types
//!
//! - [`SceneDescription`]: particles, masses and triangles to simulate
//! - [`SolverConfig`]: substeps, external forces, planes, material
//! - [`Simulation`]: the engine; advances by substeps or frames
//! - [`Element`]: per-triangle rest data and plastic strain
//! - [`CollisionPlane`]: static half-plane obstacle
//! - [`FractureEvent`]: a recorded fracture candidate

pub mod collision;
pub mod config;
pub mod element;
pub mod fracture;
pub mod particle;
pub mod scene;
pub mod simulation;

pub use collision::{CollisionPlane, CollisionSummary};
pub use config::{PlaneConfig, SolverConfig};
pub use element::Element;
pub use fracture::{FractureEvent, FracturePlane};
pub use particle::Particle;
pub use scene::SceneDescription;
pub use simulation::{FrameReport, Simulation, SubstepReport};
