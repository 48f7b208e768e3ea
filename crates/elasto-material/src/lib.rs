//! # elasto-material
//!
//! Material parameters and the constitutive model.
//!
//! ## Design
//!
//! The [`ConstitutiveModel`] trait maps an element's deformation gradient
//! (and its rate) to stress. [`CorotationalModel`] is the implementation
//! used by the simulation: rotation-free small-strain elasticity with
//! creep plasticity and viscous damping.
//!
//! The [`MaterialDatabase`] stores named presets matching the built-in
//! scene families.

pub mod corotational;
pub mod database;
pub mod properties;
pub mod traits;

pub use corotational::CorotationalModel;
pub use database::MaterialDatabase;
pub use properties::MaterialProperties;
pub use traits::{ConstitutiveModel, StressState};
