//! Solver configuration.
//!
//! Everything the engine reads besides the scene itself: substep count,
//! external forces, contact response, collision planes and the material.
//! Configs load from TOML; missing keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use elasto_material::{database, MaterialProperties};
use elasto_math::Vec2;
use elasto_types::constants::GRAVITY;
use elasto_types::{ElastoError, ElastoResult};

/// Serialized form of a collision plane, `normal·p + offset = 0`.
///
/// The normal need not be unit length; it is normalized when the
/// simulation is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneConfig {
    pub normal: Vec2,
    pub offset: f32,
}

impl PlaneConfig {
    pub fn new(normal: Vec2, offset: f32) -> Self {
        Self { normal, offset }
    }
}

/// Configuration for the simulation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Substeps per frame; each frame advances by `frame / substeps`.
    pub substeps: u32,

    /// Gravitational acceleration.
    pub gravity: Vec2,

    /// Velocity drag coefficient. Only pinned particles receive the
    /// drag force.
    pub drag: f32,

    /// Tangential velocity factor applied on contact (1 = frictionless).
    pub friction: f32,

    /// Static collision half-planes.
    pub planes: Vec<PlaneConfig>,

    /// Material parameters shared by every element.
    pub material: MaterialProperties,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            substeps: 1,
            gravity: Vec2::new(0.0, -GRAVITY),
            drag: 0.0,
            friction: 0.5,
            planes: Vec::new(),
            material: MaterialProperties::default(),
        }
    }
}

impl SolverConfig {
    /// Welded cantilever beam.
    pub fn beam() -> Self {
        Self {
            substeps: 40,
            drag: 1.0,
            friction: 0.5,
            material: database::beam(),
            ..Default::default()
        }
    }

    /// Random convex blob.
    pub fn convex() -> Self {
        Self {
            substeps: 40,
            drag: 1.0,
            friction: 0.95,
            material: database::convex(),
            ..Default::default()
        }
    }

    /// Ring.
    pub fn torus() -> Self {
        Self {
            material: database::torus(),
            ..Self::convex()
        }
    }

    /// Meshed shape with area-lumped masses.
    pub fn shape() -> Self {
        Self {
            substeps: 80,
            drag: 0.1,
            friction: 0.8,
            material: database::shape(),
            ..Default::default()
        }
    }

    /// Adds the demo box: a floor at `y = -1.8` and walls at `x = ±2.8`.
    pub fn with_demo_planes(mut self) -> Self {
        self.planes = demo_planes();
        self
    }

    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> ElastoResult<Self> {
        toml::from_str(s).map_err(|e| ElastoError::Serialization(e.to_string()))
    }

    /// Serializes to a TOML document.
    pub fn to_toml_string(&self) -> ElastoResult<String> {
        toml::to_string(self).map_err(|e| ElastoError::Serialization(e.to_string()))
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ElastoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> ElastoResult<()> {
        if self.substeps == 0 {
            return Err(ElastoError::InvalidConfig(
                "substeps must be >= 1".into(),
            ));
        }
        if !self.gravity.is_finite() {
            return Err(ElastoError::InvalidConfig(
                "gravity must be finite".into(),
            ));
        }
        if !self.drag.is_finite() || self.drag < 0.0 {
            return Err(ElastoError::InvalidConfig(format!(
                "drag must be non-negative, got {}",
                self.drag
            )));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ElastoError::InvalidConfig(format!(
                "friction must be in [0, 1], got {}",
                self.friction
            )));
        }
        for (i, plane) in self.planes.iter().enumerate() {
            if !plane.normal.is_finite() || plane.normal.length_squared() == 0.0 {
                return Err(ElastoError::InvalidConfig(format!(
                    "plane {} has a degenerate normal {:?}",
                    i, plane.normal
                )));
            }
            if !plane.offset.is_finite() {
                return Err(ElastoError::InvalidConfig(format!(
                    "plane {} offset must be finite",
                    i
                )));
            }
        }
        self.material.validate()
    }
}

/// Floor plus left and right walls of the demo scene.
pub fn demo_planes() -> Vec<PlaneConfig> {
    vec![
        PlaneConfig::new(Vec2::new(0.0, 1.0), 1.8),
        PlaneConfig::new(Vec2::new(1.0, 0.0), 2.8),
        PlaneConfig::new(Vec2::new(-1.0, 0.0), 2.8),
    ]
}
