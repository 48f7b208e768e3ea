//! Material database with presets for the built-in scenes.
//!
//! Each preset matches the parameters of one scene family: a welded
//! cantilever beam, random convex blobs and rings, and meshed shapes.

use std::collections::HashMap;

use crate::properties::MaterialProperties;

/// A named collection of material presets.
///
/// Materials are looked up by name (e.g., "beam", "torus").
/// Custom materials can be registered at runtime.
#[derive(Debug, Clone)]
pub struct MaterialDatabase {
    materials: HashMap<String, MaterialProperties>,
}

impl MaterialDatabase {
    /// Creates a new database with the built-in presets.
    pub fn with_defaults() -> Self {
        let mut db = Self::empty();

        db.register(MaterialProperties::default());
        db.register(beam());
        db.register(convex());
        db.register(torus());
        db.register(shape());

        db
    }

    /// Creates an empty database.
    pub fn empty() -> Self {
        Self {
            materials: HashMap::new(),
        }
    }

    /// Registers a material. Overwrites if the name already exists.
    pub fn register(&mut self, props: MaterialProperties) {
        self.materials.insert(props.name.clone(), props);
    }

    /// Looks up a material by name. Returns `None` if not found.
    pub fn get(&self, name: &str) -> Option<&MaterialProperties> {
        self.materials.get(name)
    }

    /// Returns all registered material names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns true if the database is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialDatabase {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── Built-in Presets ─────────────────────────────────────────────────

/// Moderately stiff beam, heavily damped so it settles into a sag.
pub fn beam() -> MaterialProperties {
    MaterialProperties {
        name: "beam".into(),
        ..MaterialProperties::default()
    }
    .with_stiffness(4000.0)
    .with_damping(200.0)
    .with_toughness(8000.0)
}

/// Stiff, lightly damped blob for random convex point clouds.
pub fn convex() -> MaterialProperties {
    MaterialProperties {
        name: "convex".into(),
        ..MaterialProperties::default()
    }
    .with_stiffness(10000.0)
    .with_damping(80.0)
    .with_toughness(20000.0)
}

/// Same response as [`convex`], registered separately so rings can be tuned.
pub fn torus() -> MaterialProperties {
    MaterialProperties {
        name: "torus".into(),
        ..convex()
    }
}

/// Very stiff material for meshed shapes with area-lumped masses.
pub fn shape() -> MaterialProperties {
    MaterialProperties {
        name: "shape".into(),
        density: 140.0,
        ..MaterialProperties::default()
    }
    .with_stiffness(42000.0)
    .with_damping(250.0)
    .with_toughness(40000.0)
}
