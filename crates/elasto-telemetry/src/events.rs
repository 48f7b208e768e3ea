//! Simulation event types.
//!
//! Structured events emitted while meshing and simulating. Events are
//! lightweight value types that carry just enough data to be useful for
//! monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A simulation event.
///
/// Events are tagged with the frame they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub frame: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame started.
    FrameBegin {
        /// Simulated time at the start of the frame (seconds).
        sim_time: f64,
    },

    /// Frame completed.
    FrameEnd {
        /// Substeps taken.
        substeps: u32,
        /// Wall-clock time for the frame (seconds).
        wall_time: f64,
    },

    /// Elements exceeded the material toughness.
    Fracture {
        /// Fracture candidates recorded during the frame.
        count: u32,
        /// Largest principal stress seen.
        max_stress: f32,
    },

    /// Elements flowed plastically.
    Yield {
        /// Yielded element-substeps during the frame.
        count: u32,
    },

    /// Plane contacts resolved.
    Contact {
        /// Particle/plane pairs in penetration.
        contact_count: u32,
        /// Deepest penetration (world units).
        max_penetration: f32,
    },

    /// One variational mesher pass completed.
    MesherIteration {
        /// Pass number (0-indexed).
        iteration: u32,
        /// Vertices in the triangulation.
        vertex_count: u32,
        /// Triangles produced.
        triangle_count: u32,
    },

    /// Energy snapshot at the end of the frame.
    Energy {
        /// Kinetic energy (0.5 * m * v^2).
        kinetic: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: u32, kind: EventKind) -> Self {
        Self { frame, kind }
    }

    /// Creates a [`EventKind::Custom`] event with a JSON payload.
    pub fn custom<T: Serialize>(frame: u32, label: &str, payload: &T) -> serde_json::Result<Self> {
        Ok(Self::new(
            frame,
            EventKind::Custom {
                label: label.to_string(),
                payload: serde_json::to_string(payload)?,
            },
        ))
    }

    /// Short name of the payload variant.
    pub fn label(&self) -> &str {
        match &self.kind {
            EventKind::FrameBegin { .. } => "frame_begin",
            EventKind::FrameEnd { .. } => "frame_end",
            EventKind::Fracture { .. } => "fracture",
            EventKind::Yield { .. } => "yield",
            EventKind::Contact { .. } => "contact",
            EventKind::MesherIteration { .. } => "mesher_iteration",
            EventKind::Energy { .. } => "energy",
            EventKind::Custom { label, .. } => label,
        }
    }
}
