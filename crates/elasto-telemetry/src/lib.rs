//! # elasto-telemetry
//!
//! Event bus for simulation telemetry. Emits structured events
//! (substep timing, fractures, contacts, mesher progress, energy) that
//! are consumed by pluggable sinks.
//!
//! This crate knows nothing about the engine itself. Producers convert
//! their reports into [`EventKind`] values and emit them.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
