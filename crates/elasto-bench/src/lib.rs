//! # elasto-bench
//!
//! Scenario suite for the elasto engine.
//!
//! Provides the four demo scenarios (beam, convex, torus, blob), a runner
//! that steps them while collecting metrics and telemetry, and CSV export
//! for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
