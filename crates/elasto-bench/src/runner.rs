//! Benchmark runner: steps scenarios and collects metrics.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use elasto_math::Vec2;
use elasto_mesh::IterationStats;
use elasto_solver::{FrameReport, Simulation};
use elasto_telemetry::{EventBus, EventKind, SimulationEvent};
use elasto_types::ElastoResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario.
    pub fn run(scenario: &Scenario) -> ElastoResult<BenchmarkMetrics> {
        let mut bus = EventBus::new();
        bus.set_enabled(false);
        Self::run_with_bus(scenario, &mut bus)
    }

    /// Run a single scenario, emitting per-frame telemetry on `bus`.
    ///
    /// The bus is flushed after every frame.
    pub fn run_with_bus(scenario: &Scenario, bus: &mut EventBus) -> ElastoResult<BenchmarkMetrics> {
        for stats in &scenario.mesher_stats {
            bus.emit(mesher_event(stats));
        }
        bus.flush();

        let mut sim = Simulation::new(scenario.scene.clone(), scenario.config.clone())?;
        let mut rng = StdRng::seed_from_u64(scenario.seed);

        let rest: Vec<Vec2> = scenario.scene.positions.clone();
        let initial_height = mean_movable_height(&sim);

        let mut frame_times: Vec<f64> = Vec::with_capacity(scenario.frames as usize);
        let mut fracture_count = 0;
        let mut contact_count = 0;
        let mut max_stress = 0.0f32;

        let total_start = Instant::now();

        for frame in 0..scenario.frames {
            bus.emit(SimulationEvent::new(
                frame,
                EventKind::FrameBegin {
                    sim_time: sim.time() as f64,
                },
            ));

            let start = Instant::now();
            let report = sim.step_frame(scenario.frame_dt, &mut rng);
            let wall_time = start.elapsed().as_secs_f64();
            frame_times.push(wall_time);

            fracture_count += report.fracture_count;
            contact_count += report.contact_count;
            max_stress = max_stress.max(report.max_stress);

            for event in frame_events(frame, &report, wall_time) {
                bus.emit(event);
            }
            bus.flush();
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();

        let max_displacement = sim
            .particles()
            .iter()
            .zip(&rest)
            .map(|(p, &r)| p.position.distance(r))
            .fold(0.0f32, f32::max);

        let avg_frame = if frame_times.is_empty() {
            0.0
        } else {
            frame_times.iter().sum::<f64>() / frame_times.len() as f64
        };
        let min_frame = frame_times.iter().copied().fold(f64::MAX, f64::min);
        let max_frame = frame_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            particle_count: sim.particles().len(),
            triangle_count: sim.triangles().len(),
            frames: scenario.frames,
            substeps: scenario.config.substeps,
            total_wall_time,
            avg_frame_time: avg_frame,
            min_frame_time: if frame_times.is_empty() { 0.0 } else { min_frame },
            max_frame_time: max_frame,
            final_kinetic_energy: sim.kinetic_energy() as f64,
            max_displacement,
            sag: initial_height - mean_movable_height(&sim),
            fracture_count,
            max_stress,
            contact_count,
        };

        info!(
            scenario = %metrics.scenario,
            frames = metrics.frames,
            wall_time = metrics.total_wall_time,
            fractures = metrics.fracture_count,
            "Scenario finished"
        );

        Ok(metrics)
    }

    /// Run every scenario for `frames` frames.
    pub fn run_all(frames: u32, seed: u64) -> ElastoResult<Vec<BenchmarkMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind, seed)?.with_frames(frames);
            results.push(Self::run(&scenario)?);
        }
        Ok(results)
    }
}

/// Telemetry events describing one completed frame.
///
/// Fracture, yield and contact events are only produced when the frame
/// had any.
pub fn frame_events(frame: u32, report: &FrameReport, wall_time: f64) -> Vec<SimulationEvent> {
    let mut events = Vec::with_capacity(5);

    if report.fracture_count > 0 {
        events.push(SimulationEvent::new(
            frame,
            EventKind::Fracture {
                count: report.fracture_count,
                max_stress: report.max_stress,
            },
        ));
    }
    if report.yielded_count > 0 {
        events.push(SimulationEvent::new(
            frame,
            EventKind::Yield {
                count: report.yielded_count,
            },
        ));
    }
    if report.contact_count > 0 {
        events.push(SimulationEvent::new(
            frame,
            EventKind::Contact {
                contact_count: report.contact_count,
                max_penetration: report.max_penetration,
            },
        ));
    }

    events.push(SimulationEvent::new(
        frame,
        EventKind::Energy {
            kinetic: report.kinetic_energy as f64,
        },
    ));
    events.push(SimulationEvent::new(
        frame,
        EventKind::FrameEnd {
            substeps: report.substeps,
            wall_time,
        },
    ));

    events
}

/// Telemetry event for one variational mesher pass.
pub fn mesher_event(stats: &IterationStats) -> SimulationEvent {
    SimulationEvent::new(
        0,
        EventKind::MesherIteration {
            iteration: stats.iteration,
            vertex_count: stats.vertex_count as u32,
            triangle_count: stats.triangle_count as u32,
        },
    )
}

fn mean_movable_height(sim: &Simulation) -> f32 {
    let (sum, count) = sim
        .particles()
        .iter()
        .filter(|p| !p.is_pinned())
        .fold((0.0f32, 0usize), |(s, n), p| (s + p.position.y, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}
