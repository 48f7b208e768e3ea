//! Integration tests for elasto-bench.

use elasto_bench::metrics::BenchmarkMetrics;
use elasto_bench::runner::{frame_events, BenchmarkRunner};
use elasto_bench::scenarios::{Scenario, ScenarioKind};
use elasto_mesh::Topology;
use elasto_mesh::TriangleMesh2D;
use elasto_solver::FrameReport;
use elasto_telemetry::{EventBus, EventKind, VecSink};

fn sample_metrics(name: &str) -> BenchmarkMetrics {
    BenchmarkMetrics {
        scenario: name.into(),
        particle_count: 12,
        triangle_count: 10,
        frames: 100,
        substeps: 40,
        total_wall_time: 1.5,
        avg_frame_time: 0.015,
        min_frame_time: 0.01,
        max_frame_time: 0.02,
        final_kinetic_energy: 1e-5,
        max_displacement: 0.5,
        sag: 0.1,
        fracture_count: 3,
        max_stress: 8100.0,
        contact_count: 44,
    }
}

fn to_mesh(scenario: &Scenario) -> TriangleMesh2D {
    TriangleMesh2D::new(
        scenario.scene.positions.clone(),
        scenario.scene.triangles.iter().flatten().copied().collect(),
    )
}

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn beam_setup() {
    let s = Scenario::beam();
    assert_eq!(s.kind, ScenarioKind::Beam);
    assert_eq!(s.scene.particle_count(), 12); // 6 columns × 2
    assert_eq!(s.scene.triangle_count(), 10);
    assert_eq!(s.scene.inv_masses[0], 0.0);
    assert_eq!(s.scene.inv_masses[1], 0.0);
    let pinned = s.scene.inv_masses.iter().filter(|&&w| w == 0.0).count();
    assert_eq!(pinned, 2);
    assert_eq!(s.config.substeps, 40);
    assert_eq!(s.config.planes.len(), 3);
    assert!(s.scene.validate().is_ok());
}

#[test]
fn torus_setup() {
    let s = Scenario::torus();
    assert_eq!(s.scene.particle_count(), 24);
    assert!(s.scene.inv_masses.iter().all(|&w| w == 1.0));
    assert!(s.scene.validate().is_ok());

    let topo = Topology::build(&to_mesh(&s));
    assert!(topo.is_manifold());
    assert_eq!(topo.boundary_edge_count(), 24);
}

#[test]
fn convex_is_seeded() {
    let a = Scenario::convex(3).unwrap();
    let b = Scenario::convex(3).unwrap();
    assert_eq!(a.scene, b.scene);
    assert_eq!(a.scene.particle_count(), 10);
    assert!(a.scene.triangle_count() > 0);
    assert!(a.scene.validate().is_ok());
}

#[test]
fn blob_uses_area_masses() {
    let s = Scenario::blob(1).unwrap();
    assert_eq!(s.mesher_stats.len(), 7);
    assert!(s.scene.triangle_count() > 20);
    assert!(s.scene.validate().is_ok());
    assert_eq!(s.config.substeps, 80);

    // Total mass ≈ density × meshed area.
    let total_mass: f32 = s
        .scene
        .inv_masses
        .iter()
        .filter(|&&w| w > 0.0)
        .map(|&w| 1.0 / w)
        .sum();
    let area = to_mesh(&s).total_area();
    assert!((total_mass - 140.0 * area).abs() < 1e-2 * total_mass);
}

#[test]
fn all_scenarios() {
    assert_eq!(ScenarioKind::all().len(), 4);
    for &kind in ScenarioKind::all() {
        assert_eq!(kind.name().parse::<ScenarioKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.name());
    }
    assert!("image".parse::<ScenarioKind>().is_err());
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn run_beam() {
    let scenario = Scenario::beam().with_frames(10);
    let metrics = BenchmarkRunner::run(&scenario).unwrap();

    assert_eq!(metrics.scenario, "beam");
    assert_eq!(metrics.frames, 10);
    assert_eq!(metrics.substeps, 40);
    assert!(metrics.total_wall_time > 0.0);
    assert!(metrics.max_displacement > 0.0);
    assert!(metrics.sag > 0.0);
    assert!(metrics.final_kinetic_energy.is_finite());
}

#[test]
fn run_all_scenarios() {
    let results = BenchmarkRunner::run_all(3, 11).unwrap();
    assert_eq!(results.len(), 4);
    for (metrics, kind) in results.iter().zip(ScenarioKind::all()) {
        assert_eq!(metrics.scenario, kind.name());
        assert_eq!(metrics.frames, 3);
        assert!(metrics.total_wall_time >= 0.0);
        assert!(metrics.max_displacement.is_finite());
    }
}

#[test]
fn free_body_reaches_floor() {
    let scenario = Scenario::torus().with_frames(90);
    let metrics = BenchmarkRunner::run(&scenario).unwrap();
    assert!(metrics.contact_count > 0);
    assert!(metrics.sag > 1.0);
}

#[test]
fn runner_emits_frame_events() {
    let sink = VecSink::new();
    let mut bus = EventBus::new().with_sink(sink.clone());
    let scenario = Scenario::beam().with_frames(4);

    BenchmarkRunner::run_with_bus(&scenario, &mut bus).unwrap();

    let events = sink.events();
    let ends = events.iter().filter(|e| e.label() == "frame_end").count();
    let begins = events.iter().filter(|e| e.label() == "frame_begin").count();
    assert_eq!(ends, 4);
    assert_eq!(begins, 4);
    assert_eq!(events.last().map(|e| e.frame), Some(3));
}

#[test]
fn blob_run_reports_mesher_passes() {
    let sink = VecSink::new();
    let mut bus = EventBus::new().with_sink(sink.clone());
    let scenario = Scenario::blob(2).unwrap().with_frames(1);

    BenchmarkRunner::run_with_bus(&scenario, &mut bus).unwrap();

    let passes = sink
        .events()
        .iter()
        .filter(|e| matches!(e.kind, EventKind::MesherIteration { .. }))
        .count();
    assert_eq!(passes, 7);
}

#[test]
fn quiet_frame_has_only_energy_and_end() {
    let report = FrameReport {
        substeps: 40,
        duration: 1.0 / 60.0,
        kinetic_energy: 0.25,
        ..Default::default()
    };
    let events = frame_events(5, &report, 0.002);
    let labels: Vec<&str> = events.iter().map(|e| e.label()).collect();
    assert_eq!(labels, vec!["energy", "frame_end"]);

    let report = FrameReport {
        fracture_count: 2,
        contact_count: 1,
        ..report
    };
    let labels: Vec<String> = frame_events(5, &report, 0.002)
        .iter()
        .map(|e| e.label().to_string())
        .collect();
    assert_eq!(labels, vec!["fracture", "contact", "energy", "frame_end"]);
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn metrics_csv_output() {
    let csv_row = sample_metrics("test").to_csv_row();
    assert!(csv_row.starts_with("test,12,10,100,40,"));
    assert!(csv_row.ends_with(",44"));
    assert_eq!(
        csv_row.split(',').count(),
        BenchmarkMetrics::to_csv_header().split(',').count()
    );
}

#[test]
fn metrics_csv_multi() {
    let csv = BenchmarkMetrics::to_csv(&[sample_metrics("a"), sample_metrics("b")]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3); // Header + 2 data rows
    assert!(lines[0].starts_with("scenario"));
    assert!(lines[2].starts_with("b,"));
}

#[test]
fn metrics_json_round_trip() {
    let metrics = sample_metrics("test");
    let json = serde_json::to_string(&metrics).unwrap();
    let recovered: BenchmarkMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, metrics);
}
