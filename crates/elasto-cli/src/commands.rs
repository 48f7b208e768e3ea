//! CLI command implementations.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use elasto_bench::metrics::BenchmarkMetrics;
use elasto_bench::runner::{frame_events, mesher_event, BenchmarkRunner};
use elasto_bench::scenarios::{Scenario, ScenarioKind};
use elasto_material::MaterialDatabase;
use elasto_math::Vec2;
use elasto_mesh::generators::random_points;
use elasto_mesh::{triangulate_delaunay, IterationStats, Topology, TriangleMesh2D, VariationalMesher};
use elasto_solver::{FractureEvent, Particle, SceneDescription, Simulation, SolverConfig};
use elasto_telemetry::{EventBus, EventKind, SimulationEvent, TracingSink};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Arguments of `elasto simulate`.
pub struct SimulateArgs<'a> {
    pub scenario: &'a str,
    pub frames: u32,
    pub config: Option<&'a str>,
    pub material: Option<&'a str>,
    pub seed: u64,
    pub output: Option<&'a str>,
}

/// Final state written by `elasto simulate --output`.
#[derive(Serialize)]
struct SimulationSnapshot<'a> {
    scenario: &'a str,
    time: f32,
    particles: &'a [Particle],
    triangles: &'a [[u32; 3]],
    fractures: &'a [FractureEvent],
}

/// Run one scenario frame by frame.
pub fn simulate(args: &SimulateArgs<'_>) -> CliResult {
    println!("Elasto Simulation");
    println!("─────────────────");

    let kind: ScenarioKind = args.scenario.parse()?;
    let mut scenario = Scenario::from_kind(kind, args.seed)?.with_frames(args.frames);

    if let Some(path) = args.config {
        scenario = scenario.with_config(SolverConfig::load(path)?);
        println!("Config:    {path}");
    }
    if let Some(name) = args.material {
        scenario.config.material = lookup_material(name)?;
        scenario.config.validate()?;
    }

    println!(
        "Scenario:  {} ({} particles, {} triangles)",
        kind,
        scenario.scene.particle_count(),
        scenario.scene.triangle_count()
    );
    println!("Material:  {}", scenario.config.material.name);
    println!(
        "Frames:    {} × {} substeps",
        scenario.frames, scenario.config.substeps
    );
    println!();

    let mut bus = EventBus::new().with_sink(TracingSink::default());
    for stats in &scenario.mesher_stats {
        bus.emit(mesher_event(stats));
    }

    let mut sim = Simulation::new(scenario.scene.clone(), scenario.config.clone())?;
    let mut rng = StdRng::seed_from_u64(scenario.seed);

    let mut fractures = 0;
    let mut max_stress = 0.0f32;

    for frame in 0..scenario.frames {
        bus.emit(SimulationEvent::new(
            frame,
            EventKind::FrameBegin {
                sim_time: sim.time() as f64,
            },
        ));
        let start = std::time::Instant::now();
        let report = sim.step_frame(scenario.frame_dt, &mut rng);
        for event in frame_events(frame, &report, start.elapsed().as_secs_f64()) {
            bus.emit(event);
        }
        bus.flush();

        fractures += report.fracture_count;
        max_stress = max_stress.max(report.max_stress);
    }
    bus.finalize();

    let (min_y, max_y) = sim
        .particles()
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.position.y), hi.max(p.position.y))
        });

    println!("Sim time:       {:.3}s", sim.time());
    println!("Kinetic energy: {:.6e}", sim.kinetic_energy());
    println!("Y range:        [{:.4}, {:.4}]", min_y, max_y);
    println!("Max stress:     {:.1}", max_stress);
    println!("Fractures:      {fractures}");

    if let Some(path) = args.output {
        let snapshot = SimulationSnapshot {
            scenario: kind.name(),
            time: sim.time(),
            particles: sim.particles(),
            triangles: sim.triangles(),
            fractures: sim.fractures(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        println!("State written to: {path}");
    }

    Ok(())
}

/// Mesh `points` random points in the unit square.
pub fn mesh(points: usize, iterations: u32, seed: u64, output: Option<&str>) -> CliResult {
    println!("Elasto Mesher");
    println!("─────────────");

    let mut rng = StdRng::seed_from_u64(seed);
    let interior = random_points(Vec2::ZERO, 1.0, points, &mut rng);

    let mesh = if iterations == 0 {
        triangulate_delaunay(&interior)?
    } else {
        let boundary = square_boundary(1.0, 0.25 / (points.max(1) as f32).sqrt());

        let mut bus = EventBus::new().with_sink(TracingSink::default());
        let sender = bus.sender();
        let mut observer = |stats: &IterationStats| {
            let _ = sender.send(mesher_event(stats));
        };
        let mesh = VariationalMesher::new(iterations).run_observed(&interior, &boundary, &mut observer)?;
        bus.finalize();
        mesh
    };

    report_mesh(&mesh);

    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&mesh)?)?;
        println!("Mesh written to: {path}");
    }

    Ok(())
}

/// Run the scenario suite.
pub fn benchmark(scenario_name: &str, frames: u32, seed: u64, output_path: Option<&str>) -> CliResult {
    println!("Elasto Benchmark Suite");
    println!("══════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![scenario_name.parse()?]
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind, seed)?.with_frames(frames);

        println!(
            "Running: {} ({} particles, {} tris, {} frames)",
            kind.name(),
            scenario.scene.particle_count(),
            scenario.scene.triangle_count(),
            scenario.frames,
        );

        let metrics = BenchmarkRunner::run(&scenario).map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg frame:     {:.3}ms", metrics.avg_frame_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}", metrics.max_displacement);
        println!("  Sag:           {:.4}", metrics.sag);
        println!("  Fractures:     {}", metrics.fracture_count);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// List material presets.
pub fn materials() -> CliResult {
    let db = MaterialDatabase::with_defaults();
    println!(
        "{:<10} {:>9} {:>9} {:>7} {:>9} {:>9} {:>8}",
        "name", "lambda", "mu", "yield", "damping", "tough", "density"
    );
    for name in db.names() {
        if let Some(p) = db.get(name) {
            println!(
                "{:<10} {:>9.1} {:>9.1} {:>7.2} {:>9.1} {:>9.1} {:>8.1}",
                name, p.lame_lambda, p.lame_mu, p.yield_strain, p.damping_mu, p.toughness, p.density
            );
        }
    }
    Ok(())
}

/// Validate a config, scene or mesh file.
pub fn validate(path: &str) -> CliResult {
    println!("Validating: {path}");

    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    match ext {
        "toml" => {
            let config = SolverConfig::load(path)?;
            println!(
                "  Solver config OK: {} substeps, {} planes, material '{}'",
                config.substeps,
                config.planes.len(),
                config.material.name
            );
        }
        "json" => {
            let text = std::fs::read_to_string(path)?;
            if let Ok(scene) = serde_json::from_str::<SceneDescription>(&text) {
                scene.validate()?;
                let pinned = scene.inv_masses.iter().filter(|&&w| w == 0.0).count();
                println!(
                    "  Scene OK: {} particles ({} pinned), {} triangles",
                    scene.particle_count(),
                    pinned,
                    scene.triangle_count()
                );
            } else {
                let mesh: TriangleMesh2D = serde_json::from_str(&text)?;
                mesh.validate()?;
                println!("  Mesh OK");
                report_mesh(&mesh);
            }
        }
        other => {
            return Err(format!("Unsupported file type '.{other}' (expected .toml or .json)").into());
        }
    }

    Ok(())
}

fn lookup_material(name: &str) -> Result<elasto_material::MaterialProperties, Box<dyn std::error::Error>> {
    let db = MaterialDatabase::with_defaults();
    let props = db.get(name).ok_or_else(|| {
        format!(
            "Unknown material: '{name}'. Available: {}",
            db.names().join(", ")
        )
    })?;
    Ok(props.clone())
}

fn report_mesh(mesh: &TriangleMesh2D) {
    let topology = Topology::build(mesh);
    println!("  Vertices:       {}", mesh.vertex_count());
    println!("  Triangles:      {}", mesh.triangle_count());
    println!("  Area:           {:.4}", mesh.total_area());
    println!("  Boundary edges: {}", topology.boundary_edge_count());
    println!("  Manifold:       {}", topology.is_manifold());
}

/// Samples along the boundary of a square of side `size` centered on the
/// origin, `spacing` apart.
fn square_boundary(size: f32, spacing: f32) -> Vec<Vec2> {
    let half = 0.5 * size;
    let per_side = (size / spacing.max(1e-3)).ceil().max(1.0) as usize;
    let corners = [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ];

    let mut samples = Vec::with_capacity(per_side * 4);
    for side in 0..4 {
        let a = corners[side];
        let b = corners[(side + 1) % 4];
        for k in 0..per_side {
            samples.push(a.lerp(b, k as f32 / per_side as f32));
        }
    }
    samples
}
