//! Elasto CLI: simulation, meshing, benchmarking and validation.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "elasto")]
#[command(version, about = "Elasto, a 2D corotational FEM deformable-body engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and report what happened.
    Simulate {
        /// Scenario to run (beam, convex, torus, blob).
        #[arg(short, long, default_value = "beam")]
        scenario: String,

        /// Number of frames at 60fps.
        #[arg(short, long, default_value_t = 120)]
        frames: u32,

        /// Solver config (TOML) replacing the scenario preset.
        #[arg(short, long)]
        config: Option<String>,

        /// Material preset replacing the configured material.
        #[arg(short, long)]
        material: Option<String>,

        /// Seed for mesh generation and fracture vertex choice.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Write the final particle state as JSON.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Mesh random points with the Delaunay or variational mesher.
    Mesh {
        /// Number of points.
        #[arg(short, long, default_value_t = 64)]
        points: usize,

        /// Variational relaxation passes (0 = plain Delaunay).
        #[arg(short, long, default_value_t = 7)]
        iterations: u32,

        /// Seed for point generation.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Write the mesh as JSON.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run the scenario suite.
    Benchmark {
        /// Which scenario to run (beam, convex, torus, blob, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Frames per scenario.
        #[arg(short, long, default_value_t = 120)]
        frames: u32,

        /// Seed for generated scenarios.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the material presets.
    Materials,

    /// Validate a solver config (.toml), scene or mesh (.json).
    Validate {
        /// Path to the file.
        path: String,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            scenario,
            frames,
            config,
            material,
            seed,
            output,
        } => commands::simulate(&commands::SimulateArgs {
            scenario: &scenario,
            frames,
            config: config.as_deref(),
            material: material.as_deref(),
            seed,
            output: output.as_deref(),
        }),
        Commands::Mesh {
            points,
            iterations,
            seed,
            output,
        } => commands::mesh(points, iterations, seed, output.as_deref()),
        Commands::Benchmark {
            scenario,
            frames,
            seed,
            output,
        } => commands::benchmark(&scenario, frames, seed, output.as_deref()),
        Commands::Materials => commands::materials(),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
