//! Benchmark metrics: data collected during a scenario run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Particle count.
    pub particle_count: usize,
    /// Triangle count.
    pub triangle_count: usize,
    /// Frames simulated.
    pub frames: u32,
    /// Substeps per frame.
    pub substeps: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per frame (seconds).
    pub avg_frame_time: f64,
    /// Fastest frame.
    pub min_frame_time: f64,
    /// Slowest frame.
    pub max_frame_time: f64,
    /// Kinetic energy after the last frame.
    pub final_kinetic_energy: f64,
    /// Largest particle displacement from its rest position.
    pub max_displacement: f32,
    /// Drop of the mean height of movable particles.
    pub sag: f32,
    /// Fracture candidates over the whole run.
    pub fracture_count: u32,
    /// Largest principal stress seen.
    pub max_stress: f32,
    /// Plane contacts resolved over the whole run.
    pub contact_count: u32,
}

impl BenchmarkMetrics {
    /// CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,particle_count,triangle_count,frames,substeps,total_wall_time_s,avg_frame_ms,min_frame_ms,max_frame_ms,final_ke,max_displacement,sag,fractures,max_stress,contacts".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6},{:.6},{},{:.1},{}",
            self.scenario,
            self.particle_count,
            self.triangle_count,
            self.frames,
            self.substeps,
            self.total_wall_time,
            self.avg_frame_time * 1000.0,
            self.min_frame_time * 1000.0,
            self.max_frame_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.sag,
            self.fracture_count,
            self.max_stress,
            self.contact_count,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
