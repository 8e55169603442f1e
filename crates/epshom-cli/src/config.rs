//! TOML configuration deserialisation for homogenisation jobs.

use serde::Deserialize;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub mesh: MeshConfig,
    pub material: MaterialConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Mesh source location.
#[derive(Debug, Deserialize)]
pub struct MeshConfig {
    /// Path to the JSON mesh container.
    pub path: String,
}

/// The two phase permittivities.
#[derive(Debug, Deserialize)]
pub struct MaterialConfig {
    /// Permittivity of the inclusion phase (subdomain tag 1).
    pub inner_permittivity: f64,
    /// Permittivity of the matrix phase (subdomain tag 2).
    pub outer_permittivity: f64,
}

/// Solver parameters from TOML.
#[derive(Debug, Deserialize)]
pub struct SolverConfig {
    #[serde(default = "default_direct_threshold")]
    pub direct_threshold: usize,
    #[serde(default = "default_cg_tolerance")]
    pub cg_tolerance: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            direct_threshold: default_direct_threshold(),
            cg_tolerance: default_cg_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_direct_threshold() -> usize {
    2000
}
fn default_cg_tolerance() -> f64 {
    1e-10
}
fn default_max_iterations() -> usize {
    10_000
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./results").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to write the corrector fields as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_correctors: bool,
    /// Whether to also dump tensor and fields as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_correctors: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./results".into()
}
fn default_true() -> bool {
    true
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}
