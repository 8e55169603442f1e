//! epshom command-line interface.
//!
//! Compute effective permittivity tensors from TOML job files:
//! ```sh
//! epshom run job.toml
//! epshom validate job.toml
//! epshom mesh --resolution 64 --inclusion disc --size 0.25 mesh.json
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "epshom")]
#[command(about = "epshom: periodic unit-cell homogenisation of two-phase composites")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a homogenisation job from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running the solve.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Generate a structured unit-square mesh container.
    Mesh {
        /// Destination JSON file.
        output: PathBuf,
        /// Squares per side of the structured grid.
        #[arg(short, long, default_value_t = 64)]
        resolution: usize,
        /// Inclusion shape tagged as phase 1.
        #[arg(short, long, value_enum, default_value = "disc")]
        inclusion: Inclusion,
        /// Inclusion size: disc radius or square half-width.
        #[arg(short, long, default_value_t = 0.25)]
        size: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Inclusion {
    /// Single-phase cell, every cell tagged as matrix.
    None,
    /// Centred disc of radius `--size`.
    Disc,
    /// Centred square of half-width `--size`.
    Square,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("epshom unit-cell solver");
            println!("=======================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let result = runner::run_job(&job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            runner::write_effective(&result.tensor, &out_dir.join("effective"))?;
            if job.output.save_correctors {
                runner::write_correctors_csv(&result, &out_dir.join("correctors.csv"))?;
            }
            if job.output.save_json {
                runner::write_json(&result, &out_dir.join("results.json"))?;
            }

            println!("Run complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            if !job.material.inner_permittivity.is_finite()
                || job.material.inner_permittivity <= 0.0
                || !job.material.outer_permittivity.is_finite()
                || job.material.outer_permittivity <= 0.0
            {
                anyhow::bail!("permittivities must be finite and positive");
            }
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Mesh {
            output,
            resolution,
            inclusion,
            size,
        } => {
            let mesh = epshom_mesh::builder::unit_square(resolution);
            let tags = match inclusion {
                Inclusion::None => {
                    epshom_mesh::builder::tag_uniform(&mesh, epshom_core::mesh::TAG_MATRIX)
                }
                Inclusion::Disc => epshom_mesh::builder::tag_centered_disc(&mesh, size),
                Inclusion::Square => epshom_mesh::builder::tag_centered_square(&mesh, size),
            };
            epshom_mesh::save_mesh(&output, &mesh, &tags)?;
            println!(
                "Mesh written to: {} ({} vertices, {} cells)",
                output.display(),
                mesh.num_vertices(),
                mesh.num_cells()
            );
            Ok(())
        }
    }
}
