//! Pipeline runner: ties together mesh loading, the cell-problem solve and
//! result persistence.

use std::path::Path;

use anyhow::{Context, Result};
use ndarray::Array1;

use epshom_core::{
    effective_tensor, CellProblemSolver, CoefficientField, EffectiveTensor, FunctionSpace, Mesh,
    SolverParams,
};

use crate::config::JobConfig;

/// Results from a homogenisation run.
pub struct RunOutput {
    pub mesh: Mesh,
    pub tensor: EffectiveTensor,
    /// Per-vertex values of the two correctors, ready for emitters.
    pub corrector_vertex_values: [Array1<f64>; 2],
}

/// Run the full pipeline from a parsed job configuration.
pub fn run_job(job: &JobConfig) -> Result<RunOutput> {
    let mesh_path = Path::new(&job.mesh.path);
    let (mesh, tags) = epshom_mesh::load_mesh(mesh_path)
        .with_context(|| format!("loading mesh container {}", mesh_path.display()))?;
    println!(
        "Mesh: {} vertices, {} cells",
        mesh.num_vertices(),
        mesh.num_cells()
    );

    let permittivity =
        CoefficientField::new(&tags, job.material.inner_permittivity, job.material.outer_permittivity)
            .context("material configuration")?;

    let space = FunctionSpace::build(&mesh).context("building the periodic function space")?;
    println!(
        "Periodic P1 space: {} unknowns ({} vertices merged)",
        space.num_dofs(),
        mesh.num_vertices() - space.num_dofs()
    );

    let solver = CellProblemSolver::new(SolverParams {
        direct_threshold: job.solver.direct_threshold,
        cg_tolerance: job.solver.cg_tolerance,
        max_iterations: job.solver.max_iterations,
    });
    let (f0, f1) = solver
        .solve(&mesh, &space, &permittivity)
        .context("solving the corrector problems")?;

    let tensor = effective_tensor(&mesh, &space, &permittivity, &f0, &f1)
        .context("integrating the effective tensor")?;
    println!(
        "Effective permittivity: A00 = {:.6e}, A11 = {:.6e}",
        tensor.a00(),
        tensor.a11()
    );

    let nv = mesh.num_vertices();
    let corrector_vertex_values = [
        f0.vertex_values(&space, nv),
        f1.vertex_values(&space, nv),
    ];

    Ok(RunOutput {
        mesh,
        tensor,
        corrector_vertex_values,
    })
}

/// Format a number the way C's `%12.6e` does: six fractional digits, a
/// signed two-digit exponent, right-aligned in twelve columns.
fn c_scientific(v: f64) -> String {
    let formatted = format!("{:.6e}", v);
    let (mantissa, exponent) = formatted
        .split_once('e')
        .expect("float e-format always contains an exponent");
    let exponent: i32 = exponent.parse().expect("float exponent is an integer");
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{:>12}", format!("{}e{}{:02}", mantissa, sign, exponent.abs()))
}

/// Write the effective matrix in the reference tool's text format: two
/// lines of two `%12.6e` numbers, each followed by a single space.
pub fn write_effective(tensor: &EffectiveTensor, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    for row in &tensor.entries {
        writeln!(file, "{} {} ", c_scientific(row[0]), c_scientific(row[1]))?;
    }
    println!("Effective matrix written to: {}", path.display());
    Ok(())
}

/// Write the two corrector fields as a per-vertex CSV with a metadata
/// header.
pub fn write_correctors_csv(output: &RunOutput, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "# epshom corrector fields")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        file,
        "# Mesh: {} vertices, {} cells",
        output.mesh.num_vertices(),
        output.mesh.num_cells()
    )?;
    writeln!(file, "x,y,f1,f2")?;

    let [f0, f1] = &output.corrector_vertex_values;
    for v in 0..output.mesh.num_vertices() {
        let p = output.mesh.vertex(v);
        writeln!(file, "{:.8},{:.8},{:.8e},{:.8e}", p[0], p[1], f0[v], f1[v])?;
    }
    println!("Corrector fields written to: {}", path.display());
    Ok(())
}

/// Dump the tensor and corrector fields as JSON.
pub fn write_json(output: &RunOutput, path: &Path) -> Result<()> {
    use serde_json::json;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let [f0, f1] = &output.corrector_vertex_values;
    let doc = json!({
        "effective": output.tensor.entries,
        "correctors": {
            "f1": f0.to_vec(),
            "f2": f1.to_vec(),
        },
    });
    std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
    println!("JSON results written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_scientific_matches_printf() {
        assert_eq!(c_scientific(11.7), "1.170000e+01");
        assert_eq!(c_scientific(1.0), "1.000000e+00");
        assert_eq!(c_scientific(0.0), "0.000000e+00");
        assert_eq!(c_scientific(0.001234), "1.234000e-03");
        assert_eq!(c_scientific(-2.5), "-2.500000e+00");
    }

    #[test]
    fn c_scientific_pads_to_twelve_columns() {
        assert_eq!(c_scientific(1.0).len(), 12);
        assert_eq!(c_scientific(0.0).len(), 12);
    }
}
