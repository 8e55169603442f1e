//! The periodic cell-problem solver.
//!
//! For each coordinate direction $i \in \{0, 1\}$ the cell problem reads:
//! find $f_i$ in the periodically constrained P1 space such that
//!
//! $$\int_Y \varepsilon \, \nabla f_i \cdot \nabla v \,dx
//!   = -\int_Y \varepsilon \, \partial_i v \,dx \quad \forall v.$$
//!
//! The bilinear form is identical for both directions, so one stiffness
//! matrix is assembled and shared; only the load vectors differ. The two
//! solves are independent and run in parallel.
//!
//! # Method selection
//!
//! - **Direct solve** (dense LU via `faer`): used when the constrained
//!   space has at most `direct_threshold` unknowns. Exact, $O(n^3)$.
//! - **Iterative solve** (conjugate gradient on the sparse CSR matrix):
//!   used above the threshold. The pinned system is symmetric positive
//!   definite, so plain CG converges without preconditioning.

pub mod assembly;
pub mod direct;
pub mod iterative;

use log::debug;
use thiserror::Error;

use crate::coefficient::CoefficientField;
use crate::mesh::Mesh;
use crate::space::FunctionSpace;
use crate::types::{CorrectorField, SolverParams};

/// Errors that can occur along the homogenisation pipeline.
///
/// All variants are fatal to the run: the failure is deterministic for the
/// given inputs and there is no partial result worth keeping.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("mesh data is inconsistent: {0}")]
    MeshLoad(String),

    #[error("degenerate geometry in cell {cell}: signed area {area:.3e}")]
    Assembly { cell: usize, area: f64 },

    #[error("linear solve did not resolve the system after {iterations} iterations (relative residual {residual:.2e})")]
    SingularSystem { iterations: usize, residual: f64 },

    #[error("invalid configuration: {0}")]
    Configuration(String),
}

/// The cell-problem solver, holding configuration for the numerical method.
#[derive(Debug, Clone, Default)]
pub struct CellProblemSolver {
    pub params: SolverParams,
}

impl CellProblemSolver {
    pub fn new(params: SolverParams) -> Self {
        Self { params }
    }

    /// Solve the two corrector problems on the constrained space.
    ///
    /// Returns the corrector fields $(f_0, f_1)$, one per direction.
    pub fn solve(
        &self,
        mesh: &Mesh,
        space: &FunctionSpace,
        permittivity: &CoefficientField,
    ) -> Result<(CorrectorField, CorrectorField), SolverError> {
        let system = assembly::assemble(mesh, space, permittivity)?;
        let ndofs = space.num_dofs();
        let [b0, b1] = system.loads;

        let (r0, r1) = if ndofs <= self.params.direct_threshold {
            debug!("solving two {0}x{0} systems with dense LU", ndofs);
            let dense = assembly::to_dense(&system.stiffness);
            rayon::join(
                || direct::solve_direct(&dense, &b0),
                || direct::solve_direct(&dense, &b1),
            )
        } else {
            debug!(
                "solving two {0}x{0} systems with CG (tol {1:.1e})",
                ndofs, self.params.cg_tolerance
            );
            rayon::join(
                || {
                    iterative::solve_cg(
                        &system.stiffness,
                        &b0,
                        self.params.cg_tolerance,
                        self.params.max_iterations,
                    )
                },
                || {
                    iterative::solve_cg(
                        &system.stiffness,
                        &b1,
                        self.params.cg_tolerance,
                        self.params.max_iterations,
                    )
                },
            )
        };

        Ok((
            CorrectorField { direction: 0, values: r0? },
            CorrectorField { direction: 1, values: r1? },
        ))
    }
}
