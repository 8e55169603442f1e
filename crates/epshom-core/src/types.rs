//! Core types shared across the epshom pipeline.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::space::FunctionSpace;

/// Parameters controlling the two corrector solves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverParams {
    /// Largest DOF count solved with dense LU; bigger systems use CG.
    pub direct_threshold: usize,
    /// Relative residual tolerance for the CG solver.
    pub cg_tolerance: f64,
    /// Maximum CG iterations.
    pub max_iterations: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            direct_threshold: 2000,
            cg_tolerance: 1e-10,
            max_iterations: 10_000,
        }
    }
}

/// A solved corrector field: the periodic perturbation to the macroscopic
/// linear field $e_i \cdot x$ in one coordinate direction.
#[derive(Debug, Clone)]
pub struct CorrectorField {
    /// Corrector direction, 0 or 1.
    pub direction: usize,
    /// DOF-indexed values in the constrained space.
    pub values: Array1<f64>,
}

impl CorrectorField {
    /// Expand the DOF-indexed values to one value per mesh vertex, for
    /// emitters that persist the field alongside the geometry. Identified
    /// vertices receive the value of their shared DOF.
    pub fn vertex_values(&self, space: &FunctionSpace, num_vertices: usize) -> Array1<f64> {
        Array1::from_iter((0..num_vertices).map(|v| self.values[space.dof_of(v)]))
    }
}

/// The homogenised 2x2 permittivity tensor.
///
/// The off-diagonal entries are structurally zero: the two corrector
/// problems are decoupled by construction, so no cross term is ever
/// computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EffectiveTensor {
    pub entries: [[f64; 2]; 2],
}

impl EffectiveTensor {
    pub fn diagonal(a00: f64, a11: f64) -> Self {
        Self {
            entries: [[a00, 0.0], [0.0, a11]],
        }
    }

    pub fn a00(&self) -> f64 {
        self.entries[0][0]
    }

    pub fn a11(&self) -> f64 {
        self.entries[1][1]
    }
}
