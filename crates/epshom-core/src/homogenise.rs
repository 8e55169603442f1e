//! Effective tensor integration.
//!
//! With the correctors solved, the diagonal entries of the effective
//! permittivity tensor are
//!
//! $$A_{ii} = \int_Y \varepsilon(x) \left(\partial_i f_i + 1\right) dx,$$
//!
//! integrated cell by cell. The integrand is piecewise constant (constant
//! permittivity times a constant P1 gradient per triangle), so the midpoint
//! rule per cell is exact. The off-diagonal entries are fixed at zero by
//! the decoupled two-problem formulation and are never computed.

use crate::coefficient::CoefficientField;
use crate::mesh::Mesh;
use crate::solver::{assembly, SolverError};
use crate::space::FunctionSpace;
use crate::types::{CorrectorField, EffectiveTensor};

/// Integrate the effective tensor from the two solved correctors.
pub fn effective_tensor(
    mesh: &Mesh,
    space: &FunctionSpace,
    permittivity: &CoefficientField,
    f0: &CorrectorField,
    f1: &CorrectorField,
) -> Result<EffectiveTensor, SolverError> {
    let mut a00 = 0.0;
    let mut a11 = 0.0;

    for c in 0..mesh.num_cells() {
        let (area, grads) = assembly::cell_geometry(mesh, c)?;
        let eps = permittivity.value(c);
        let cell = mesh.cell(c);

        let mut df0_dx = 0.0;
        let mut df1_dy = 0.0;
        for a in 0..3 {
            let dof = space.dof_of(cell[a]);
            df0_dx += f0.values[dof] * grads[a][0];
            df1_dy += f1.values[dof] * grads[a][1];
        }

        a00 += eps * area * (df0_dx + 1.0);
        a11 += eps * area * (df1_dy + 1.0);
    }

    Ok(EffectiveTensor::diagonal(a00, a11))
}
