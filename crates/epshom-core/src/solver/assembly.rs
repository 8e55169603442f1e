//! Stiffness matrix and load vector assembly for P1 elements.
//!
//! On a triangle the P1 basis gradients are constant, so every element
//! integral is exact: the local stiffness block is
//! $\varepsilon_c \, |T| \, (\nabla\lambda_a \cdot \nabla\lambda_b)$ and the
//! direction-$d$ load entry is $-\varepsilon_c \, |T| \, (\nabla\lambda_a)_d$.
//! Contributions accumulate into the reduced periodic DOF numbering, which
//! merges the rows and columns of identified vertices.
//!
//! The periodic system has a one-dimensional null space (constant shift).
//! DOF 0 is pinned to zero — identity row and column, zero right-hand side —
//! which leaves the corrector gradients, and hence the effective tensor,
//! unchanged.

use nalgebra_sparse::{CooMatrix, CsrMatrix};
use ndarray::{Array1, Array2};

use crate::coefficient::CoefficientField;
use crate::mesh::Mesh;
use crate::space::FunctionSpace;
use crate::solver::SolverError;

/// Signed area below this bound marks a cell as degenerate.
const AREA_TOL: f64 = 1e-14;

/// DOF pinned to remove the constant null space.
const PINNED_DOF: usize = 0;

/// The assembled linear systems: one shared stiffness matrix, one load
/// vector per corrector direction.
pub struct AssembledSystem {
    pub stiffness: CsrMatrix<f64>,
    pub loads: [Array1<f64>; 2],
}

/// Signed area and the three constant basis gradients of cell `c`.
///
/// Fails on zero or negative signed area (degenerate or inverted cell).
pub(crate) fn cell_geometry(mesh: &Mesh, c: usize) -> Result<(f64, [[f64; 2]; 3]), SolverError> {
    let [v0, v1, v2] = mesh.cell(c);
    let p0 = mesh.vertex(v0);
    let p1 = mesh.vertex(v1);
    let p2 = mesh.vertex(v2);

    let signed = 0.5 * ((p1[0] - p0[0]) * (p2[1] - p0[1]) - (p2[0] - p0[0]) * (p1[1] - p0[1]));
    if signed <= AREA_TOL {
        return Err(SolverError::Assembly { cell: c, area: signed });
    }

    let inv2a = 1.0 / (2.0 * signed);
    let grads = [
        [(p1[1] - p2[1]) * inv2a, (p2[0] - p1[0]) * inv2a],
        [(p2[1] - p0[1]) * inv2a, (p0[0] - p2[0]) * inv2a],
        [(p0[1] - p1[1]) * inv2a, (p1[0] - p0[0]) * inv2a],
    ];
    Ok((signed, grads))
}

/// Assemble the stiffness matrix and both load vectors over the mesh.
pub fn assemble(
    mesh: &Mesh,
    space: &FunctionSpace,
    permittivity: &CoefficientField,
) -> Result<AssembledSystem, SolverError> {
    let ndofs = space.num_dofs();
    if ndofs == 0 {
        return Err(SolverError::MeshLoad("mesh has no vertices".into()));
    }
    let mut coo = CooMatrix::new(ndofs, ndofs);
    let mut b0 = Array1::<f64>::zeros(ndofs);
    let mut b1 = Array1::<f64>::zeros(ndofs);

    for c in 0..mesh.num_cells() {
        let (area, grads) = cell_geometry(mesh, c)?;
        let eps = permittivity.value(c);
        let cell = mesh.cell(c);
        let dofs = [
            space.dof_of(cell[0]),
            space.dof_of(cell[1]),
            space.dof_of(cell[2]),
        ];

        for a in 0..3 {
            if dofs[a] == PINNED_DOF {
                continue;
            }
            b0[dofs[a]] -= eps * area * grads[a][0];
            b1[dofs[a]] -= eps * area * grads[a][1];
            for b in 0..3 {
                if dofs[b] == PINNED_DOF {
                    continue;
                }
                let k = eps * area * (grads[a][0] * grads[b][0] + grads[a][1] * grads[b][1]);
                coo.push(dofs[a], dofs[b], k);
            }
        }
    }

    coo.push(PINNED_DOF, PINNED_DOF, 1.0);
    b0[PINNED_DOF] = 0.0;
    b1[PINNED_DOF] = 0.0;

    Ok(AssembledSystem {
        stiffness: CsrMatrix::from(&coo),
        loads: [b0, b1],
    })
}

/// Expand the sparse stiffness matrix for the dense direct path.
pub fn to_dense(csr: &CsrMatrix<f64>) -> Array2<f64> {
    let mut dense = Array2::<f64>::zeros((csr.nrows(), csr.ncols()));
    for (i, j, v) in csr.triplet_iter() {
        dense[[i, j]] += v;
    }
    dense
}
