//! Periodically constrained P1 function space.
//!
//! Piecewise-linear elements carry one scalar unknown per mesh vertex. The
//! periodic identification merges each slave vertex (right or top edge,
//! excluding the two unpaired corners) into the degree of freedom of the
//! vertex at its mapped master coordinates, so the constrained space has
//! fewer independent unknowns than the mesh has vertices. The merge happens
//! once, here, by resolving vertex indices; assembly then works purely with
//! the reduced DOF numbering and rows/columns of identified vertices land
//! in the same matrix entries.

use crate::mesh::Mesh;
use crate::periodic::{
    classify, is_slave, map_to_master, on_unit_square_boundary, COINCIDENCE_TOL,
};
use crate::solver::SolverError;

/// The reduced DOF numbering of a periodically constrained P1 space.
#[derive(Debug, Clone)]
pub struct FunctionSpace {
    vertex_dof: Vec<usize>,
    num_dofs: usize,
}

impl FunctionSpace {
    /// Build the constrained space for a unit-cell mesh.
    ///
    /// Two passes: first every non-slave vertex receives a fresh DOF (this
    /// covers interior vertices, master-edge vertices and the two unpaired
    /// corners), then each slave vertex is resolved to the DOF of the master
    /// vertex at its mapped coordinates. A slave whose mapped point has no
    /// coincident mesh vertex is an inconsistency of the input mesh.
    pub fn build(mesh: &Mesh) -> Result<Self, SolverError> {
        let nv = mesh.num_vertices();
        const UNASSIGNED: usize = usize::MAX;
        let mut vertex_dof = vec![UNASSIGNED; nv];
        let mut num_dofs = 0;

        // (coords, dof) of every master-edge vertex, for slave resolution
        let mut masters: Vec<([f64; 2], usize)> = Vec::new();

        for v in 0..nv {
            let p = mesh.vertex(v);
            let on_boundary = on_unit_square_boundary(p);
            if is_slave(p, on_boundary) {
                continue;
            }
            vertex_dof[v] = num_dofs;
            if classify(p, on_boundary) {
                masters.push((p, num_dofs));
            }
            num_dofs += 1;
        }

        for v in 0..nv {
            if vertex_dof[v] != UNASSIGNED {
                continue;
            }
            let target = map_to_master(mesh.vertex(v));
            let found = masters.iter().find(|(q, _)| {
                (q[0] - target[0]).abs() <= COINCIDENCE_TOL
                    && (q[1] - target[1]).abs() <= COINCIDENCE_TOL
            });
            match found {
                Some(&(_, dof)) => vertex_dof[v] = dof,
                None => {
                    let p = mesh.vertex(v);
                    return Err(SolverError::MeshLoad(format!(
                        "boundary vertex {} at ({:.6}, {:.6}) has no periodic partner at \
                         ({:.6}, {:.6})",
                        v, p[0], p[1], target[0], target[1]
                    )));
                }
            }
        }

        Ok(Self { vertex_dof, num_dofs })
    }

    /// Number of independent unknowns after DOF merging.
    pub fn num_dofs(&self) -> usize {
        self.num_dofs
    }

    /// DOF index of vertex `v`.
    pub fn dof_of(&self, v: usize) -> usize {
        self.vertex_dof[v]
    }
}
