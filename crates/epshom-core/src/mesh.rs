//! Immutable triangle mesh and per-cell subdomain tags.
//!
//! The mesh is the read-only substrate of the whole pipeline: a list of 2D
//! vertex coordinates and a list of triangles given as vertex-index triples.
//! Subdomain tags assign each cell to one of the two material phases.
//! Both structures are validated at construction and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::solver::SolverError;

/// Subdomain tag of the inclusion phase.
pub const TAG_INCLUSION: u8 = 1;
/// Subdomain tag of the surrounding matrix phase.
pub const TAG_MATRIX: u8 = 2;

/// A 2D simplicial mesh of the unit cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    vertices: Vec<[f64; 2]>,
    cells: Vec<[usize; 3]>,
}

impl Mesh {
    /// Build a mesh from raw vertex and cell data.
    ///
    /// Fails if any cell references a vertex index out of range.
    pub fn new(vertices: Vec<[f64; 2]>, cells: Vec<[usize; 3]>) -> Result<Self, SolverError> {
        let nv = vertices.len();
        for (c, cell) in cells.iter().enumerate() {
            for &v in cell {
                if v >= nv {
                    return Err(SolverError::MeshLoad(format!(
                        "cell {} references vertex {} but the mesh has only {} vertices",
                        c, v, nv
                    )));
                }
            }
        }
        Ok(Self { vertices, cells })
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Coordinates of vertex `v`.
    pub fn vertex(&self, v: usize) -> [f64; 2] {
        self.vertices[v]
    }

    /// Vertex indices of cell `c`.
    pub fn cell(&self, c: usize) -> [usize; 3] {
        self.cells[c]
    }

    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    pub fn cells(&self) -> &[[usize; 3]] {
        &self.cells
    }
}

/// One material tag per cell, 1 = inclusion, 2 = matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubdomainTags(Vec<u8>);

impl SubdomainTags {
    /// Build the tagging for a mesh with `num_cells` cells.
    ///
    /// Fails if the tag count does not match the cell count or any tag is
    /// outside {1, 2}.
    pub fn new(tags: Vec<u8>, num_cells: usize) -> Result<Self, SolverError> {
        if tags.len() != num_cells {
            return Err(SolverError::MeshLoad(format!(
                "{} subdomain tags for {} cells",
                tags.len(),
                num_cells
            )));
        }
        for (c, &t) in tags.iter().enumerate() {
            if t != TAG_INCLUSION && t != TAG_MATRIX {
                return Err(SolverError::MeshLoad(format!(
                    "cell {} has subdomain tag {} (expected 1 or 2)",
                    c, t
                )));
            }
        }
        Ok(Self(tags))
    }

    pub fn tag(&self, cell: usize) -> u8 {
        self.0[cell]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
