//! JSON mesh container I/O.
//!
//! The container carries the three logical fields every mesh source must
//! provide: 2D vertex coordinates, triangle connectivity, and one material
//! tag per cell. The reference tool reads the same fields from an HDF5
//! container ("mesh" and "subdomains" datasets); the core contract only
//! requires the logical content, so a self-describing JSON file keeps this
//! crate free of native library dependencies.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use epshom_core::{Mesh, SubdomainTags};

/// Errors raised while ingesting a mesh container.
#[derive(Debug, Error)]
pub enum MeshLoadError {
    #[error("cannot read mesh container: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed mesh container: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("inconsistent mesh data: {0}")]
    Inconsistent(String),
}

#[derive(Serialize, Deserialize)]
struct MeshContainer {
    vertices: Vec<[f64; 2]>,
    cells: Vec<[usize; 3]>,
    subdomains: Vec<u8>,
}

/// Load a mesh and its subdomain tagging from a JSON container.
pub fn load_mesh(path: &Path) -> Result<(Mesh, SubdomainTags), MeshLoadError> {
    let content = std::fs::read_to_string(path)?;
    let container: MeshContainer = serde_json::from_str(&content)?;

    let num_cells = container.cells.len();
    let mesh = Mesh::new(container.vertices, container.cells)
        .map_err(|e| MeshLoadError::Inconsistent(e.to_string()))?;
    let tags = SubdomainTags::new(container.subdomains, num_cells)
        .map_err(|e| MeshLoadError::Inconsistent(e.to_string()))?;

    Ok((mesh, tags))
}

/// Save a mesh and its tagging as a JSON container.
pub fn save_mesh(path: &Path, mesh: &Mesh, tags: &SubdomainTags) -> Result<(), MeshLoadError> {
    let container = MeshContainer {
        vertices: mesh.vertices().to_vec(),
        cells: mesh.cells().to_vec(),
        subdomains: (0..tags.len()).map(|c| tags.tag(c)).collect(),
    };
    let json = serde_json::to_string(&container)?;
    std::fs::write(path, json)?;
    Ok(())
}
