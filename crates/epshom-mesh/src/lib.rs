//! # Epshom Mesh
//!
//! Mesh handling for the epshom toolchain:
//!
//! - **Container I/O** ([`json`]) — load and save unit-cell meshes with
//!   subdomain tags from a JSON container carrying the three logical fields
//!   `vertices`, `cells` and `subdomains`.
//! - **Structured meshes** ([`builder`]) — regular triangulations of the
//!   unit square with tagging helpers (uniform, centred square or disc
//!   inclusion), used by tests, demos and convergence studies.

pub mod builder;
pub mod json;

pub use json::{load_mesh, save_mesh, MeshLoadError};
