//! # Epshom Core
//!
//! The numerical backbone of the epshom toolchain. This crate solves the
//! periodic unit-cell problem of two-phase composite homogenisation: given a
//! triangulation of the unit square $[0,1]^2$ with per-cell material tags,
//! it computes the two corrector fields of the cell problem with P1 finite
//! elements and integrates them into the effective $2 \times 2$ permittivity
//! tensor.
//!
//! ## Pipeline
//!
//! 1. [`mesh`] — immutable triangle mesh and subdomain tags.
//! 2. [`periodic`] — geometric identification of opposite unit-square edges.
//! 3. [`space`] — periodically constrained P1 function space (DOF merging).
//! 4. [`coefficient`] — per-cell permittivity lookup over the tags.
//! 5. [`solver`] — sparse assembly and the two corrector solves.
//! 6. [`homogenise`] — integration of the effective tensor.
//!
//! All stages are synchronous and side-effect free; I/O (mesh ingestion,
//! result persistence) lives in the companion crates.

pub mod coefficient;
pub mod homogenise;
pub mod mesh;
pub mod periodic;
pub mod solver;
pub mod space;
pub mod types;

pub use coefficient::CoefficientField;
pub use homogenise::effective_tensor;
pub use mesh::{Mesh, SubdomainTags};
pub use solver::{CellProblemSolver, SolverError};
pub use space::FunctionSpace;
pub use types::{CorrectorField, EffectiveTensor, SolverParams};
