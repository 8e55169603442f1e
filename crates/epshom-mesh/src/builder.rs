//! Structured unit-square triangulations with tagging helpers.
//!
//! An `n` by `n` grid of squares, each split along its up-right diagonal,
//! tiling $[0,1]^2$ with $2n^2$ counter-clockwise triangles. Cells are
//! tagged by their centroid: a region predicate marks the inclusion phase,
//! the rest is matrix. These meshes exist for tests, demos and convergence
//! studies; production geometry arrives through the JSON container.

use epshom_core::mesh::{TAG_INCLUSION, TAG_MATRIX};
use epshom_core::{Mesh, SubdomainTags};

/// Build a structured triangulation of the unit square with `n` squares
/// per side.
///
/// # Panics
/// Panics if `n` is zero.
pub fn unit_square(n: usize) -> Mesh {
    assert!(n > 0, "resolution must be at least 1");
    let h = 1.0 / n as f64;

    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            vertices.push([i as f64 * h, j as f64 * h]);
        }
    }

    let mut cells = Vec::with_capacity(2 * n * n);
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + n + 1;
            let v11 = v01 + 1;
            cells.push([v00, v10, v11]);
            cells.push([v00, v11, v01]);
        }
    }

    // structured connectivity is valid by construction
    Mesh::new(vertices, cells).expect("structured mesh is always consistent")
}

/// Tag every cell with the same phase.
pub fn tag_uniform(mesh: &Mesh, tag: u8) -> SubdomainTags {
    SubdomainTags::new(vec![tag; mesh.num_cells()], mesh.num_cells())
        .expect("uniform tagging is always consistent")
}

/// Tag cells whose centroid satisfies `is_inclusion` as phase 1, the rest
/// as phase 2.
pub fn tag_by_region<F>(mesh: &Mesh, is_inclusion: F) -> SubdomainTags
where
    F: Fn([f64; 2]) -> bool,
{
    let tags = (0..mesh.num_cells())
        .map(|c| {
            let [v0, v1, v2] = mesh.cell(c);
            let p0 = mesh.vertex(v0);
            let p1 = mesh.vertex(v1);
            let p2 = mesh.vertex(v2);
            let centroid = [
                (p0[0] + p1[0] + p2[0]) / 3.0,
                (p0[1] + p1[1] + p2[1]) / 3.0,
            ];
            if is_inclusion(centroid) {
                TAG_INCLUSION
            } else {
                TAG_MATRIX
            }
        })
        .collect();
    SubdomainTags::new(tags, mesh.num_cells()).expect("region tagging is always consistent")
}

/// Centred square inclusion of the given half-width.
pub fn tag_centered_square(mesh: &Mesh, half_width: f64) -> SubdomainTags {
    tag_by_region(mesh, |c| {
        (c[0] - 0.5).abs() <= half_width && (c[1] - 0.5).abs() <= half_width
    })
}

/// Centred disc inclusion of the given radius.
pub fn tag_centered_disc(mesh: &Mesh, radius: f64) -> SubdomainTags {
    tag_by_region(mesh, |c| {
        let dx = c[0] - 0.5;
        let dy = c[1] - 0.5;
        dx * dx + dy * dy <= radius * radius
    })
}
