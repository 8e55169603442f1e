//! End-to-end homogenisation scenarios on structured unit-cell meshes.

use approx::assert_relative_eq;

use epshom_core::mesh::TAG_MATRIX;
use epshom_core::{
    effective_tensor, CellProblemSolver, CoefficientField, EffectiveTensor, FunctionSpace,
    SolverParams,
};
use epshom_mesh::builder::{tag_centered_disc, tag_uniform, unit_square};

fn solve_structured(
    mesh: &epshom_core::Mesh,
    tags: &epshom_core::SubdomainTags,
    inner: f64,
    outer: f64,
    params: SolverParams,
) -> EffectiveTensor {
    let coeff = CoefficientField::new(tags, inner, outer).unwrap();
    let space = FunctionSpace::build(mesh).unwrap();
    let solver = CellProblemSolver::new(params);
    let (f0, f1) = solver.solve(mesh, &space, &coeff).unwrap();
    effective_tensor(mesh, &space, &coeff, &f0, &f1).unwrap()
}

#[test]
fn uniform_medium_recovers_the_bulk_value() {
    let n = 32;
    let mesh = unit_square(n);
    let tags = tag_uniform(&mesh, TAG_MATRIX);
    let tensor = solve_structured(&mesh, &tags, 1.0, 1.0, SolverParams::default());

    // The two unpaired corners leave an O(h^2) residue in the corrector,
    // so the recovery is discretization-exact, not machine-exact.
    assert_relative_eq!(tensor.a00(), 1.0, epsilon = 2e-3);
    assert_relative_eq!(tensor.a11(), 1.0, epsilon = 2e-3);
    assert_eq!(tensor.entries[0][1], 0.0);
    assert_eq!(tensor.entries[1][0], 0.0);
}

#[test]
fn uniform_medium_scales_with_the_bulk_permittivity() {
    let n = 16;
    let k = 3.5;
    let mesh = unit_square(n);
    let tags = tag_uniform(&mesh, TAG_MATRIX);
    let tensor = solve_structured(&mesh, &tags, k, k, SolverParams::default());

    assert_relative_eq!(tensor.a00(), k, epsilon = 5e-3 * k);
    assert_relative_eq!(tensor.a11(), k, epsilon = 5e-3 * k);
}

#[test]
fn uniform_medium_error_decreases_under_refinement() {
    eprintln!("=== Convergence: uniform medium, k = 1 ===");
    eprintln!("{:>6} {:>8} {:>12}", "n", "dofs", "|A00 - 1|");

    let mut errors = Vec::new();
    for &n in &[4, 8, 16] {
        let mesh = unit_square(n);
        let tags = tag_uniform(&mesh, TAG_MATRIX);
        let space = FunctionSpace::build(&mesh).unwrap();
        let tensor = solve_structured(&mesh, &tags, 1.0, 1.0, SolverParams::default());
        let err = (tensor.a00() - 1.0).abs();
        eprintln!("{:6} {:8} {:12.3e}", n, space.num_dofs(), err);
        errors.push(err);
    }

    for pair in errors.windows(2) {
        assert!(
            pair[1] < pair[0],
            "refinement did not reduce the error: {:?}",
            errors
        );
    }
    assert!(errors[errors.len() - 1] < 1e-2);
}

#[test]
fn centered_disc_inclusion_stays_between_the_phase_values() {
    let n = 32;
    let (inner, outer) = (1.0, 11.7);
    let mesh = unit_square(n);
    let tags = tag_centered_disc(&mesh, 0.25);
    let tensor = solve_structured(&mesh, &tags, inner, outer, SolverParams::default());

    assert!(
        tensor.a00() > inner && tensor.a00() < outer,
        "A00 = {} outside ({}, {})",
        tensor.a00(),
        inner,
        outer
    );
    assert!(
        tensor.a11() > inner && tensor.a11() < outer,
        "A11 = {} outside ({}, {})",
        tensor.a11(),
        inner,
        outer
    );
    // a centred isotropic inclusion in a square cell is symmetric up to
    // the diagonal bias of the structured triangulation
    assert_relative_eq!(tensor.a00(), tensor.a11(), max_relative = 0.05);
    assert_eq!(tensor.entries[0][1], 0.0);
    assert_eq!(tensor.entries[1][0], 0.0);
}

#[test]
fn direct_and_iterative_solvers_agree() {
    let n = 8;
    let mesh = unit_square(n);
    let tags = tag_centered_disc(&mesh, 0.25);

    let direct = solve_structured(
        &mesh,
        &tags,
        1.0,
        11.7,
        SolverParams {
            direct_threshold: usize::MAX,
            ..Default::default()
        },
    );
    let iterative = solve_structured(
        &mesh,
        &tags,
        1.0,
        11.7,
        SolverParams {
            direct_threshold: 0,
            ..Default::default()
        },
    );

    assert_relative_eq!(direct.a00(), iterative.a00(), max_relative = 1e-6);
    assert_relative_eq!(direct.a11(), iterative.a11(), max_relative = 1e-6);
}

#[test]
fn unphysical_permittivities_are_rejected() {
    let mesh = unit_square(2);
    let tags = tag_uniform(&mesh, TAG_MATRIX);
    assert!(CoefficientField::new(&tags, 1.0, 0.0).is_err());
    assert!(CoefficientField::new(&tags, -1.0, 11.7).is_err());
}
