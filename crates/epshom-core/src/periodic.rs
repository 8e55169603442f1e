//! Periodic identification of opposite unit-square edges.
//!
//! A field on the unit cell repeats seamlessly across cell boundaries when
//! every point on the right or top edge shares its degree of freedom with
//! its translate on the left or bottom edge. This module provides the two
//! geometric predicates the function-space builder calls eagerly while
//! merging DOFs: [`classify`] picks out the master (left/bottom) points and
//! [`map_to_master`] sends a slave point to its canonical representative.
//!
//! The two corners (0,1) and (1,0) are deliberately excluded from the
//! pairing: neither is a master nor a slave, so each keeps its own degree
//! of freedom. This reproduces the reference construction exactly.

/// Absolute tolerance for vertex-coincidence comparisons, shared by every
/// geometric predicate in the pipeline.
pub const COINCIDENCE_TOL: f64 = 1e-10;

#[inline]
fn near(a: f64, b: f64) -> bool {
    (a - b).abs() <= COINCIDENCE_TOL
}

/// True iff `p` lies on the left or bottom edge of the unit square and is
/// neither of the excluded corners (0,1) and (1,0).
///
/// `on_boundary` is asserted by the caller; interior points are never
/// masters regardless of their coordinates.
pub fn classify(p: [f64; 2], on_boundary: bool) -> bool {
    on_boundary
        && (near(p[0], 0.0) || near(p[1], 0.0))
        && !(near(p[0], 0.0) && near(p[1], 1.0))
        && !(near(p[0], 1.0) && near(p[1], 0.0))
}

/// True iff `p` is a slave point: on the right or top edge and not one of
/// the excluded corners.
pub fn is_slave(p: [f64; 2], on_boundary: bool) -> bool {
    on_boundary
        && (near(p[0], 1.0) || near(p[1], 1.0))
        && !(near(p[0], 0.0) && near(p[1], 1.0))
        && !(near(p[0], 1.0) && near(p[1], 0.0))
}

/// Canonical representative of a slave point.
///
/// (1,1) maps to (0,0); other right-edge points translate by (−1, 0);
/// remaining (top-edge) points translate by (0, −1).
pub fn map_to_master(p: [f64; 2]) -> [f64; 2] {
    if near(p[0], 1.0) && near(p[1], 1.0) {
        [p[0] - 1.0, p[1] - 1.0]
    } else if near(p[0], 1.0) {
        [p[0] - 1.0, p[1]]
    } else {
        [p[0], p[1] - 1.0]
    }
}

/// True iff `p` lies on any edge of the unit square.
pub fn on_unit_square_boundary(p: [f64; 2]) -> bool {
    near(p[0], 0.0) || near(p[0], 1.0) || near(p[1], 0.0) || near(p[1], 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_and_bottom_edges_are_masters() {
        assert!(classify([0.0, 0.5], true));
        assert!(classify([0.0, 0.0], true));
        assert!(classify([0.5, 0.0], true));
    }

    #[test]
    fn interior_and_far_edges_are_not_masters() {
        assert!(!classify([0.5, 0.5], false));
        assert!(!classify([1.0, 0.5], true));
        assert!(!classify([0.5, 1.0], true));
        // on_boundary gates the predicate even for matching coordinates
        assert!(!classify([0.0, 0.5], false));
    }

    #[test]
    fn excluded_corners_are_neither_master_nor_slave() {
        assert!(!classify([0.0, 1.0], true));
        assert!(!classify([1.0, 0.0], true));
        assert!(!is_slave([0.0, 1.0], true));
        assert!(!is_slave([1.0, 0.0], true));
    }

    #[test]
    fn top_right_corner_maps_to_origin() {
        let m = map_to_master([1.0, 1.0]);
        assert!(m[0].abs() <= COINCIDENCE_TOL && m[1].abs() <= COINCIDENCE_TOL);
    }

    #[test]
    fn right_edge_translates_left() {
        let m = map_to_master([1.0, 0.25]);
        assert!(m[0].abs() <= COINCIDENCE_TOL);
        assert!((m[1] - 0.25).abs() <= COINCIDENCE_TOL);
    }

    #[test]
    fn top_edge_translates_down() {
        let m = map_to_master([0.75, 1.0]);
        assert!((m[0] - 0.75).abs() <= COINCIDENCE_TOL);
        assert!(m[1].abs() <= COINCIDENCE_TOL);
    }

    #[test]
    fn map_targets_are_masters_never_excluded_corners() {
        for p in [[1.0, 1.0], [1.0, 0.3], [1.0, 0.9], [0.1, 1.0], [0.9, 1.0]] {
            let m = map_to_master(p);
            assert!(classify(m, true), "map({:?}) = {:?} is not a master", p, m);
            assert!(!(near(m[0], 0.0) && near(m[1], 1.0)));
            assert!(!(near(m[0], 1.0) && near(m[1], 0.0)));
        }
    }

    #[test]
    fn tolerance_absorbs_roundoff() {
        assert!(classify([5e-11, 0.5], true));
        assert!(is_slave([1.0 - 5e-11, 0.5], true));
    }
}
