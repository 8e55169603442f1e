//! Per-cell permittivity lookup over the subdomain tags.

use crate::mesh::{SubdomainTags, TAG_INCLUSION};
use crate::solver::SolverError;

/// Piecewise-constant permittivity coefficient: one scalar per material
/// phase, resolved through the per-cell subdomain tag.
#[derive(Debug, Clone)]
pub struct CoefficientField<'a> {
    tags: &'a SubdomainTags,
    inner: f64,
    outer: f64,
}

impl<'a> CoefficientField<'a> {
    /// Attach permittivities to a tagging.
    ///
    /// Both values must be finite and strictly positive for the cell problem
    /// to be well-posed.
    pub fn new(tags: &'a SubdomainTags, inner: f64, outer: f64) -> Result<Self, SolverError> {
        for (name, value) in [("inner_permittivity", inner), ("outer_permittivity", outer)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SolverError::Configuration(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }
        Ok(Self { tags, inner, outer })
    }

    /// Permittivity of cell `cell`.
    pub fn value(&self, cell: usize) -> f64 {
        if self.tags.tag(cell) == TAG_INCLUSION {
            self.inner
        } else {
            self.outer
        }
    }

    pub fn inner_permittivity(&self) -> f64 {
        self.inner
    }

    pub fn outer_permittivity(&self) -> f64 {
        self.outer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_phase_by_tag() {
        let tags = SubdomainTags::new(vec![1, 2, 2], 3).unwrap();
        let coeff = CoefficientField::new(&tags, 1.0, 11.7).unwrap();
        assert_eq!(coeff.value(0), 1.0);
        assert_eq!(coeff.value(1), 11.7);
        assert_eq!(coeff.value(2), 11.7);
    }

    #[test]
    fn rejects_unphysical_permittivity() {
        let tags = SubdomainTags::new(vec![1], 1).unwrap();
        assert!(CoefficientField::new(&tags, 1.0, 0.0).is_err());
        assert!(CoefficientField::new(&tags, -1.0, 11.7).is_err());
        assert!(CoefficientField::new(&tags, f64::NAN, 1.0).is_err());
        assert!(CoefficientField::new(&tags, 1.0, f64::INFINITY).is_err());
    }
}
