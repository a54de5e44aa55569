//! Per-call diagnostics of the M2 reduction.

use crate::model::SizeSpeciesMatrix;
use crate::types::Cohort;

/// Counters collected while computing M2.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredationDiagnostics {
    /// Number of (prey, predator) terms summed.
    pub terms_evaluated: usize,
    /// Terms whose denominator was exactly zero.
    pub degenerate_terms: usize,
    /// Valid predator cohorts with no available food, in predator-major order.
    pub degenerate_cohorts: Vec<Cohort>,
    /// M2 cells that ended up NaN or infinite.
    pub non_finite_cells: usize,
}

impl PredationDiagnostics {
    pub(crate) fn with_degenerate_cohorts(degenerate_cohorts: Vec<Cohort>) -> Self {
        Self {
            degenerate_cohorts,
            ..Self::default()
        }
    }

    /// Add the term counters of a partial result.
    pub(crate) fn absorb_terms(&mut self, other: &PredationDiagnostics) {
        self.terms_evaluated += other.terms_evaluated;
        self.degenerate_terms += other.degenerate_terms;
    }

    pub(crate) fn count_non_finite(&mut self, m2: &SizeSpeciesMatrix) {
        self.non_finite_cells = m2
            .to_column_major()
            .iter()
            .filter(|v| !v.is_finite())
            .count();
    }

    /// True if any predator cohort had nothing to eat.
    pub fn has_degenerate_food(&self) -> bool {
        !self.degenerate_cohorts.is_empty()
    }

    /// One-line summary for logs.
    pub fn summary_line(&self) -> String {
        format!(
            "terms={} degenerate_terms={} degenerate_cohorts={} non_finite={}",
            self.terms_evaluated,
            self.degenerate_terms,
            self.degenerate_cohorts.len(),
            self.non_finite_cells
        )
    }
}

/// Result of a successful M2 calculation.
#[derive(Clone, Debug)]
pub struct PredationOutcome {
    /// Predation mortality per (prey size, prey species), scaled by phi_min.
    pub m2: SizeSpeciesMatrix,
    pub diagnostics: PredationDiagnostics,
}
