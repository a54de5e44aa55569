//! Food available to each predator cohort (the M2 denominator).
//!
//! For predator cohort (isp, jsz):
//!
//! ```text
//! food(isp, jsz) = Σ_{ksz, lsp} suit(isp, jsz, ksz, lsp) * wgt[ksz, lsp] * N[ksz, lsp]
//! denominator    = food(isp, jsz) + other_food
//! ```
//!
//! The sum runs over every (size, species) cell, including classes beyond
//! a prey species' growth limit. It depends only on the predator cohort,
//! so it is computed once per cohort and shared read-only by every prey.

use crate::error::PredationError;
use crate::mortality::config::validate_other_food;
use crate::mortality::inputs::PredationInputs;
use crate::types::{Cohort, SizeClass, SpeciesIndex};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Cached denominators, one per predator cohort.
#[derive(Clone, Debug)]
pub struct PredatorFood {
    /// Indexed `isp * n_size + jsz`; only valid predator classes are filled.
    denominators: Vec<f64>,
    n_size: usize,
}

impl PredatorFood {
    /// Compute denominators for every valid predator cohort.
    ///
    /// # Errors
    /// `InvalidParameter` if `other_food` is negative or not finite.
    pub fn compute(inputs: &PredationInputs<'_>, other_food: f64) -> Result<Self, PredationError> {
        validate_other_food(other_food)?;
        let n_size = inputs.n_size();
        let biomass = prey_biomass(inputs);
        let mut denominators = vec![0.0; n_size * inputs.n_species()];

        for isp in SpeciesIndex::iter(inputs.n_species()) {
            for jsz in inputs.growth().sizes(isp) {
                denominators[isp.get() * n_size + jsz.get()] =
                    cohort_food(inputs, &biomass, isp, jsz) + other_food;
            }
        }

        Ok(Self {
            denominators,
            n_size,
        })
    }

    /// Parallel version of [`PredatorFood::compute`], one task per predator species.
    #[cfg(feature = "parallel")]
    pub fn compute_parallel(
        inputs: &PredationInputs<'_>,
        other_food: f64,
    ) -> Result<Self, PredationError> {
        validate_other_food(other_food)?;
        let n_size = inputs.n_size();
        let biomass = prey_biomass(inputs);

        let denominators: Vec<f64> = (0..inputs.n_species())
            .into_par_iter()
            .flat_map_iter(|isp| {
                let isp = SpeciesIndex::new(isp);
                let limit = inputs.growth().limit(isp);
                let biomass = &biomass;
                SizeClass::iter(n_size).map(move |jsz| {
                    if jsz.get() < limit {
                        cohort_food(inputs, biomass, isp, jsz) + other_food
                    } else {
                        0.0
                    }
                })
            })
            .collect();

        Ok(Self {
            denominators,
            n_size,
        })
    }

    /// Denominator of a valid predator cohort.
    #[inline]
    pub fn denominator(&self, species: SpeciesIndex, size: SizeClass) -> f64 {
        self.denominators[species.get() * self.n_size + size.get()]
    }

    /// Valid predator cohorts whose denominator is exactly zero.
    pub fn degenerate_cohorts(&self, inputs: &PredationInputs<'_>) -> Vec<Cohort> {
        let mut out = Vec::new();
        for isp in SpeciesIndex::iter(inputs.n_species()) {
            for jsz in inputs.growth().sizes(isp) {
                if self.denominator(isp, jsz) == 0.0 {
                    out.push(Cohort { species: isp, size: jsz });
                }
            }
        }
        out
    }
}

/// wgt * N laid out like a suitability predator profile (`ksz * n_species + lsp`).
fn prey_biomass(inputs: &PredationInputs<'_>) -> Vec<f64> {
    let n_species = inputs.n_species();
    let mut biomass = vec![0.0; inputs.n_size() * n_species];
    for ksz in SizeClass::iter(inputs.n_size()) {
        for lsp in SpeciesIndex::iter(n_species) {
            biomass[ksz.get() * n_species + lsp.get()] =
                inputs.weight().get(ksz, lsp) * inputs.abundance().get(ksz, lsp);
        }
    }
    biomass
}

fn cohort_food(
    inputs: &PredationInputs<'_>,
    biomass: &[f64],
    species: SpeciesIndex,
    size: SizeClass,
) -> f64 {
    inputs
        .suitability()
        .predator_profile(species, size)
        .iter()
        .zip(biomass)
        .map(|(s, b)| s * b)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GrowthLimits, SizeSpeciesMatrix, Suitability};

    const TOL: f64 = 1e-12;

    #[test]
    fn test_matches_direct_scan() {
        let n_size = 3;
        let n_species = 2;
        let n = SizeSpeciesMatrix::from_fn(n_size, n_species, |s, p| 1.0 + s.get() as f64 + 2.0 * p.get() as f64);
        let wgt = SizeSpeciesMatrix::from_fn(n_size, n_species, |s, _| 0.5 * (s.get() + 1) as f64);
        let ration = SizeSpeciesMatrix::constant(n_size, n_species, 1.0);
        let growth = GrowthLimits::new(vec![3, 2], n_size).unwrap();
        let suit = Suitability::from_fn(n_size, n_species, |pred, prey| {
            0.1 * (1 + pred.size.get() + prey.size.get() + prey.species.get()) as f64
        });
        let inputs =
            PredationInputs::from_abundance(&n, &growth, &ration, &wgt, &suit).unwrap();

        let other_food = 7.0;
        let food = PredatorFood::compute(&inputs, other_food).unwrap();

        for isp in 0..n_species {
            for jsz in 0..growth.as_slice()[isp] {
                let pred = Cohort::new(isp, jsz);
                let mut direct = 0.0;
                for ksz in 0..n_size {
                    for lsp in 0..n_species {
                        let prey = Cohort::new(lsp, ksz);
                        direct += suit.get(pred, prey)
                            * wgt.get(prey.size, prey.species)
                            * n.get(prey.size, prey.species);
                    }
                }
                let got = food.denominator(pred.species, pred.size);
                assert!((got - (direct + other_food)).abs() < TOL);
            }
        }
    }

    #[test]
    fn test_includes_classes_beyond_growth_limit() {
        // Species 1 stops at class 1, but suitability on class 1 still counts
        let n = SizeSpeciesMatrix::constant(2, 2, 1.0);
        let wgt = SizeSpeciesMatrix::constant(2, 2, 3.0);
        let growth = GrowthLimits::new(vec![2, 1], 2).unwrap();
        let mut suit = Suitability::zeros(2, 2);
        suit.set(Cohort::new(0, 0), Cohort::new(1, 1), 1.0);
        let inputs = PredationInputs::from_abundance(&n, &growth, &n, &wgt, &suit).unwrap();

        let food = PredatorFood::compute(&inputs, 0.0).unwrap();
        assert!((food.denominator(SpeciesIndex::new(0), SizeClass::new(0)) - 3.0).abs() < TOL);
    }

    #[test]
    fn test_degenerate_cohorts() {
        let n = SizeSpeciesMatrix::constant(2, 1, 1.0);
        let growth = GrowthLimits::full(1, 2);
        let mut suit = Suitability::zeros(2, 1);
        suit.set(Cohort::new(0, 1), Cohort::new(0, 0), 1.0);
        let inputs = PredationInputs::from_abundance(&n, &growth, &n, &n, &suit).unwrap();

        let food = PredatorFood::compute(&inputs, 0.0).unwrap();
        assert_eq!(food.degenerate_cohorts(&inputs), vec![Cohort::new(0, 0)]);

        let food = PredatorFood::compute(&inputs, 1.0).unwrap();
        assert!(food.degenerate_cohorts(&inputs).is_empty());
    }

    #[test]
    fn test_rejects_invalid_other_food() {
        let n = SizeSpeciesMatrix::constant(2, 1, 1.0);
        let growth = GrowthLimits::full(1, 2);
        let suit = Suitability::zeros(2, 1);
        let inputs = PredationInputs::from_abundance(&n, &growth, &n, &n, &suit).unwrap();

        for other_food in [-1.0, f64::NAN, f64::INFINITY] {
            let err = PredatorFood::compute(&inputs, other_food).unwrap_err();
            assert!(matches!(
                err,
                PredationError::InvalidParameter { name: "other_food", .. }
            ));
            #[cfg(feature = "parallel")]
            assert!(PredatorFood::compute_parallel(&inputs, other_food).is_err());
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let n = SizeSpeciesMatrix::from_fn(4, 3, |s, p| (s.get() * 3 + p.get()) as f64);
        let growth = GrowthLimits::new(vec![4, 2, 0], 4).unwrap();
        let suit = Suitability::from_fn(4, 3, |pred, prey| {
            if pred.size > prey.size { 0.3 } else { 0.05 }
        });
        let inputs = PredationInputs::from_abundance(&n, &growth, &n, &n, &suit).unwrap();

        let serial = PredatorFood::compute(&inputs, 2.0).unwrap();
        let parallel = PredatorFood::compute_parallel(&inputs, 2.0).unwrap();
        assert_eq!(serial.denominators, parallel.denominators);
    }
}
