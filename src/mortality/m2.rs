//! Predation mortality (M2) kernel.
//!
//! For every prey cohort (msp, nsz) with nsz < scLinf[msp]:
//!
//! ```text
//! M2[nsz, msp] = phi_min * Σ_{isp} Σ_{jsz < scLinf[isp]}
//!     ration[jsz, isp] * N[jsz, isp] * suit(isp, jsz, nsz, msp)
//!     / (other_food + Σ_{ksz, lsp} suit(isp, jsz, ksz, lsp) * wgt[ksz, lsp] * N[ksz, lsp])
//! ```
//!
//! Prey classes at or above their growth limit stay zero. Species with a
//! growth limit of zero contribute neither prey rows nor predator terms.
//!
//! Reference: Hall et al. (2006), Can. J. Fish. Aquat. Sci. 63:1344-1359.

use log::{debug, warn};

use crate::error::PredationError;
use crate::model::{GrowthLimits, SizeSpeciesMatrix, Suitability};
use crate::mortality::config::{DegenerateFoodPolicy, PredationConfig};
use crate::mortality::diagnostics::{PredationDiagnostics, PredationOutcome};
use crate::mortality::food::PredatorFood;
use crate::mortality::hooks::{
    Interrupt, NeverInterrupt, NoopObserver, PredationObserver, PredationTerm,
};
use crate::mortality::inputs::PredationInputs;
use crate::types::{Cohort, SizeClass, SpeciesIndex};

/// Compute M2 with positional arguments.
///
/// `sc_linf` is the real-valued growth-limit vector as passed by numeric
/// bindings; each entry must be an integer in `[0, n_size]`.
///
/// # Errors
/// Any validation error of [`PredationInputs::new`], [`GrowthLimits::from_f64_slice`]
/// or [`PredationConfig::validate`].
#[allow(clippy::too_many_arguments)]
pub fn calc_m2(
    n_size: usize,
    n_species: usize,
    abundance: &SizeSpeciesMatrix,
    sc_linf: &[f64],
    ration: &SizeSpeciesMatrix,
    weight: &SizeSpeciesMatrix,
    suitability: &Suitability,
    phi_min: f64,
    other_food: f64,
) -> Result<SizeSpeciesMatrix, PredationError> {
    let config = PredationConfig::new(phi_min, other_food);
    config.validate()?;
    let growth = GrowthLimits::from_f64_slice(sc_linf, n_size)?;
    let inputs = PredationInputs::new(
        n_size,
        n_species,
        abundance,
        &growth,
        ration,
        weight,
        suitability,
    )?;
    compute_m2(&inputs, &config)
}

/// Compute M2 without hooks.
pub fn compute_m2(
    inputs: &PredationInputs<'_>,
    config: &PredationConfig,
) -> Result<SizeSpeciesMatrix, PredationError> {
    compute_m2_with(inputs, config, &NeverInterrupt, &mut NoopObserver).map(|out| out.m2)
}

/// Compute M2 with a cancellation check and a per-term observer.
///
/// `interrupt` is consulted once before each prey species. If it fires,
/// the call returns [`PredationError::Cancelled`] and no matrix.
///
/// # Example
///
/// ```
/// use lemarns_m2::model::{GrowthLimits, SizeSpeciesMatrix, Suitability};
/// use lemarns_m2::mortality::{NeverInterrupt, PredationConfig, PredationInputs, PredationTerm, compute_m2_with};
/// use lemarns_m2::types::{Cohort, SizeClass, SpeciesIndex};
///
/// let ones = SizeSpeciesMatrix::constant(2, 1, 1.0);
/// let growth = GrowthLimits::full(1, 2);
/// let mut suit = Suitability::zeros(2, 1);
/// suit.set(Cohort::new(0, 1), Cohort::new(0, 0), 1.0);
/// let inputs = PredationInputs::from_abundance(&ones, &growth, &ones, &ones, &suit).unwrap();
///
/// let mut terms = 0;
/// let out = compute_m2_with(&inputs, &PredationConfig::default(), &NeverInterrupt, &mut |_: &PredationTerm| terms += 1).unwrap();
/// assert_eq!(out.m2.get(SizeClass::new(0), SpeciesIndex::new(0)), 1.0);
/// assert_eq!(terms, 4);
/// ```
pub fn compute_m2_with(
    inputs: &PredationInputs<'_>,
    config: &PredationConfig,
    interrupt: &dyn Interrupt,
    observer: &mut dyn PredationObserver,
) -> Result<PredationOutcome, PredationError> {
    config.validate()?;
    debug!(
        "computing M2: n_size={}, n_species={}, phi_min={}, other_food={}",
        inputs.n_size(),
        inputs.n_species(),
        config.phi_min,
        config.other_food
    );

    let food = PredatorFood::compute(inputs, config.other_food)?;
    let mut diagnostics = start_diagnostics(inputs, &food, config.degenerate_policy);
    let mut m2 = SizeSpeciesMatrix::zeros(inputs.n_size(), inputs.n_species());

    for msp in SpeciesIndex::iter(inputs.n_species()) {
        if interrupt.should_stop() {
            debug!("M2 cancelled before prey species {}", msp);
            return Err(PredationError::Cancelled {
                prey_species: msp.get(),
            });
        }
        let column = prey_column(
            inputs,
            &food,
            config.degenerate_policy,
            msp,
            observer,
            &mut diagnostics,
        );
        for (nsz, value) in column.into_iter().enumerate() {
            m2.set(SizeClass::new(nsz), msp, value);
        }
    }

    Ok(finish(m2, config.phi_min, diagnostics))
}

/// Diagnostics seeded with the zero-food cohorts, logged once each.
pub(crate) fn start_diagnostics(
    inputs: &PredationInputs<'_>,
    food: &PredatorFood,
    policy: DegenerateFoodPolicy,
) -> PredationDiagnostics {
    let degenerate = food.degenerate_cohorts(inputs);
    for cohort in &degenerate {
        warn!(
            "predator cohort {} has no available food (policy: {:?})",
            cohort, policy
        );
    }
    PredationDiagnostics::with_degenerate_cohorts(degenerate)
}

/// Scale by phi_min and close the diagnostics.
pub(crate) fn finish(
    mut m2: SizeSpeciesMatrix,
    phi_min: f64,
    mut diagnostics: PredationDiagnostics,
) -> PredationOutcome {
    m2.scale(phi_min);
    diagnostics.count_non_finite(&m2);
    debug!("M2 done: {}", diagnostics.summary_line());
    PredationOutcome { m2, diagnostics }
}

/// Unscaled M2 column for one prey species (length n_size).
pub(crate) fn prey_column(
    inputs: &PredationInputs<'_>,
    food: &PredatorFood,
    policy: DegenerateFoodPolicy,
    msp: SpeciesIndex,
    observer: &mut dyn PredationObserver,
    diagnostics: &mut PredationDiagnostics,
) -> Vec<f64> {
    let mut column = vec![0.0; inputs.n_size()];

    for nsz in inputs.growth().sizes(msp) {
        let prey = Cohort {
            species: msp,
            size: nsz,
        };
        let mut total = 0.0;

        for isp in SpeciesIndex::iter(inputs.n_species()) {
            for jsz in inputs.growth().sizes(isp) {
                let predator = Cohort {
                    species: isp,
                    size: jsz,
                };
                let numerator = inputs.ration().get(jsz, isp)
                    * inputs.abundance().get(jsz, isp)
                    * inputs.suitability().get(predator, prey);
                let denominator = food.denominator(isp, jsz);
                let contribution = term_ratio(numerator, denominator, policy);

                diagnostics.terms_evaluated += 1;
                if denominator == 0.0 {
                    diagnostics.degenerate_terms += 1;
                }
                observer.on_term(&PredationTerm {
                    prey,
                    predator,
                    numerator,
                    denominator,
                    contribution,
                });

                total += contribution;
            }
        }

        column[nsz.get()] = total;
    }

    column
}

#[inline]
fn term_ratio(numerator: f64, denominator: f64, policy: DegenerateFoodPolicy) -> f64 {
    if denominator == 0.0 && policy == DegenerateFoodPolicy::ZeroContribution {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mortality::hooks::CancelFlag;

    const TOL: f64 = 1e-12;

    fn sz(i: usize) -> SizeClass {
        SizeClass::new(i)
    }

    fn sp(j: usize) -> SpeciesIndex {
        SpeciesIndex::new(j)
    }

    /// Literal quadruple loop with the denominator recomputed per term.
    fn reference_m2(
        inputs: &PredationInputs<'_>,
        phi_min: f64,
        other_food: f64,
    ) -> SizeSpeciesMatrix {
        let (n_size, n_species) = (inputs.n_size(), inputs.n_species());
        let lim = inputs.growth().as_slice();
        let mut m2 = SizeSpeciesMatrix::zeros(n_size, n_species);
        for msp in 0..n_species {
            for nsz in 0..lim[msp] {
                let mut acc = 0.0;
                for isp in 0..n_species {
                    for jsz in 0..lim[isp] {
                        let pred = Cohort::new(isp, jsz);
                        let num = inputs.ration().get(sz(jsz), sp(isp))
                            * inputs.abundance().get(sz(jsz), sp(isp))
                            * inputs.suitability().get(pred, Cohort::new(msp, nsz));
                        let mut den = 0.0;
                        for lsp in 0..n_species {
                            for ksz in 0..n_size {
                                den += inputs.suitability().get(pred, Cohort::new(lsp, ksz))
                                    * inputs.weight().get(sz(ksz), sp(lsp))
                                    * inputs.abundance().get(sz(ksz), sp(lsp));
                            }
                        }
                        acc += num / (den + other_food);
                    }
                }
                m2.set(sz(nsz), sp(msp), acc * phi_min);
            }
        }
        m2
    }

    struct Model {
        n: SizeSpeciesMatrix,
        growth: GrowthLimits,
        ration: SizeSpeciesMatrix,
        wgt: SizeSpeciesMatrix,
        suit: Suitability,
    }

    impl Model {
        fn inputs(&self) -> PredationInputs<'_> {
            PredationInputs::from_abundance(&self.n, &self.growth, &self.ration, &self.wgt, &self.suit)
                .unwrap()
        }
    }

    /// Three species, five size classes, larger fish eat smaller fish.
    fn three_species() -> Model {
        let n_size = 5;
        let n_species = 3;
        Model {
            n: SizeSpeciesMatrix::from_fn(n_size, n_species, |s, p| {
                1000.0 / (1.0 + s.get() as f64) * (1.0 + 0.5 * p.get() as f64)
            }),
            growth: GrowthLimits::new(vec![5, 3, 4], n_size).unwrap(),
            ration: SizeSpeciesMatrix::from_fn(n_size, n_species, |s, _| 0.2 * (s.get() + 1) as f64),
            wgt: SizeSpeciesMatrix::from_fn(n_size, n_species, |s, _| ((s.get() + 1) as f64).powi(3)),
            suit: Suitability::from_fn(n_size, n_species, |pred, prey| {
                let gap = pred.size.get() as f64 - prey.size.get() as f64;
                if gap > 0.0 { (-(gap - 1.5).powi(2)).exp() } else { 0.0 }
            }),
        }
    }

    #[test]
    fn test_matches_reference_loop() {
        let model = three_species();
        let inputs = model.inputs();
        let config = PredationConfig::new(0.25, 50.0);
        let m2 = compute_m2(&inputs, &config).unwrap();
        let expected = reference_m2(&inputs, 0.25, 50.0);

        for s in 0..5 {
            for p in 0..3 {
                let (a, b) = (m2.get(sz(s), sp(p)), expected.get(sz(s), sp(p)));
                assert!((a - b).abs() <= TOL * b.abs().max(1.0), "({}, {}): {} vs {}", s, p, a, b);
            }
        }
    }

    #[test]
    fn test_single_predator_prey() {
        let ones = SizeSpeciesMatrix::constant(2, 1, 1.0);
        let mut suit = Suitability::zeros(2, 1);
        suit.set(Cohort::new(0, 1), Cohort::new(0, 0), 1.0);
        let m2 = calc_m2(2, 1, &ones, &[2.0], &ones, &ones, &suit, 1.0, 0.0).unwrap();

        assert!((m2.get(sz(0), sp(0)) - 1.0).abs() < TOL);
        assert_eq!(m2.get(sz(1), sp(0)), 0.0);
    }

    #[test]
    fn test_calc_m2_rejects_bad_scalars() {
        let ones = SizeSpeciesMatrix::constant(2, 1, 1.0);
        let suit = Suitability::zeros(2, 1);
        let err = calc_m2(2, 1, &ones, &[2.0], &ones, &ones, &suit, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, PredationError::InvalidParameter { name: "phi_min", .. }));

        let err = calc_m2(2, 1, &ones, &[2.5], &ones, &ones, &suit, 1.0, 0.0).unwrap_err();
        assert!(matches!(err, PredationError::InvalidGrowthLimit { .. }));

        let err = calc_m2(3, 1, &ones, &[2.0], &ones, &ones, &suit, 1.0, 0.0).unwrap_err();
        assert!(matches!(err, PredationError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_zero_growth_limit_species_is_inert() {
        let mut model = three_species();
        model.growth = GrowthLimits::new(vec![5, 0, 4], 5).unwrap();
        let inputs = model.inputs();
        let out = compute_m2_with(
            &inputs,
            &PredationConfig::new(1.0, 10.0),
            &NeverInterrupt,
            &mut |t: &PredationTerm| {
                assert_ne!(t.prey.species, sp(1));
                assert_ne!(t.predator.species, sp(1));
            },
        )
        .unwrap();
        assert_eq!(out.m2.column(sp(1)), vec![0.0; 5]);
        // Prey species 0 (5 classes) and 2 (4 classes), predators 5 + 4 cohorts
        assert_eq!(out.diagnostics.terms_evaluated, (5 + 4) * (5 + 4));
    }

    #[test]
    fn test_degenerate_zero_contribution() {
        // Predator class 0 prefers nothing, so its food is zero
        let ones = SizeSpeciesMatrix::constant(2, 1, 1.0);
        let growth = GrowthLimits::full(1, 2);
        let mut suit = Suitability::zeros(2, 1);
        suit.set(Cohort::new(0, 1), Cohort::new(0, 0), 1.0);
        let inputs = PredationInputs::from_abundance(&ones, &growth, &ones, &ones, &suit).unwrap();

        let out = compute_m2_with(&inputs, &PredationConfig::default(), &NeverInterrupt, &mut NoopObserver)
            .unwrap();
        assert!(out.m2.is_all_finite());
        assert!((out.m2.get(sz(0), sp(0)) - 1.0).abs() < TOL);
        assert_eq!(out.diagnostics.degenerate_cohorts, vec![Cohort::new(0, 0)]);
        // Two prey classes each see the zero-food predator once
        assert_eq!(out.diagnostics.degenerate_terms, 2);
        assert_eq!(out.diagnostics.non_finite_cells, 0);
    }

    #[test]
    fn test_degenerate_propagate() {
        let ones = SizeSpeciesMatrix::constant(2, 1, 1.0);
        let growth = GrowthLimits::full(1, 2);
        let mut suit = Suitability::zeros(2, 1);
        suit.set(Cohort::new(0, 1), Cohort::new(0, 0), 1.0);
        let inputs = PredationInputs::from_abundance(&ones, &growth, &ones, &ones, &suit).unwrap();
        let config =
            PredationConfig::default().with_degenerate_policy(DegenerateFoodPolicy::Propagate);

        let out = compute_m2_with(&inputs, &config, &NeverInterrupt, &mut NoopObserver).unwrap();
        // 0 / 0 from the zero-food predator
        assert!(out.m2.get(sz(0), sp(0)).is_nan());
        assert_eq!(out.diagnostics.non_finite_cells, 2);
    }

    #[test]
    fn test_cancel_before_first_species() {
        let model = three_species();
        let inputs = model.inputs();
        let flag = CancelFlag::new();
        flag.cancel();
        let err = compute_m2_with(&inputs, &PredationConfig::default(), &flag, &mut NoopObserver)
            .unwrap_err();
        assert_eq!(err, PredationError::Cancelled { prey_species: 0 });
    }

    #[test]
    fn test_cancel_midway_reports_species() {
        let model = three_species();
        let inputs = model.inputs();
        let checks = std::cell::Cell::new(0);
        let interrupt = || {
            checks.set(checks.get() + 1);
            checks.get() > 2
        };
        let err = compute_m2_with(&inputs, &PredationConfig::default(), &interrupt, &mut NoopObserver)
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(err, PredationError::Cancelled { prey_species: 2 });
    }

    #[test]
    fn test_observer_sees_every_term() {
        let model = three_species();
        let inputs = model.inputs();
        let config = PredationConfig::new(1.0, 50.0);
        let mut sum = SizeSpeciesMatrix::zeros(5, 3);
        let out = compute_m2_with(&inputs, &config, &NeverInterrupt, &mut |t: &PredationTerm| {
            assert!(t.denominator > 0.0);
            assert!((t.contribution - t.numerator / t.denominator).abs() < TOL);
            let prev = sum.get(t.prey.size, t.prey.species);
            sum.set(t.prey.size, t.prey.species, prev + t.contribution);
        })
        .unwrap();
        assert_eq!(sum, out.m2);
    }
}
