//! Parallel M2 kernel using rayon.
//!
//! Prey species are distributed over the rayon pool. Each task owns its
//! output column and accumulators; the predator food table is built once
//! and shared read-only. Per-cell summation order matches the serial
//! kernel, so results are bit-identical to [`compute_m2_with`].
//!
//! [`compute_m2_with`]: crate::mortality::compute_m2_with

use log::debug;
use rayon::prelude::*;

use crate::error::PredationError;
use crate::model::SizeSpeciesMatrix;
use crate::mortality::config::PredationConfig;
use crate::mortality::diagnostics::{PredationDiagnostics, PredationOutcome};
use crate::mortality::food::PredatorFood;
use crate::mortality::hooks::{Interrupt, NoopObserver};
use crate::mortality::inputs::PredationInputs;
use crate::mortality::m2::{finish, prey_column, start_diagnostics};
use crate::types::{SizeClass, SpeciesIndex};

/// Compute M2 in parallel over prey species.
///
/// The interrupt is checked by each task before it starts its species.
/// If any check fires, the whole call returns [`PredationError::Cancelled`].
pub fn compute_m2_parallel(
    inputs: &PredationInputs<'_>,
    config: &PredationConfig,
    interrupt: &(dyn Interrupt + Sync),
) -> Result<PredationOutcome, PredationError> {
    config.validate()?;
    debug!(
        "computing M2 in parallel: n_size={}, n_species={}, threads={}",
        inputs.n_size(),
        inputs.n_species(),
        rayon::current_num_threads()
    );

    let food = PredatorFood::compute_parallel(inputs, config.other_food)?;
    let mut diagnostics = start_diagnostics(inputs, &food, config.degenerate_policy);
    let policy = config.degenerate_policy;

    let columns: Vec<(Vec<f64>, PredationDiagnostics)> = (0..inputs.n_species())
        .into_par_iter()
        .map(|msp| {
            if interrupt.should_stop() {
                return Err(PredationError::Cancelled { prey_species: msp });
            }
            let mut local = PredationDiagnostics::default();
            let column = prey_column(
                inputs,
                &food,
                policy,
                SpeciesIndex::new(msp),
                &mut NoopObserver,
                &mut local,
            );
            Ok((column, local))
        })
        .collect::<Result<_, _>>()?;

    let mut m2 = SizeSpeciesMatrix::zeros(inputs.n_size(), inputs.n_species());
    for (msp, (column, local)) in columns.into_iter().enumerate() {
        diagnostics.absorb_terms(&local);
        for (nsz, value) in column.into_iter().enumerate() {
            m2.set(SizeClass::new(nsz), SpeciesIndex::new(msp), value);
        }
    }

    Ok(finish(m2, config.phi_min, diagnostics))
}
