//! Predation mortality (M2).
//!
//! - [`compute_m2`] / [`compute_m2_with`]: serial kernel, the latter with
//!   cancellation and per-term observation
//! - [`calc_m2`]: positional form taking the growth-limit vector as reals
//! - `compute_m2_parallel` (feature `parallel`): rayon over prey species

pub mod config;
pub mod diagnostics;
pub mod food;
pub mod hooks;
pub mod inputs;
pub mod m2;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use config::{DegenerateFoodPolicy, PredationConfig};
pub use diagnostics::{PredationDiagnostics, PredationOutcome};
pub use food::PredatorFood;
pub use hooks::{
    CancelFlag, Interrupt, NeverInterrupt, NoopObserver, PredationObserver, PredationTerm,
};
pub use inputs::PredationInputs;
pub use m2::{calc_m2, compute_m2, compute_m2_with};

#[cfg(feature = "parallel")]
pub use parallel::compute_m2_parallel;
