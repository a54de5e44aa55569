//! # lemarns-m2
//!
//! Predation mortality (M2) for length-structured multispecies fish
//! population models.
//!
//! This crate provides:
//! - Typed size-class and species indices
//! - Size × species matrices (abundance, ration, weight) backed by `faer`
//! - A 4-axis predator/prey suitability tensor, with import from the
//!   flattened cube layout of numeric bindings
//! - The M2 kernel, with optional cancellation, per-term observation and
//!   a rayon-parallel variant (feature `parallel`)
//!
//! # Example
//!
//! ```
//! use lemarns_m2::{
//!     Cohort, GrowthLimits, PredationConfig, PredationInputs, SizeClass, SizeSpeciesMatrix,
//!     SpeciesIndex, Suitability, compute_m2,
//! };
//!
//! // One species, two size classes; class 1 eats class 0.
//! let ones = SizeSpeciesMatrix::constant(2, 1, 1.0);
//! let growth = GrowthLimits::full(1, 2);
//! let mut suit = Suitability::zeros(2, 1);
//! suit.set(Cohort::new(0, 1), Cohort::new(0, 0), 1.0);
//!
//! let inputs = PredationInputs::from_abundance(&ones, &growth, &ones, &ones, &suit).unwrap();
//! let m2 = compute_m2(&inputs, &PredationConfig::new(1.0, 0.0)).unwrap();
//! assert_eq!(m2.get(SizeClass::new(0), SpeciesIndex::new(0)), 1.0);
//! assert_eq!(m2.get(SizeClass::new(1), SpeciesIndex::new(0)), 0.0);
//! ```

pub mod error;
pub mod model;
pub mod mortality;
pub mod types;

pub use error::PredationError;
pub use model::{GrowthLimits, SizeSpeciesMatrix, Suitability};
pub use mortality::{
    CancelFlag, DegenerateFoodPolicy, Interrupt, NeverInterrupt, NoopObserver,
    PredationConfig, PredationDiagnostics, PredationInputs, PredationObserver,
    PredationOutcome, PredationTerm, PredatorFood, calc_m2, compute_m2, compute_m2_with,
};
#[cfg(feature = "parallel")]
pub use mortality::compute_m2_parallel;
pub use types::{Cohort, SizeClass, SpeciesIndex};
