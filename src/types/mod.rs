//! Strongly-typed domain types for safer APIs.
//!
//! The model indexes everything by (size class, species). Both are plain
//! ordinals, so newtypes keep `ration[(jsz, isp)]` from silently becoming
//! `ration[(isp, jsz)]`.
//!
//! # Example
//!
//! ```
//! use lemarns_m2::types::{Cohort, SizeClass, SpeciesIndex};
//!
//! let predator = Cohort::new(0, 3);
//! assert_eq!(predator.species, SpeciesIndex::new(0));
//! assert_eq!(predator.size, SizeClass::new(3));
//! ```

mod indices;

pub use indices::{Cohort, SizeClass, SpeciesIndex};
