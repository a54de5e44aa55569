//! Model data: size-by-species matrices, growth limits and suitability.

pub mod growth;
pub mod matrix;
pub mod suitability;

pub use growth::GrowthLimits;
pub use matrix::SizeSpeciesMatrix;
pub use suitability::Suitability;
