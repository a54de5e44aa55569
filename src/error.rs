//! Error types for predation mortality calculations.

use thiserror::Error;

/// Errors that can occur while validating inputs or computing M2.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredationError {
    /// An input's shape disagrees with (nSize, nSpecies).
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: String,
        actual: String,
    },

    /// A growth limit (scLinf entry) exceeds the number of size classes.
    #[error("Growth limit for species {species} is {value}, exceeds n_size = {n_size}")]
    GrowthLimitOutOfRange {
        species: usize,
        value: usize,
        n_size: usize,
    },

    /// A growth limit is negative, fractional, or not finite.
    #[error("Growth limit for species {species} is not a non-negative integer: {value}")]
    InvalidGrowthLimit { species: usize, value: f64 },

    /// A scalar parameter is outside its admissible range.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The caller requested cancellation; no output was produced.
    #[error("Computation cancelled before prey species {prey_species}")]
    Cancelled { prey_species: usize },
}

impl PredationError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(
        what: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::DimensionMismatch {
            what,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// True if this is the cancellation outcome rather than a validation failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
