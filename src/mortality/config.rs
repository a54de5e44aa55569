//! Scalar parameters of the M2 calculation.

use serde::{Deserialize, Serialize};

use crate::error::PredationError;

/// What to do with a predator cohort whose available food is exactly zero.
///
/// With no tracked prey weighted by its preferences and no `other_food`,
/// the ratio `numerator / denominator` is undefined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateFoodPolicy {
    /// The term contributes nothing to M2.
    #[default]
    ZeroContribution,
    /// Keep the IEEE result of the division (inf or NaN).
    Propagate,
}

/// Parameters of the predation mortality calculation.
///
/// # Example
///
/// ```
/// use lemarns_m2::mortality::{DegenerateFoodPolicy, PredationConfig};
///
/// let config = PredationConfig::new(0.1, 1e6)
///     .with_degenerate_policy(DegenerateFoodPolicy::Propagate);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredationConfig {
    /// Model time step (years). Must be positive.
    pub phi_min: f64,
    /// Background food biomass not tracked by the model (g).
    pub other_food: f64,
    /// Handling of zero-food predator cohorts.
    #[serde(default)]
    pub degenerate_policy: DegenerateFoodPolicy,
}

impl Default for PredationConfig {
    fn default() -> Self {
        Self {
            phi_min: 1.0,
            other_food: 0.0,
            degenerate_policy: DegenerateFoodPolicy::ZeroContribution,
        }
    }
}

impl PredationConfig {
    pub fn new(phi_min: f64, other_food: f64) -> Self {
        Self {
            phi_min,
            other_food,
            ..Self::default()
        }
    }

    /// Set the model time step.
    pub fn with_phi_min(mut self, phi_min: f64) -> Self {
        self.phi_min = phi_min;
        self
    }

    /// Set the background food biomass.
    pub fn with_other_food(mut self, other_food: f64) -> Self {
        self.other_food = other_food;
        self
    }

    /// Set the zero-food policy.
    pub fn with_degenerate_policy(mut self, policy: DegenerateFoodPolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Check scalar ranges.
    ///
    /// # Errors
    /// `InvalidParameter` if `phi_min` is not positive and finite, or
    /// `other_food` is negative or not finite.
    pub fn validate(&self) -> Result<(), PredationError> {
        if !(self.phi_min.is_finite() && self.phi_min > 0.0) {
            return Err(PredationError::InvalidParameter {
                name: "phi_min",
                value: self.phi_min,
                reason: "must be positive and finite",
            });
        }
        validate_other_food(self.other_food)
    }
}

/// Background food must be a finite, non-negative biomass.
pub(crate) fn validate_other_food(other_food: f64) -> Result<(), PredationError> {
    if !(other_food.is_finite() && other_food >= 0.0) {
        return Err(PredationError::InvalidParameter {
            name: "other_food",
            value: other_food,
            reason: "must be non-negative and finite",
        });
    }
    Ok(())
}
