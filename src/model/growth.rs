//! Per-species growth limits (scLinf).
//!
//! `scLinf[sp]` is the number of size classes species `sp` passes through
//! before reaching its asymptotic length. Size classes at or above the
//! limit do not exist for that species and are skipped everywhere.

use crate::error::PredationError;
use crate::types::{SizeClass, SpeciesIndex};

/// Validated growth limits, one per species, each in `[0, n_size]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrowthLimits {
    limits: Vec<usize>,
    n_size: usize,
}

impl GrowthLimits {
    /// Create growth limits for a model with `n_size` size classes.
    ///
    /// # Errors
    /// `GrowthLimitOutOfRange` if any limit exceeds `n_size`.
    pub fn new(limits: Vec<usize>, n_size: usize) -> Result<Self, PredationError> {
        if let Some((species, &value)) = limits.iter().enumerate().find(|&(_, &l)| l > n_size) {
            return Err(PredationError::GrowthLimitOutOfRange {
                species,
                value,
                n_size,
            });
        }
        Ok(Self { limits, n_size })
    }

    /// Every species spans all `n_size` classes.
    pub fn full(n_species: usize, n_size: usize) -> Self {
        Self {
            limits: vec![n_size; n_species],
            n_size,
        }
    }

    /// Convert the real-valued vector handed over by numeric bindings.
    ///
    /// Each value must be a finite, non-negative integer.
    pub fn from_f64_slice(values: &[f64], n_size: usize) -> Result<Self, PredationError> {
        let mut limits = Vec::with_capacity(values.len());
        for (species, &value) in values.iter().enumerate() {
            if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
                return Err(PredationError::InvalidGrowthLimit { species, value });
            }
            limits.push(value as usize);
        }
        Self::new(limits, n_size)
    }

    /// Number of species.
    #[inline]
    pub fn n_species(&self) -> usize {
        self.limits.len()
    }

    /// Number of size classes the limits were validated against.
    #[inline]
    pub fn n_size(&self) -> usize {
        self.n_size
    }

    /// Growth limit for a species.
    #[inline]
    pub fn limit(&self, species: SpeciesIndex) -> usize {
        self.limits[species.get()]
    }

    /// True if `size` is a biologically valid class for `species`.
    #[inline]
    pub fn contains(&self, species: SpeciesIndex, size: SizeClass) -> bool {
        size.get() < self.limit(species)
    }

    /// Iterate over the valid size classes of a species.
    pub fn sizes(&self, species: SpeciesIndex) -> impl Iterator<Item = SizeClass> + ExactSizeIterator {
        SizeClass::iter(self.limit(species))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.limits
    }
}
