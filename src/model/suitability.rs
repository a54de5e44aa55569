//! Predator/prey size-preference (suitability) tensor.
//!
//! Suitability is a 4-axis relation over
//! (predator species, predator size, prey size, prey species) with values
//! in [0, 1]. It is stored densely in predator-major order so that the
//! full preference profile of one predator cohort is a contiguous slice:
//!
//! ```text
//! offset = ((isp * n_size + jsz) * n_size + ksz) * n_species + lsp
//! ```

use crate::error::PredationError;
use crate::types::{Cohort, SizeClass, SpeciesIndex};

/// Dense 4-axis suitability tensor with O(1) lookups.
#[derive(Clone, Debug, PartialEq)]
pub struct Suitability {
    data: Vec<f64>,
    n_size: usize,
    n_species: usize,
}

impl Suitability {
    /// All-zero tensor (no predator prefers anything).
    ///
    /// # Panics
    /// If `(n_size * n_species)^2` overflows `usize`.
    pub fn zeros(n_size: usize, n_species: usize) -> Self {
        let len = tensor_len(n_size, n_species).unwrap_or_else(|| {
            panic!(
                "suitability tensor for n_size={} n_species={} overflows usize",
                n_size, n_species
            )
        });
        Self {
            data: vec![0.0; len],
            n_size,
            n_species,
        }
    }

    /// Build from a function of (predator cohort, prey cohort).
    pub fn from_fn(
        n_size: usize,
        n_species: usize,
        mut f: impl FnMut(Cohort, Cohort) -> f64,
    ) -> Self {
        let mut s = Self::zeros(n_size, n_species);
        for isp in 0..n_species {
            for jsz in 0..n_size {
                for ksz in 0..n_size {
                    for lsp in 0..n_species {
                        let predator = Cohort::new(isp, jsz);
                        let prey = Cohort::new(lsp, ksz);
                        let idx = s.offset(predator, prey);
                        s.data[idx] = f(predator, prey);
                    }
                }
            }
        }
        s
    }

    /// Import the flattened 3-axis cube used by numeric-library bindings.
    ///
    /// The cube has shape `(n_species * n_size, n_size, n_species)`:
    /// - axis 0: `predator_species * n_size + predator_size`
    /// - axis 1: prey size class
    /// - axis 2: prey species
    ///
    /// `data` is column-major (axis 0 fastest), as an Armadillo `cube`.
    ///
    /// # Errors
    /// `DimensionMismatch` if `dims` or `data.len()` disagree with the model shape.
    pub fn from_flattened_cube(
        n_size: usize,
        n_species: usize,
        dims: (usize, usize, usize),
        data: &[f64],
    ) -> Result<Self, PredationError> {
        let too_large = || {
            PredationError::dimension_mismatch(
                "suitability cube",
                "a tensor addressable in usize",
                format!("n_size={}, n_species={}", n_size, n_species),
            )
        };
        let rows = n_species.checked_mul(n_size).ok_or_else(too_large)?;
        tensor_len(n_size, n_species).ok_or_else(too_large)?;

        let expected = (rows, n_size, n_species);
        if dims != expected {
            return Err(PredationError::dimension_mismatch(
                "suitability cube",
                format!("{}x{}x{}", expected.0, expected.1, expected.2),
                format!("{}x{}x{}", dims.0, dims.1, dims.2),
            ));
        }
        let (rows, cols, _) = dims;
        let len = rows * n_size * n_species;
        if data.len() != len {
            return Err(PredationError::dimension_mismatch(
                "suitability cube data",
                format!("{} values", len),
                format!("{} values", data.len()),
            ));
        }

        Ok(Self::from_fn(n_size, n_species, |predator, prey| {
            let row = predator.species.get() * n_size + predator.size.get();
            data[row + prey.size.get() * rows + prey.species.get() * rows * cols]
        }))
    }

    #[inline]
    pub fn n_size(&self) -> usize {
        self.n_size
    }

    #[inline]
    pub fn n_species(&self) -> usize {
        self.n_species
    }

    #[inline]
    fn offset(&self, predator: Cohort, prey: Cohort) -> usize {
        ((predator.species.get() * self.n_size + predator.size.get()) * self.n_size
            + prey.size.get())
            * self.n_species
            + prey.species.get()
    }

    /// Preference of `predator` for `prey`.
    #[inline]
    pub fn get(&self, predator: Cohort, prey: Cohort) -> f64 {
        self.data[self.offset(predator, prey)]
    }

    pub fn set(&mut self, predator: Cohort, prey: Cohort, value: f64) {
        let idx = self.offset(predator, prey);
        self.data[idx] = value;
    }

    /// Full preference profile of one predator cohort.
    ///
    /// The returned slice is indexed `prey_size * n_species + prey_species`.
    #[inline]
    pub fn predator_profile(&self, species: SpeciesIndex, size: SizeClass) -> &[f64] {
        let len = self.n_size * self.n_species;
        let start = (species.get() * self.n_size + size.get()) * len;
        &self.data[start..start + len]
    }

    /// Largest preference value (0 for an empty tensor).
    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }
}

/// Number of cells, `(n_size * n_species)^2`, if it fits in `usize`.
fn tensor_len(n_size: usize, n_species: usize) -> Option<usize> {
    let cohorts = n_size.checked_mul(n_species)?;
    cohorts.checked_mul(cohorts)
}
