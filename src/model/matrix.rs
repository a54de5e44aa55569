//! nSize × nSpecies real matrices (abundance, ration, weight, M2).

use faer::Mat;

use crate::error::PredationError;
use crate::types::{SizeClass, SpeciesIndex};

/// A real matrix with one row per size class and one column per species.
///
/// Backed by a dense `faer::Mat<f64>`. Indexing with the typed
/// `(SizeClass, SpeciesIndex)` pair keeps row/column order explicit.
#[derive(Clone, Debug)]
pub struct SizeSpeciesMatrix {
    data: Mat<f64>,
}

impl SizeSpeciesMatrix {
    /// Zero matrix of shape (n_size, n_species).
    pub fn zeros(n_size: usize, n_species: usize) -> Self {
        Self {
            data: Mat::zeros(n_size, n_species),
        }
    }

    /// Constant-filled matrix.
    pub fn constant(n_size: usize, n_species: usize, value: f64) -> Self {
        Self::from_fn(n_size, n_species, |_, _| value)
    }

    /// Build from a function of (size class, species).
    pub fn from_fn(
        n_size: usize,
        n_species: usize,
        mut f: impl FnMut(SizeClass, SpeciesIndex) -> f64,
    ) -> Self {
        Self {
            data: Mat::from_fn(n_size, n_species, |i, j| {
                f(SizeClass::new(i), SpeciesIndex::new(j))
            }),
        }
    }

    /// Build from column-major values (one species column after another).
    ///
    /// This is the storage order of R and Armadillo matrices.
    ///
    /// # Errors
    /// `DimensionMismatch` if `values.len() != n_size * n_species`.
    pub fn from_column_major(
        n_size: usize,
        n_species: usize,
        values: &[f64],
    ) -> Result<Self, PredationError> {
        if values.len() != n_size * n_species {
            return Err(PredationError::dimension_mismatch(
                "column-major matrix data",
                format!("{} values", n_size * n_species),
                format!("{} values", values.len()),
            ));
        }
        Ok(Self::from_fn(n_size, n_species, |sz, sp| {
            values[sp.get() * n_size + sz.get()]
        }))
    }

    /// Build from per-species columns.
    ///
    /// # Errors
    /// `DimensionMismatch` if the columns have different lengths.
    pub fn from_columns(columns: &[Vec<f64>]) -> Result<Self, PredationError> {
        let n_species = columns.len();
        let n_size = columns.first().map_or(0, Vec::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != n_size) {
            return Err(PredationError::dimension_mismatch(
                "matrix column",
                format!("{} rows", n_size),
                format!("{} rows", bad.len()),
            ));
        }
        Ok(Self::from_fn(n_size, n_species, |sz, sp| {
            columns[sp.get()][sz.get()]
        }))
    }

    /// Number of size classes (rows).
    #[inline]
    pub fn n_size(&self) -> usize {
        self.data.nrows()
    }

    /// Number of species (columns).
    #[inline]
    pub fn n_species(&self) -> usize {
        self.data.ncols()
    }

    /// Shape as (n_size, n_species).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_size(), self.n_species())
    }

    #[inline]
    pub fn get(&self, size: SizeClass, species: SpeciesIndex) -> f64 {
        self.data[(size.get(), species.get())]
    }

    #[inline]
    pub fn set(&mut self, size: SizeClass, species: SpeciesIndex, value: f64) {
        self.data[(size.get(), species.get())] = value;
    }

    /// Multiply every entry by `factor` in place.
    pub fn scale(&mut self, factor: f64) {
        for j in 0..self.n_species() {
            for i in 0..self.n_size() {
                self.data[(i, j)] *= factor;
            }
        }
    }

    /// Copy of one species column.
    pub fn column(&self, species: SpeciesIndex) -> Vec<f64> {
        (0..self.n_size())
            .map(|i| self.data[(i, species.get())])
            .collect()
    }

    /// Values in column-major order.
    pub fn to_column_major(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.n_size() * self.n_species());
        for j in 0..self.n_species() {
            for i in 0..self.n_size() {
                out.push(self.data[(i, j)]);
            }
        }
        out
    }

    /// Maximum absolute entry (0 for an empty matrix).
    pub fn max_abs(&self) -> f64 {
        self.to_column_major()
            .into_iter()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// True if no entry is NaN or infinite.
    pub fn is_all_finite(&self) -> bool {
        self.to_column_major().iter().all(|v| v.is_finite())
    }

    /// Check that this matrix has the expected shape.
    pub(crate) fn expect_shape(
        &self,
        what: &'static str,
        n_size: usize,
        n_species: usize,
    ) -> Result<(), PredationError> {
        if self.shape() != (n_size, n_species) {
            return Err(PredationError::dimension_mismatch(
                what,
                format!("{}x{}", n_size, n_species),
                format!("{}x{}", self.n_size(), self.n_species()),
            ));
        }
        Ok(())
    }
}

impl PartialEq for SizeSpeciesMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.to_column_major() == other.to_column_major()
    }
}
