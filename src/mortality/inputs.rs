//! Validated inputs of one M2 calculation.

use crate::error::PredationError;
use crate::model::{GrowthLimits, SizeSpeciesMatrix, Suitability};

/// Borrowed view over everything the kernel reads.
///
/// Construction checks every shape against (n_size, n_species), so the
/// kernel itself never indexes out of bounds. Fields are read-only once
/// validated:
///
/// ```compile_fail
/// use lemarns_m2::{GrowthLimits, PredationInputs, SizeSpeciesMatrix, Suitability};
///
/// let ones = SizeSpeciesMatrix::constant(3, 1, 1.0);
/// let small = SizeSpeciesMatrix::constant(1, 1, 1.0);
/// let growth = GrowthLimits::full(1, 3);
/// let suit = Suitability::zeros(3, 1);
/// let mut inputs = PredationInputs::from_abundance(&ones, &growth, &ones, &ones, &suit).unwrap();
/// inputs.ration = &small;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PredationInputs<'a> {
    abundance: &'a SizeSpeciesMatrix,
    growth: &'a GrowthLimits,
    ration: &'a SizeSpeciesMatrix,
    weight: &'a SizeSpeciesMatrix,
    suitability: &'a Suitability,
    n_size: usize,
    n_species: usize,
}

impl<'a> PredationInputs<'a> {
    /// Bundle and validate inputs.
    ///
    /// # Errors
    /// - `InvalidParameter` if `n_size` or `n_species` is zero
    /// - `DimensionMismatch` if any input disagrees with (n_size, n_species)
    /// - `GrowthLimitOutOfRange` if a growth limit exceeds `n_size`
    pub fn new(
        n_size: usize,
        n_species: usize,
        abundance: &'a SizeSpeciesMatrix,
        growth: &'a GrowthLimits,
        ration: &'a SizeSpeciesMatrix,
        weight: &'a SizeSpeciesMatrix,
        suitability: &'a Suitability,
    ) -> Result<Self, PredationError> {
        if n_size == 0 {
            return Err(PredationError::InvalidParameter {
                name: "n_size",
                value: 0.0,
                reason: "must be positive",
            });
        }
        if n_species == 0 {
            return Err(PredationError::InvalidParameter {
                name: "n_species",
                value: 0.0,
                reason: "must be positive",
            });
        }

        abundance.expect_shape("abundance", n_size, n_species)?;
        ration.expect_shape("ration", n_size, n_species)?;
        weight.expect_shape("weight", n_size, n_species)?;

        if growth.n_species() != n_species {
            return Err(PredationError::dimension_mismatch(
                "growth limits",
                format!("{} species", n_species),
                format!("{} species", growth.n_species()),
            ));
        }
        if let Some((species, &value)) = growth
            .as_slice()
            .iter()
            .enumerate()
            .find(|&(_, &l)| l > n_size)
        {
            return Err(PredationError::GrowthLimitOutOfRange {
                species,
                value,
                n_size,
            });
        }

        if suitability.n_size() != n_size || suitability.n_species() != n_species {
            return Err(PredationError::dimension_mismatch(
                "suitability",
                format!("n_size={}, n_species={}", n_size, n_species),
                format!(
                    "n_size={}, n_species={}",
                    suitability.n_size(),
                    suitability.n_species()
                ),
            ));
        }

        Ok(Self {
            abundance,
            growth,
            ration,
            weight,
            suitability,
            n_size,
            n_species,
        })
    }

    /// Bundle inputs, taking the shape from the abundance matrix.
    pub fn from_abundance(
        abundance: &'a SizeSpeciesMatrix,
        growth: &'a GrowthLimits,
        ration: &'a SizeSpeciesMatrix,
        weight: &'a SizeSpeciesMatrix,
        suitability: &'a Suitability,
    ) -> Result<Self, PredationError> {
        let (n_size, n_species) = abundance.shape();
        Self::new(
            n_size,
            n_species,
            abundance,
            growth,
            ration,
            weight,
            suitability,
        )
    }

    /// Abundance N (individuals).
    #[inline]
    pub fn abundance(&self) -> &'a SizeSpeciesMatrix {
        self.abundance
    }

    /// Growth limits scLinf.
    #[inline]
    pub fn growth(&self) -> &'a GrowthLimits {
        self.growth
    }

    /// Ration per predator cohort.
    #[inline]
    pub fn ration(&self) -> &'a SizeSpeciesMatrix {
        self.ration
    }

    /// Mean body weight (g).
    #[inline]
    pub fn weight(&self) -> &'a SizeSpeciesMatrix {
        self.weight
    }

    /// Predator/prey preference tensor.
    #[inline]
    pub fn suitability(&self) -> &'a Suitability {
        self.suitability
    }

    #[inline]
    pub fn n_size(&self) -> usize {
        self.n_size
    }

    #[inline]
    pub fn n_species(&self) -> usize {
        self.n_species
    }
}
