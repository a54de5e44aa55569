//! Strongly-typed index newtypes.
//!
//! These types prevent mixing up the two ordinal axes of the model
//! (size class vs species), which share the same `usize` representation.

use std::fmt;

/// Macro to generate index newtypes with common functionality.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// First index (0).
            pub const ZERO: Self = Self(0);

            /// Create an iterator over [0, n) indices.
            pub fn iter(n: usize) -> impl Iterator<Item = $name> + ExactSizeIterator {
                (0..n).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }
    };
}

define_index!(
    /// Size-class (length bin) index.
    ///
    /// The size-class axis is shared by every species in the model.
    ///
    /// # Example
    ///
    /// ```
    /// use lemarns_m2::types::SizeClass;
    ///
    /// let sz = SizeClass::new(3);
    /// assert_eq!(sz.get(), 3);
    /// ```
    SizeClass,
    "sz"
);

define_index!(
    /// Species index.
    ///
    /// # Example
    ///
    /// ```
    /// use lemarns_m2::types::SpeciesIndex;
    ///
    /// let sp = SpeciesIndex::new(1);
    /// assert_eq!(sp.get(), 1);
    /// ```
    SpeciesIndex,
    "sp"
);

/// A predator or prey cohort: one species in one size class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cohort {
    pub species: SpeciesIndex,
    pub size: SizeClass,
}

impl Cohort {
    /// Create a cohort from raw indices.
    #[inline]
    pub const fn new(species: usize, size: usize) -> Self {
        Self {
            species: SpeciesIndex::new(species),
            size: SizeClass::new(size),
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.species, self.size)
    }
}
