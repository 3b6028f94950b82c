//! Curves and their coordinates against a reference system.
//!
//! Model
//! - A `Curve` is the free homotopy class of an oriented closed curve, held
//!   as the canonical cyclic word in the band generators of `π1(S_g)`.
//!   Twists act on it exactly through `pi1::Automorphism`.
//! - A `CurveCoordinate` records, for every reference curve `r_j`, the
//!   geometric intersection number `i(γ, r_j)`. Entries are `BigInt` and
//!   non-negative; they grow multiplicatively with word length.
//! - Values are immutable; twisting always produces a fresh curve.
//!
//! Code cross-refs: `twist::TwistGenerator` (action),
//! `surface::ReferenceCurveSystem::coordinate_of` (measurement).

use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::error::{MappingClassError, Result};
use crate::pi1::word::{abelianized, canonical};
use crate::pi1::Automorphism;
use crate::surface::HomologyClass;

/// Free homotopy class of an oriented essential closed curve.
///
/// Invariants:
/// - letters lie in `±1 ..= ±rank` with `rank = 2g`;
/// - the word is cyclically reduced, non-empty, and rotated to its least
///   rotation, so equal classes compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Curve {
    rank: usize,
    letters: Vec<i32>,
}

impl Curve {
    /// Curve on the genus-g surface read off a word in `x1 … x(2g)`:
    /// `k` stands for `x_k`, `-k` for its inverse.
    pub fn new(genus: usize, letters: &[i32]) -> Result<Self> {
        Self::from_letters(2 * genus, letters.to_vec())
    }

    pub(crate) fn from_letters(rank: usize, letters: Vec<i32>) -> Result<Self> {
        if let Some(&letter) = letters
            .iter()
            .find(|x| x.unsigned_abs() == 0 || x.unsigned_abs() as usize > rank)
        {
            return Err(MappingClassError::UnknownGenerator { letter });
        }
        let letters = canonical(letters);
        if letters.is_empty() {
            return Err(MappingClassError::DegenerateCoordinate);
        }
        Ok(Self { rank, letters })
    }

    /// Image under an automorphism of the same rank. Automorphisms never
    /// send an essential class to the trivial one.
    pub(crate) fn mapped(&self, aut: &Automorphism) -> Self {
        Self {
            rank: self.rank,
            letters: canonical(aut.apply(&self.letters)),
        }
    }

    #[inline]
    pub fn letters(&self) -> &[i32] {
        &self.letters
    }

    /// Word length of the canonical representative.
    #[inline]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false for a constructed curve.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    pub fn genus(&self) -> usize {
        self.rank / 2
    }

    /// Homology class in the band basis `(x1, …, x(2g))`.
    pub fn homology(&self) -> HomologyClass {
        HomologyClass::from_raw(abelianized(&self.letters, self.rank))
    }
}

/// `x1 x2^-1 x3`.
impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, &x) in self.letters.iter().enumerate() {
            if k > 0 {
                f.write_str(" ")?;
            }
            if x > 0 {
                write!(f, "x{x}")?;
            } else {
                write!(f, "x{}^-1", -x)?;
            }
        }
        Ok(())
    }
}

/// One curve's intersection pattern with the reference curve system.
///
/// Invariants:
/// - non-empty and not all-zero (the zero vector represents no curve);
/// - equality is entrywise.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CurveCoordinate {
    entries: Vec<BigInt>,
}

impl CurveCoordinate {
    /// Wrap raw entries, rejecting the degenerate all-zero vector.
    pub fn new(entries: Vec<BigInt>) -> Result<Self> {
        if entries.iter().all(Zero::is_zero) {
            return Err(MappingClassError::DegenerateCoordinate);
        }
        Ok(Self { entries })
    }

    pub fn from_i64s(entries: &[i64]) -> Result<Self> {
        Self::new(entries.iter().copied().map(BigInt::from).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed coordinate; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[BigInt] {
        &self.entries
    }

    #[inline]
    pub fn entry(&self, j: usize) -> Option<&BigInt> {
        self.entries.get(j)
    }

    /// Sum of absolute values; the norm used by the stretch estimator.
    pub fn l1_norm(&self) -> BigInt {
        self.entries.iter().map(|x| x.abs()).sum()
    }
}
