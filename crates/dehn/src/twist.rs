//! Dehn twist generators acting on curves.
//!
//! A twist about reference curve `r_k` acts on `π1` by the automorphism read
//! off its chord path (`pi1::ChordPath::twist`); a curve is mapped by
//! applying it to the curve's word and re-canonicalizing. The inverse twist
//! uses the exact inverse automorphism, so `T⁻¹ ∘ T` is the identity on
//! words, not only on coordinates.
//!
//! On homology the twist is the transvection `v ↦ v + ⟨r_k, v⟩ r_k`, so
//! `A − I` squares to zero and `T^e` acts as `I + e (A − I)`.

use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::Zero;

use crate::curve::Curve;
use crate::error::{MappingClassError, Result};
use crate::pi1::{Automorphism, Cut};

/// Longest curve word a twist power may produce.
pub const CURVE_LETTER_LIMIT: usize = 1 << 24;

/// Twist direction. `Left` is the positive generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Handedness::Left => 1,
            Handedness::Right => -1,
        }
    }

    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }

    #[inline]
    pub fn from_sign(sign: i64) -> Self {
        if sign < 0 {
            Handedness::Right
        } else {
            Handedness::Left
        }
    }
}

/// Everything needed to twist about one reference curve, shared by both
/// handednesses.
#[derive(Debug)]
pub(crate) struct TwistAction {
    forward: Automorphism,
    backward: Automorphism,
    /// Non-zero entries of `A − I` on `H1`.
    shift: Vec<(usize, usize, i64)>,
    /// Carries the twist curve onto `c1`.
    unwind: Automorphism,
    cut: Arc<Cut>,
}

impl TwistAction {
    pub(crate) fn new(
        forward: Automorphism,
        backward: Automorphism,
        unwind: Automorphism,
        cut: Arc<Cut>,
    ) -> Self {
        let shift = forward.homology_shift();
        Self {
            forward,
            backward,
            shift,
            unwind,
            cut,
        }
    }

    #[inline]
    fn rank(&self) -> usize {
        self.forward.rank()
    }

    /// Geometric intersection of `curve` with the twist curve.
    pub(crate) fn crossings(&self, curve: &Curve) -> usize {
        self.cut.crossings(&self.unwind.apply(curve.letters()))
    }
}

/// Dehn twist about one reference curve; a pure function on curves.
///
/// Identified by `(index, handedness)`; carries the curve's row of the
/// intersection matrix so adjacency questions need no handle on the system.
#[derive(Clone, Debug)]
pub struct TwistGenerator {
    index: usize,
    handedness: Handedness,
    action: Arc<TwistAction>,
    crossings: Arc<[usize]>,
}

impl TwistGenerator {
    pub(crate) fn new(
        index: usize,
        handedness: Handedness,
        action: Arc<TwistAction>,
        crossings: Arc<[usize]>,
    ) -> Self {
        debug_assert!(index < crossings.len() && crossings[index] == 0);
        Self {
            index,
            handedness,
            action,
            crossings,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Number of reference curves of the owning system.
    #[inline]
    pub fn dim(&self) -> usize {
        self.crossings.len()
    }

    /// Rank of `π1`'s generating set, `2g`.
    #[inline]
    pub fn rank(&self) -> usize {
        self.action.rank()
    }

    /// Geometric intersection number `i(r_self, r_other)` of the two
    /// twisting curves.
    #[inline]
    pub fn intersection(&self, other: &TwistGenerator) -> usize {
        self.crossings.get(other.index).copied().unwrap_or(0)
    }

    /// Twists about disjoint curves commute.
    #[inline]
    pub fn commutes_with(&self, other: &TwistGenerator) -> bool {
        self.intersection(other) == 0
    }

    /// Geometric intersection of an arbitrary curve with the twist curve.
    pub fn crossings(&self, curve: &Curve) -> Result<usize> {
        MappingClassError::check_dim(self.rank(), curve.rank())?;
        Ok(self.action.crossings(curve))
    }

    /// Same curve, opposite handedness.
    pub fn inverse(&self) -> Self {
        Self {
            index: self.index,
            handedness: self.handedness.flip(),
            action: Arc::clone(&self.action),
            crossings: Arc::clone(&self.crossings),
        }
    }

    /// One twist.
    #[inline]
    pub fn apply(&self, curve: &Curve) -> Result<Curve> {
        self.apply_power(curve, 1)
    }

    /// `T^exponent`; negative exponents apply the inverse twist.
    #[inline]
    pub fn apply_power(&self, curve: &Curve, exponent: i64) -> Result<Curve> {
        self.apply_power_within(curve, exponent, CURVE_LETTER_LIMIT)
    }

    /// `apply_power` failing with `CurveTooLong` once the image word would
    /// exceed `limit` letters. Curves disjoint from the twist curve are
    /// fixed by every power.
    pub fn apply_power_within(&self, curve: &Curve, exponent: i64, limit: usize) -> Result<Curve> {
        MappingClassError::check_dim(self.rank(), curve.rank())?;
        let turns = self.turns(exponent)?;
        if turns == 0 {
            return Ok(curve.clone());
        }
        if turns.unsigned_abs() > limit as u64 {
            if self.action.crossings(curve) == 0 {
                return Ok(curve.clone());
            }
            return Err(MappingClassError::CurveTooLong { limit });
        }
        let aut = if turns > 0 {
            &self.action.forward
        } else {
            &self.action.backward
        };
        let mut current = curve.clone();
        for _ in 0..turns.unsigned_abs() {
            current = current.mapped(aut);
            if current.len() > limit {
                return Err(MappingClassError::CurveTooLong { limit });
            }
        }
        Ok(current)
    }

    /// `v ↦ (I + e (A − I)) v` on a homology vector in the band basis.
    pub fn apply_homology(&self, v: &mut [BigInt], exponent: i64) -> Result<()> {
        MappingClassError::check_dim(self.rank(), v.len())?;
        let turns = self.turns(exponent)?;
        if turns == 0 {
            return Ok(());
        }
        let mut delta = vec![BigInt::zero(); v.len()];
        for &(row, col, value) in &self.action.shift {
            if !v[col].is_zero() {
                delta[row] += &v[col] * value;
            }
        }
        for (x, d) in v.iter_mut().zip(delta) {
            if !d.is_zero() {
                *x += d * turns;
            }
        }
        Ok(())
    }

    /// Signed number of left twists in `T^exponent`.
    #[inline]
    fn turns(&self, exponent: i64) -> Result<i64> {
        self.handedness
            .sign()
            .checked_mul(exponent)
            .ok_or(MappingClassError::ExponentOverflow { curve: self.index })
    }
}

/// Generators are equal when they twist the same way about the same curve of
/// the same system.
impl PartialEq for TwistGenerator {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.handedness == other.handedness
            && self.crossings == other.crossings
            && (Arc::ptr_eq(&self.action, &other.action)
                || self.action.forward == other.action.forward)
    }
}

impl Eq for TwistGenerator {}
