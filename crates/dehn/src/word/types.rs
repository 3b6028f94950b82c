//! Letters and the `MappingClassWord` value type.

use std::fmt;
use std::ops::Mul;
use std::sync::Arc;

use num_bigint::BigInt;

use crate::curve::Curve;
use crate::error::{MappingClassError, Result};
use crate::solve::{self, OrderCfg, StretchCfg, StretchEstimate};
use crate::surface::{same_model, SurfaceModel};
use crate::twist::{Handedness, TwistGenerator};

/// `T_{curve}^{exponent}`; positive exponents are left-handed twists.
///
/// Words only hold exponents in `-i64::MAX ..= i64::MAX`, so negation is total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Letter {
    pub curve: usize,
    pub exponent: i64,
}

impl Letter {
    #[inline]
    pub fn new(curve: usize, exponent: i64) -> Self {
        Self { curve, exponent }
    }

    #[inline]
    pub fn inverse(self) -> Self {
        Self {
            curve: self.curve,
            exponent: self.exponent.saturating_neg(),
        }
    }

    /// Reject `i64::MIN`, the one exponent without a negation.
    fn checked(self) -> Result<Self> {
        if self.exponent == i64::MIN {
            return Err(MappingClassError::ExponentOverflow { curve: self.curve });
        }
        Ok(self)
    }
}

/// Freely reduced word in the twists of one `SurfaceModel`.
///
/// Cheap to clone apart from the letter vector; the model is shared.
#[derive(Clone, Debug)]
pub struct MappingClassWord {
    model: Arc<SurfaceModel>,
    letters: Vec<Letter>,
}

impl MappingClassWord {
    /// The empty word; fixes every curve by construction.
    pub fn identity(model: &Arc<SurfaceModel>) -> Self {
        Self {
            model: Arc::clone(model),
            letters: Vec::new(),
        }
    }

    /// Unit word `T_curve` (left-handed).
    pub fn twist(model: &Arc<SurfaceModel>, curve: usize) -> Result<Self> {
        Self::from_letters(model, [Letter::new(curve, 1)])
    }

    /// Unit word for a named reference curve, e.g. `"c3"`.
    pub fn twist_named(model: &Arc<SurfaceModel>, name: &str) -> Result<Self> {
        Self::twist(model, model.reference().index_of(name)?)
    }

    /// Unit word of a generator; the handedness becomes the exponent sign.
    pub fn from_generator(model: &Arc<SurfaceModel>, generator: &TwistGenerator) -> Result<Self> {
        MappingClassError::check_dim(model.dim(), generator.dim())?;
        Self::from_letters(
            model,
            [Letter::new(generator.index(), generator.handedness().sign())],
        )
    }

    /// Validate curve indices and reduce.
    pub fn from_letters(
        model: &Arc<SurfaceModel>,
        letters: impl IntoIterator<Item = Letter>,
    ) -> Result<Self> {
        let mut word = Self::identity(model);
        for letter in letters {
            model.reference().curve(letter.curve)?;
            word.push(letter)?;
        }
        Ok(word)
    }

    /// Parse text such as `"c1 c2^-1 c3^2"`; see `word::parse`.
    pub fn parse(model: &Arc<SurfaceModel>, text: &str) -> Result<Self> {
        let letters = super::parse::parse_letters(model.reference(), text)?;
        Self::from_letters(model, letters)
    }

    #[inline]
    pub fn model(&self) -> &Arc<SurfaceModel> {
        &self.model
    }

    #[inline]
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Number of letters after reduction.
    #[inline]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Sum of `|exponent|` over letters, i.e. the number of single twists applied.
    pub fn twist_count(&self) -> u64 {
        self.letters.iter().map(|l| l.exponent.unsigned_abs()).sum()
    }

    /// Append one letter, merging with the last letter on the same curve.
    fn push(&mut self, letter: Letter) -> Result<()> {
        let letter = letter.checked()?;
        if letter.exponent == 0 {
            return Ok(());
        }
        match self.letters.last_mut() {
            Some(last) if last.curve == letter.curve => {
                let sum = last
                    .exponent
                    .checked_add(letter.exponent)
                    .ok_or(MappingClassError::ExponentOverflow { curve: letter.curve })?;
                let merged = Letter::new(letter.curve, sum).checked()?;
                if merged.exponent == 0 {
                    self.letters.pop();
                } else {
                    *last = merged;
                }
            }
            _ => self.letters.push(letter),
        }
        Ok(())
    }

    /// `self * other`: `other` acts first.
    pub fn compose(&self, other: &MappingClassWord) -> Result<Self> {
        if !same_model(&self.model, &other.model) {
            return Err(MappingClassError::SurfaceMismatch);
        }
        let mut out = self.clone();
        for &letter in &other.letters {
            out.push(letter)?;
        }
        Ok(out)
    }

    /// Reversed letters with negated exponents.
    pub fn inverse(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            letters: self.letters.iter().rev().map(|l| l.inverse()).collect(),
        }
    }

    /// `self^n`; `n < 0` repeats the inverse, `n == 0` is the identity.
    ///
    /// Fails with `ExponentOverflow` when merging copies overflows an exponent.
    pub fn pow(&self, n: i64) -> Result<Self> {
        let base = if n < 0 { self.inverse() } else { self.clone() };
        let mut out = Self::identity(&self.model);
        for _ in 0..n.unsigned_abs() {
            for &letter in &base.letters {
                out.push(letter)?;
            }
        }
        Ok(out)
    }

    /// Thread `curve` through the letters, rightmost first.
    pub fn apply(&self, curve: &Curve) -> Result<Curve> {
        self.apply_within(curve, crate::twist::CURVE_LETTER_LIMIT)
    }

    /// `apply` failing with `CurveTooLong` once an intermediate curve word
    /// exceeds `limit` letters.
    pub fn apply_within(&self, curve: &Curve, limit: usize) -> Result<Curve> {
        MappingClassError::check_dim(self.model.rank(), curve.rank())?;
        let refs = self.model.reference();
        let mut current = curve.clone();
        for letter in self.letters.iter().rev() {
            let generator = refs.generator(letter.curve, Handedness::Left)?;
            current = generator.apply_power_within(&current, letter.exponent, limit)?;
        }
        Ok(current)
    }

    /// Action on a homology vector in the band basis, rightmost letter first.
    pub fn apply_homology(&self, v: &[BigInt]) -> Result<Vec<BigInt>> {
        MappingClassError::check_dim(self.model.rank(), v.len())?;
        let refs = self.model.reference();
        let mut current = v.to_vec();
        for letter in self.letters.iter().rev() {
            let generator = refs.generator(letter.curve, Handedness::Left)?;
            generator.apply_homology(&mut current, letter.exponent)?;
        }
        Ok(current)
    }

    /// Word problem: is this word the identity mapping class?
    pub fn is_identity(&self) -> Result<bool> {
        solve::is_identity(self)
    }

    /// Semantic equality, `is_identity(self * other⁻¹)`.
    pub fn equals(&self, other: &MappingClassWord) -> Result<bool> {
        solve::equals(self, other)
    }

    /// Smallest `k ≤ max_iterations` with `self^k` trivial, or 0 when there
    /// is none: either the word has infinite order or the bound ran out
    /// first. `solve::find_order` tells the two apart.
    pub fn order(&self, max_iterations: usize) -> Result<usize> {
        let cfg = OrderCfg { max_iterations };
        Ok(solve::find_order(self, cfg)?.as_sentinel())
    }

    /// `order` with the default bound.
    pub fn order_default(&self) -> Result<usize> {
        self.order(OrderCfg::default().max_iterations)
    }

    /// Converged stretch factor from the model's generic seed, or
    /// `NonConvergence` carrying the last ratio seen.
    pub fn stretch_factor(&self, cfg: StretchCfg) -> Result<f64> {
        let seed = self.model.generic_seed()?;
        self.estimate_stretch(&seed, cfg)?.into_result()
    }

    /// Full estimate (ratio history and convergence flag) from a given seed.
    pub fn estimate_stretch(&self, seed: &Curve, cfg: StretchCfg) -> Result<StretchEstimate> {
        solve::estimate_stretch_factor(self, seed, cfg)
    }
}

/// Structural equality on letters is not enough, so `==` runs the identity
/// test. Words on different models, or failing evaluations, compare unequal.
impl PartialEq for MappingClassWord {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

/// Text form accepted by `MappingClassWord::parse`, `id` for the empty word.
impl fmt::Display for MappingClassWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.letters.is_empty() {
            return f.write_str("id");
        }
        for (k, letter) in self.letters.iter().enumerate() {
            if k > 0 {
                f.write_str(" ")?;
            }
            match self.model.reference().curve(letter.curve) {
                Ok(curve) => f.write_str(&curve.name)?,
                Err(_) => write!(f, "#{}", letter.curve)?,
            }
            if letter.exponent != 1 {
                write!(f, "^{}", letter.exponent)?;
            }
        }
        Ok(())
    }
}

/// Operator form of `compose`.
///
/// # Panics
/// If the words live on different surface models (like adding matrices of
/// different shapes). Use `compose` to get an error instead.
impl Mul for &MappingClassWord {
    type Output = MappingClassWord;
    fn mul(self, rhs: &MappingClassWord) -> MappingClassWord {
        match self.compose(rhs) {
            Ok(w) => w,
            Err(e) => panic!("cannot compose words: {e}"),
        }
    }
}

impl Mul for MappingClassWord {
    type Output = MappingClassWord;
    #[inline]
    fn mul(self, rhs: MappingClassWord) -> MappingClassWord {
        &self * &rhs
    }
}
