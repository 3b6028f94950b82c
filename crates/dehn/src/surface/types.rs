//! Surface descriptor and homology classes in the band basis.

use crate::error::{MappingClassError, Result};

/// Immutable surface descriptor: genus and boundary count.
///
/// `new` accepts closed surfaces only (`boundaries == 0`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Surface {
    genus: usize,
    boundaries: usize,
}

impl Surface {
    pub fn new(genus: usize, boundaries: usize) -> Result<Self> {
        if genus == 0 {
            return Err(MappingClassError::invalid_surface(
                "genus must be positive (the sphere has trivial curve action)",
            ));
        }
        if boundaries > 0 {
            return Err(MappingClassError::invalid_surface(format!(
                "{boundaries} boundary components requested; only closed surfaces are modelled"
            )));
        }
        Ok(Self { genus, boundaries })
    }

    #[inline]
    pub fn closed(genus: usize) -> Result<Self> {
        Self::new(genus, 0)
    }

    #[inline]
    pub fn genus(&self) -> usize {
        self.genus
    }

    #[inline]
    pub fn boundaries(&self) -> usize {
        self.boundaries
    }

    /// Rank of first homology, `2g`.
    #[inline]
    pub fn homology_rank(&self) -> usize {
        2 * self.genus
    }
}

/// Integral homology class in the band basis `(x1, …, x(2g))`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HomologyClass(Vec<i64>);

impl HomologyClass {
    pub fn new(coeffs: Vec<i64>) -> Result<Self> {
        if coeffs.is_empty() || coeffs.len() % 2 != 0 {
            return Err(MappingClassError::invalid_surface(format!(
                "homology class needs an even, positive number of coefficients, got {}",
                coeffs.len()
            )));
        }
        Ok(Self(coeffs))
    }

    /// Coefficients already known to have length `2g`.
    pub(crate) fn from_raw(coeffs: Vec<i64>) -> Self {
        Self(coeffs)
    }

    pub fn zero(genus: usize) -> Self {
        Self(vec![0; 2 * genus])
    }

    /// Class of the band core `x_k` (1-based).
    pub fn generator(genus: usize, k: usize) -> Result<Self> {
        if k == 0 || k > 2 * genus {
            return Err(MappingClassError::UnknownGenerator {
                letter: i32::try_from(k).unwrap_or(i32::MAX),
            });
        }
        let mut v = vec![0; 2 * genus];
        v[k - 1] = 1;
        Ok(Self(v))
    }

    #[inline]
    pub fn genus(&self) -> usize {
        self.0.len() / 2
    }

    #[inline]
    pub fn coeffs(&self) -> &[i64] {
        &self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Gcd of the coefficients; 0 for the zero class.
    pub fn divisor(&self) -> u64 {
        self.0.iter().fold(0u64, |g, &c| gcd(g, c.unsigned_abs()))
    }

    /// Simple closed curves carry primitive classes (divisor 1) unless they
    /// separate (class 0).
    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.divisor() == 1
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
