//! Witness families for the identity test.
//!
//! Alexander method: a mapping class that preserves the isotopy class of
//! every curve of the chain `c1 … c(2g+1)` is the identity or the
//! hyperelliptic involution, and the involution acts as `−1` on homology.
//! The identity test therefore checks the homology action and then the
//! isotopy class of every witness.
//!
//! Custom families are accepted when their classes span `H1(S; Q)`; they are
//! only as discriminating as the curves chosen.

use super::reference::{class_rank, ReferenceCurveSystem};
use super::types::HomologyClass;
use crate::error::{MappingClassError, Result};

/// Fixed, read-only list of reference curves used as witnesses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WitnessFamily {
    curves: Vec<usize>,
    dim: usize,
}

impl WitnessFamily {
    /// The chain `c1 … c(2g+1)`.
    pub fn standard(reference: &ReferenceCurveSystem) -> Result<Self> {
        let g = reference.surface().genus();
        let names: Vec<String> = (1..=2 * g + 1).map(|k| format!("c{k}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        Self::from_names(reference, &names)
    }

    /// Caller-chosen witnesses, given by reference curve name.
    pub fn from_names(reference: &ReferenceCurveSystem, names: &[&str]) -> Result<Self> {
        let indices = names
            .iter()
            .map(|n| reference.index_of(n))
            .collect::<Result<Vec<_>>>()?;
        Self::from_indices(reference, indices)
    }

    /// Caller-chosen witnesses, given by reference curve index.
    pub fn from_indices(reference: &ReferenceCurveSystem, curves: Vec<usize>) -> Result<Self> {
        let expected = reference.surface().homology_rank();
        let classes = curves
            .iter()
            .map(|&i| reference.curve_word(i).map(|c| c.homology()))
            .collect::<Result<Vec<HomologyClass>>>()?;
        let refs: Vec<&HomologyClass> = classes.iter().collect();
        let rank = class_rank(&refs, expected);
        if rank != expected {
            return Err(MappingClassError::WitnessRank { rank, expected });
        }
        Ok(Self {
            curves,
            dim: reference.len(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Reference curve indices of the witnesses.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.curves
    }

    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.curves.iter().copied()
    }

    /// Size of the reference system the indices point into.
    pub(crate) fn dim(&self) -> usize {
        self.dim
    }
}
