//! Word problem via homology and the witness family.

use num_bigint::BigInt;

use crate::error::Result;
use crate::word::MappingClassWord;

/// True iff `word` is the identity mapping class.
///
/// Two stages, cheapest first:
/// - the action on `H1` must be trivial, which rules out the hyperelliptic
///   involution and everything else with a non-trivial homology action;
/// - every witness curve must be isotopic to itself after the word acts,
///   which catches Torelli elements such as separating twists.
///
/// Sound as far as the witness family fills the surface; the standard chain
/// does.
pub fn is_identity(word: &MappingClassWord) -> Result<bool> {
    if word.is_empty() {
        return Ok(true);
    }
    if !acts_trivially_on_homology(word)? {
        return Ok(false);
    }
    fixes_witnesses(word, 1)
}

/// `is_identity(w1 * w2⁻¹)`; no free-group normal form involved.
pub fn equals(w1: &MappingClassWord, w2: &MappingClassWord) -> Result<bool> {
    let quotient = w1.compose(&w2.inverse())?;
    is_identity(&quotient)
}

pub(crate) fn acts_trivially_on_homology(word: &MappingClassWord) -> Result<bool> {
    let rank = word.model().rank();
    for k in 0..rank {
        let basis = unit(rank, k);
        if word.apply_homology(&basis)? != basis {
            return Ok(false);
        }
    }
    Ok(true)
}

/// `word^power` maps every witness onto itself.
pub(crate) fn fixes_witnesses(word: &MappingClassWord, power: usize) -> Result<bool> {
    let refs = word.model().reference();
    for index in word.model().witnesses().iter() {
        let mut image = refs.curve_word(index)?.clone();
        for _ in 0..power {
            image = word.apply(&image)?;
        }
        if !refs.is_reference_curve(index, &image)? {
            tracing::trace!(witness = index, "witness moved");
            return Ok(false);
        }
    }
    Ok(true)
}

pub(crate) fn unit(rank: usize, k: usize) -> Vec<BigInt> {
    let mut v = vec![BigInt::from(0); rank];
    v[k] = BigInt::from(1);
    v
}
