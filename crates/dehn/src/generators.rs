//! Standard generating sets, the hyperelliptic involution, and random words.
//!
//! All constructors look curves up by their standard names (`c0`, `c1`, …),
//! so they work on any model whose reference system uses those names.
//!
//! References
//! - Humphries generators: chain `c1 … c(2g)` plus `c0` meeting `c4` only.
//! - Hyperelliptic involution: `T_c1 ⋯ T_c(2g+1) T_c(2g+1) ⋯ T_c1`.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::surface::SurfaceModel;
use crate::twist::{Handedness, TwistGenerator};
use crate::word::{Letter, MappingClassWord};

/// Curve names of the chain `c1 … c(len)`.
fn chain_names(len: usize) -> impl Iterator<Item = String> {
    (1..=len).map(|k| format!("c{k}"))
}

fn humphries_names(genus: usize) -> Vec<String> {
    let mut names: Vec<String> = chain_names(2 * genus).collect();
    if genus >= 2 {
        names.insert(0, "c0".to_string());
    }
    names
}

fn indices(model: &SurfaceModel, names: &[String]) -> Result<Vec<usize>> {
    names
        .iter()
        .map(|n| model.reference().index_of(n))
        .collect()
}

/// Left-handed Humphries generators: `c0, c1, …, c(2g)` (`c1, c2` on the torus).
pub fn humphries_generators(model: &SurfaceModel) -> Result<Vec<TwistGenerator>> {
    indices(model, &humphries_names(model.genus()))?
        .into_iter()
        .map(|i| model.reference().generator(i, Handedness::Left))
        .collect()
}

/// Left-handed twists about the full chain `c1 … c(2g+1)`.
pub fn chain_generators(model: &SurfaceModel) -> Result<Vec<TwistGenerator>> {
    let names: Vec<String> = chain_names(2 * model.genus() + 1).collect();
    indices(model, &names)?
        .into_iter()
        .map(|i| model.reference().generator(i, Handedness::Left))
        .collect()
}

/// Unit words of the Humphries generators.
pub fn humphries_twists(model: &Arc<SurfaceModel>) -> Result<Vec<MappingClassWord>> {
    humphries_generators(model)?
        .iter()
        .map(|g| MappingClassWord::from_generator(model, g))
        .collect()
}

/// `T_c1 ⋯ T_c(2g+1) T_c(2g+1) ⋯ T_c1`, an element of order 2.
pub fn hyperelliptic_involution(model: &Arc<SurfaceModel>) -> Result<MappingClassWord> {
    let names: Vec<String> = chain_names(2 * model.genus() + 1).collect();
    let chain = indices(model, &names)?;
    let letters = chain
        .iter()
        .chain(chain.iter().rev())
        .map(|&i| Letter::new(i, 1));
    MappingClassWord::from_letters(model, letters)
}

/// Replay token to make random words reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer on seed and index.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Random word of `length` letters `T^{±1}` over the Humphries generators.
///
/// Consecutive letters may cancel, so the reduced word can be shorter.
pub fn random_word(
    model: &Arc<SurfaceModel>,
    length: usize,
    token: ReplayToken,
) -> Result<MappingClassWord> {
    let pool = indices(model, &humphries_names(model.genus()))?;
    let mut rng = token.to_std_rng();
    let letters: Vec<Letter> = (0..length)
        .map(|_| {
            let curve = pool[rng.gen_range(0..pool.len())];
            let exponent = if rng.gen_bool(0.5) { 1 } else { -1 };
            Letter::new(curve, exponent)
        })
        .collect();
    MappingClassWord::from_letters(model, letters)
}
