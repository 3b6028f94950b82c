//! Independent evaluation of many words over one shared model.

use rayon::prelude::*;

use crate::error::Result;
use crate::word::MappingClassWord;

use super::cfg::BatchCfg;
use super::identity::is_identity;
use super::order::{find_order, OrderSearch};
use super::stretch::{estimate_stretch_factor, StretchEstimate};

/// Identity test, order search and stretch estimate for one word.
#[derive(Clone, Debug, PartialEq)]
pub struct WordReport {
    pub identity: bool,
    pub order: OrderSearch,
    pub stretch: StretchEstimate,
}

/// Evaluate one word with the model's generic seed.
pub fn evaluate(word: &MappingClassWord, cfg: BatchCfg) -> Result<WordReport> {
    let seed = word.model().generic_seed()?;
    Ok(WordReport {
        identity: is_identity(word)?,
        order: find_order(word, cfg.order)?,
        stretch: estimate_stretch_factor(word, &seed, cfg.stretch)?,
    })
}

/// `evaluate` over all words in parallel; output order matches input order.
pub fn evaluate_batch(words: &[MappingClassWord], cfg: BatchCfg) -> Vec<Result<WordReport>> {
    tracing::debug!(words = words.len(), "batch evaluation");
    words.par_iter().map(|w| evaluate(w, cfg)).collect()
}
