//! Bounded order search.
//!
//! States: `Searching → Found(k)`, `Searching → Infinite` or
//! `Searching → Exhausted`; all three are terminal.
//!
//! The runner threads the homology images of the basis forward,
//! `images_k = word(images_(k−1))`, which costs one transvection per letter
//! and step. Only at the first `k` with trivial homology action does it run
//! the geometric witness test on `word^k`:
//! - finite-order mapping classes act faithfully on `H1`, so the order of a
//!   finite-order word is exactly that first `k`;
//! - if `word^k` is non-trivial there, it is a non-trivial Torelli element,
//!   which has infinite order, and so does the word.
//!
//! A finite-order class on `S_g` has order at most `4g + 2` (Wiman), so a
//! search that passes that bound without a return has proven infinite order.

use num_bigint::BigInt;

use crate::error::Result;
use crate::word::MappingClassWord;

use super::cfg::OrderCfg;
use super::identity::{fixes_witnesses, unit};

/// Outcome of the order search.
///
/// `Exhausted` is a decidability limit of a bounded search: the ceiling was
/// reached before the word was classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderSearch {
    Found(usize),
    Infinite,
    Exhausted { tested: usize },
}

impl OrderSearch {
    /// Integer form: the order, or 0 for "no finite order found".
    #[inline]
    pub fn as_sentinel(&self) -> usize {
        match *self {
            OrderSearch::Found(k) => k,
            OrderSearch::Infinite | OrderSearch::Exhausted { .. } => 0,
        }
    }

    #[inline]
    pub fn order(&self) -> Option<usize> {
        match *self {
            OrderSearch::Found(k) => Some(k),
            OrderSearch::Infinite | OrderSearch::Exhausted { .. } => None,
        }
    }
}

/// Largest order of a periodic mapping class of a closed genus-g surface.
#[inline]
pub fn max_finite_order(genus: usize) -> usize {
    4 * genus + 2
}

/// Smallest `k` in `1..=cfg.max_iterations` with `word^k` trivial.
pub fn find_order(word: &MappingClassWord, cfg: OrderCfg) -> Result<OrderSearch> {
    OrderRunner::new(word, cfg).run()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Searching,
    Found(usize),
    Infinite,
    Exhausted,
}

struct OrderRunner<'a> {
    word: &'a MappingClassWord,
    cfg: OrderCfg,
    bound: usize,
    basis: Vec<Vec<BigInt>>,
    images: Vec<Vec<BigInt>>,
    count: usize,
    state: State,
}

impl<'a> OrderRunner<'a> {
    fn new(word: &'a MappingClassWord, cfg: OrderCfg) -> Self {
        let rank = word.model().rank();
        let basis: Vec<Vec<BigInt>> = (0..rank).map(|k| unit(rank, k)).collect();
        Self {
            word,
            cfg,
            bound: max_finite_order(word.model().genus()),
            images: basis.clone(),
            basis,
            count: 0,
            state: State::Searching,
        }
    }

    fn run(mut self) -> Result<OrderSearch> {
        while self.state == State::Searching {
            self.step()?;
        }
        let out = match self.state {
            State::Found(k) => OrderSearch::Found(k),
            State::Infinite => OrderSearch::Infinite,
            _ => OrderSearch::Exhausted { tested: self.count },
        };
        tracing::debug!(letters = self.word.len(), outcome = ?out, "order search");
        Ok(out)
    }

    fn step(&mut self) -> Result<()> {
        if self.count >= self.bound {
            self.state = State::Infinite;
            return Ok(());
        }
        if self.count >= self.cfg.max_iterations {
            self.state = State::Exhausted;
            return Ok(());
        }
        self.count += 1;
        self.images = self
            .images
            .iter()
            .map(|v| self.word.apply_homology(v))
            .collect::<Result<Vec<_>>>()?;
        tracing::trace!(power = self.count, "order step");
        if self.images == self.basis {
            self.state = if fixes_witnesses(self.word, self.count)? {
                State::Found(self.count)
            } else {
                State::Infinite
            };
        }
        Ok(())
    }
}
