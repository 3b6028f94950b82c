//! Automorphisms of the free group on `x1 … x(2g)`, stored by generator images.

use super::word::{abelianized, inverse_letters, push_reduced};

/// `x_k ↦ images[k − 1]`, all images freely reduced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Automorphism {
    images: Vec<Vec<i32>>,
}

impl Automorphism {
    pub(crate) fn identity(rank: usize) -> Self {
        Self {
            images: (1..=rank as i32).map(|k| vec![k]).collect(),
        }
    }

    pub(crate) fn from_images(images: Vec<Vec<i32>>) -> Self {
        Self { images }
    }

    #[inline]
    pub(crate) fn rank(&self) -> usize {
        self.images.len()
    }

    /// Image of a letter appended to `out` with free cancellation.
    ///
    /// Letters must lie in `±1 ..= ±rank`; `Curve` checks this on construction.
    #[inline]
    pub(crate) fn push_image(&self, out: &mut Vec<i32>, letter: i32) {
        let image = &self.images[letter.unsigned_abs() as usize - 1];
        if letter > 0 {
            push_reduced(out, image.iter().copied());
        } else {
            push_reduced(out, inverse_letters(image));
        }
    }

    /// `φ(word)`, freely reduced.
    pub(crate) fn apply(&self, word: &[i32]) -> Vec<i32> {
        let mut out = Vec::with_capacity(word.len());
        for &x in word {
            self.push_image(&mut out, x);
        }
        out
    }

    /// `self ∘ inner`: `inner` acts first.
    pub(crate) fn compose(&self, inner: &Automorphism) -> Automorphism {
        Automorphism {
            images: inner.images.iter().map(|w| self.apply(w)).collect(),
        }
    }

    /// Non-zero entries of `A − I`, where `A` is the induced map on
    /// `H1 = Z^rank` (column `j` is the class of the image of `x_(j+1)`).
    /// Entries are `(row, column, value)`, 0-based.
    pub(crate) fn homology_shift(&self) -> Vec<(usize, usize, i64)> {
        let rank = self.rank();
        let mut entries = Vec::new();
        for (col, image) in self.images.iter().enumerate() {
            let mut class = abelianized(image, rank);
            class[col] -= 1;
            entries.extend(
                class
                    .into_iter()
                    .enumerate()
                    .filter(|&(_, v)| v != 0)
                    .map(|(row, v)| (row, col, v)),
            );
        }
        entries
    }
}
