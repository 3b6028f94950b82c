//! Chord-diagram model of a closed surface of genus g.
//!
//! Model
//! - A disk with `2g` bands glued to one boundary arc. Band `k` has its feet
//!   at `(0, 2)` for `k = 1` and `(2k − 3, 2k)` otherwise, so consecutive
//!   bands interleave and their cores `x_k` form a chain meeting once each.
//! - `π1` is generated by the band cores; reading the disk boundary gives the
//!   single relator.
//! - A closed curve is a cyclic sequence of band passes joined by chords of
//!   the disk. It is simple iff no two chords cross.
//! - The twist about such a curve pushes every band core across the chords it
//!   meets at its two feet; the result is an automorphism of the free group
//!   on the cores that preserves the relator.

use super::automorphism::Automorphism;
use super::word::push_reduced;
use crate::error::{MappingClassError, Result};

/// Foot positions are scaled so that parallel passes through one band get
/// distinct lanes between the integer feet.
const SCALE: i64 = 64;

/// One pass of a curve through band `generator` (1-based). Forward passes
/// run from the first foot to the second and read as `x_k`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Visit {
    pub generator: usize,
    pub forward: bool,
}

impl Visit {
    #[inline]
    pub fn forward(generator: usize) -> Self {
        Self {
            generator,
            forward: true,
        }
    }

    #[inline]
    pub fn backward(generator: usize) -> Self {
        Self {
            generator,
            forward: false,
        }
    }

    #[inline]
    fn letter(self) -> i32 {
        let k = self.generator as i32;
        if self.forward {
            k
        } else {
            -k
        }
    }
}

/// A closed curve drawn in the chord model, as its cyclic sequence of band
/// passes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChordPath {
    rank: usize,
    visits: Vec<Visit>,
}

#[derive(Clone, Copy, Debug)]
struct Chord {
    from: i64,
    to: i64,
    /// Index of the visit the chord leaves.
    after: usize,
}

impl Chord {
    #[inline]
    fn span(&self) -> (i64, i64) {
        (self.from.min(self.to), self.from.max(self.to))
    }

    #[inline]
    fn covers(&self, p: i64) -> bool {
        let (lo, hi) = self.span();
        lo < p && p < hi
    }
}

fn feet(generator: usize) -> (i64, i64) {
    let k = generator as i64;
    let (o, i) = if k == 1 { (0, 2) } else { (2 * k - 3, 2 * k) };
    (o * SCALE, i * SCALE)
}

impl ChordPath {
    /// Validate generator indices and lanes. Simplicity is a separate check,
    /// see `is_simple`.
    pub fn new(genus: usize, visits: Vec<Visit>) -> Result<Self> {
        let rank = 2 * genus;
        if visits.is_empty() {
            return Err(MappingClassError::invalid_surface("a chord path needs at least one band pass"));
        }
        let mut passes = vec![0i64; rank];
        for v in &visits {
            if v.generator == 0 || v.generator > rank {
                return Err(MappingClassError::UnknownGenerator {
                    letter: v.letter(),
                });
            }
            passes[v.generator - 1] += 1;
        }
        if passes.iter().any(|&p| p >= SCALE) {
            return Err(MappingClassError::invalid_surface(format!(
                "a band carries {SCALE} or more passes"
            )));
        }
        Ok(Self { rank, visits })
    }

    /// Path through the listed bands, all passes forward.
    pub fn through(genus: usize, generators: &[usize]) -> Result<Self> {
        Self::new(genus, generators.iter().copied().map(Visit::forward).collect())
    }

    #[inline]
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Rank of the free group the path lives in, `2g`.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The curve as a cyclic word in the band cores.
    pub fn word(&self) -> Vec<i32> {
        self.visits.iter().map(|v| v.letter()).collect()
    }

    /// Lane of each visit inside its band: the j-th pass through a band uses
    /// lane j + 1.
    fn lanes(&self) -> Vec<i64> {
        let mut seen = vec![0i64; self.rank];
        self.visits
            .iter()
            .map(|v| {
                seen[v.generator - 1] += 1;
                seen[v.generator - 1]
            })
            .collect()
    }

    fn chords(&self) -> Vec<Chord> {
        let n = self.visits.len();
        let lanes = self.lanes();
        (0..n)
            .map(|k| {
                let (v, w) = (self.visits[k], self.visits[(k + 1) % n]);
                let (o, i) = feet(v.generator);
                let from = if v.forward { i - lanes[k] } else { o + lanes[k] };
                let next = (k + 1) % n;
                let (o2, i2) = feet(w.generator);
                let to = if w.forward { o2 + lanes[next] } else { i2 - lanes[next] };
                Chord { from, to, after: k }
            })
            .collect()
    }

    /// No two chords cross inside the disk.
    pub fn is_simple(&self) -> bool {
        let chords = self.chords();
        chords.iter().enumerate().all(|(a, ca)| {
            chords
                .iter()
                .enumerate()
                .filter(|&(b, _)| b != a)
                .all(|(_, cb)| ca.covers(cb.from) == ca.covers(cb.to))
        })
    }

    /// Append the loop that starts right after chord `after`, read forwards
    /// or backwards.
    fn push_loop(&self, out: &mut Vec<i32>, after: usize, forwards: bool) {
        let n = self.visits.len();
        let letters = (0..n).map(|j| self.visits[(after + 1 + j) % n].letter());
        if forwards {
            push_reduced(out, letters);
        } else {
            let loop_word: Vec<i32> = letters.collect();
            push_reduced(out, loop_word.iter().rev().map(|&x| -x));
        }
    }

    /// Twist automorphism, `sign = +1` for the positive twist and `−1` for
    /// its exact inverse. Only meaningful for simple paths.
    pub(crate) fn twist(&self, sign: i32) -> Automorphism {
        let chords = self.chords();
        let images = (1..=self.rank)
            .map(|x| {
                let (o, i) = feet(x);
                let mut image = Vec::new();
                for (dir, after) in crossings(&chords, o) {
                    self.push_loop(&mut image, after, dir * sign > 0);
                }
                push_reduced(&mut image, [x as i32]);
                for (dir, after) in crossings(&chords, i).into_iter().rev() {
                    self.push_loop(&mut image, after, -dir * sign > 0);
                }
                image
            })
            .collect();
        Automorphism::from_images(images)
    }
}

/// Chords passing over foot `p`, outermost first, with their direction.
fn crossings(chords: &[Chord], p: i64) -> Vec<(i32, usize)> {
    let mut hits: Vec<(i64, i32, usize)> = chords
        .iter()
        .filter(|c| c.covers(p))
        .map(|c| {
            let (lo, hi) = c.span();
            (hi - lo, if c.from < c.to { 1 } else { -1 }, c.after)
        })
        .collect();
    hits.sort_unstable_by(|a, b| b.cmp(a));
    hits.into_iter().map(|(_, dir, after)| (dir, after)).collect()
}

/// The relator read along the disk boundary: every foot met sends the walk
/// to the far foot of its band.
pub(crate) fn boundary_relator(rank: usize) -> Vec<i32> {
    let mut marks: Vec<(i64, usize, bool)> = (1..=rank)
        .flat_map(|x| {
            let (o, i) = feet(x);
            [(o, x, true), (i, x, false)]
        })
        .collect();
    marks.sort_unstable();
    let mut word = Vec::with_capacity(2 * rank);
    let mut pos = -1;
    while word.len() < 2 * rank {
        let Some(&(_, x, first)) = marks.iter().find(|m| m.0 > pos) else {
            break;
        };
        let (o, i) = feet(x);
        if first {
            word.push(x as i32);
            pos = i;
        } else {
            word.push(-(x as i32));
            pos = o;
        }
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relator_visits_every_band_twice() {
        assert_eq!(boundary_relator(2), vec![1, -2, -1, 2]);
        assert_eq!(boundary_relator(4), vec![1, 3, -4, -3, -2, -1, 2, 4]);
        for genus in 1..=6 {
            let r = boundary_relator(2 * genus);
            assert_eq!(r.len(), 4 * genus);
            for x in 1..=(2 * genus) as i32 {
                assert_eq!(r.iter().filter(|&&y| y == x).count(), 1);
                assert_eq!(r.iter().filter(|&&y| y == -x).count(), 1);
            }
        }
    }

    #[test]
    fn chain_and_odd_paths_are_simple() {
        for genus in 1..=4 {
            for k in 1..=2 * genus {
                assert!(ChordPath::through(genus, &[k]).unwrap().is_simple());
            }
            let odd: Vec<usize> = (1..2 * genus).step_by(2).collect();
            assert!(ChordPath::through(genus, &odd).unwrap().is_simple());
        }
    }

    #[test]
    fn doubled_pass_is_not_simple() {
        let p = ChordPath::through(1, &[1, 1]).unwrap();
        assert!(!p.is_simple());
        assert_eq!(p.word(), vec![1, 1]);
    }

    #[test]
    fn bad_generators_are_rejected() {
        assert!(matches!(
            ChordPath::through(1, &[3]),
            Err(MappingClassError::UnknownGenerator { letter: 3 })
        ));
        assert!(ChordPath::new(2, Vec::new()).is_err());
    }

    #[test]
    fn twist_and_inverse_twist_cancel() {
        for genus in 1..=3 {
            let odd: Vec<usize> = (1..2 * genus).step_by(2).collect();
            let mut paths = vec![ChordPath::through(genus, &odd).unwrap()];
            paths.extend((1..=2 * genus).map(|k| ChordPath::through(genus, &[k]).unwrap()));
            for p in paths {
                let id = Automorphism::identity(2 * genus);
                assert_eq!(p.twist(1).compose(&p.twist(-1)), id);
                assert_eq!(p.twist(-1).compose(&p.twist(1)), id);
            }
        }
    }

    #[test]
    fn chain_twist_fixes_its_core_and_drags_the_neighbour() {
        let t1 = ChordPath::through(1, &[1]).unwrap().twist(1);
        assert_eq!(t1.apply(&[1]), vec![1]);
        assert_eq!(t1.apply(&[2]).len(), 2);
    }
}
