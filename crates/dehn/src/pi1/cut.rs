//! Cutting the surface along the anchor curve `c1 = x1`.
//!
//! `x2` crosses `c1` once, so `π1` is an HNN extension of the free group on
//! the other cores with stable letter `t = x2`. Rotating the relator to
//! `t⁻¹ a⁻¹ t · rest` gives the two boundary words of the cut surface,
//! `a = x1` and `V = rest⁻¹`, glued by `t⁻¹ a t = V⁻¹`.
//!
//! A cyclic word with no pinch `t⁻¹ aᵏ t` or `t Vᵏ t⁻¹` left crosses `c1`
//! once per stable letter, and this count is the geometric intersection
//! number of the free homotopy class with `c1`.

use std::collections::VecDeque;

use super::chord::boundary_relator;
use super::word::{canonical, cyclically_reduced, inverse, power, power_of, push_reduced, reduced};
use crate::error::{MappingClassError, Result};

const STABLE: i32 = 2;

#[derive(Clone, Debug)]
pub(crate) struct Cut {
    anchor: Vec<i32>,
    partner: Vec<i32>,
    /// Canonical forms of `a^±1` and `V^±1`.
    forms: [Vec<i32>; 4],
}

/// A stable letter with the base-group segment that follows it.
#[derive(Debug)]
struct Item {
    sign: i32,
    segment: Vec<i32>,
}

impl Cut {
    pub(crate) fn new(rank: usize) -> Result<Self> {
        if rank < 2 {
            return Err(MappingClassError::invalid_surface("cutting needs at least two generators"));
        }
        let relator = boundary_relator(rank);
        let n = relator.len();
        let start = (0..n)
            .find(|&k| (0..3).all(|j| relator[(k + j) % n] == [-STABLE, -1, STABLE][j]))
            .ok_or_else(|| MappingClassError::invalid_surface("relator lacks the x2⁻¹ x1⁻¹ x2 pattern"))?;
        let rest: Vec<i32> = (3..n).map(|j| relator[(start + j) % n]).collect();
        let partner = reduced(inverse(&rest));
        if partner.is_empty() || cyclically_reduced(partner.clone()) != partner {
            return Err(MappingClassError::invalid_surface("boundary word of the cut is not cyclically reduced"));
        }
        let anchor = vec![1];
        let forms = [
            canonical(anchor.clone()),
            canonical(inverse(&anchor)),
            canonical(partner.clone()),
            canonical(inverse(&partner)),
        ];
        Ok(Self {
            anchor,
            partner,
            forms,
        })
    }

    /// Replacement for `t^sign · segment · t^-sign`, if it pinches.
    fn pinched(&self, sign: i32, segment: &[i32]) -> Option<Vec<i32>> {
        if sign < 0 {
            power_of(segment, &self.anchor).map(|k| power(&self.partner, -k))
        } else {
            power_of(segment, &self.partner).map(|k| power(&self.anchor, -k))
        }
    }

    /// Britton-reduce a cyclic word. Returns the number of stable letters
    /// left and the canonical form of the reduced cyclic word.
    pub(crate) fn pinch(&self, word: &[i32]) -> (usize, Vec<i32>) {
        let word = cyclically_reduced(word.to_vec());
        let Some(first) = word.iter().position(|x| x.abs() == STABLE) else {
            return (0, canonical(word));
        };
        let n = word.len();
        let mut items: Vec<Item> = Vec::new();
        for x in (first..first + n).map(|k| word[k % n]) {
            match items.last_mut() {
                Some(last) if x.abs() != STABLE => last.segment.push(x),
                _ => items.push(Item {
                    sign: x.signum(),
                    segment: Vec::new(),
                }),
            }
        }
        let mut lead: Vec<i32> = Vec::new();
        let mut kept: Vec<Item> = Vec::with_capacity(items.len());
        for item in items {
            let merged = match kept.last() {
                Some(top) if top.sign == -item.sign => self.pinched(top.sign, &top.segment),
                _ => None,
            };
            match merged {
                Some(replacement) => {
                    kept.pop();
                    let target = match kept.last_mut() {
                        Some(top) => &mut top.segment,
                        None => &mut lead,
                    };
                    push_reduced(target, replacement);
                    push_reduced(target, item.segment);
                }
                None => kept.push(item),
            }
        }
        let mut ring: VecDeque<Item> = kept.into();
        match ring.back_mut() {
            Some(last) => push_reduced(&mut last.segment, lead),
            None => return (0, canonical(lead)),
        }
        while ring.len() >= 2 {
            let (Some(last), Some(head)) = (ring.back(), ring.front()) else {
                break;
            };
            if last.sign != -head.sign {
                break;
            }
            let Some(replacement) = self.pinched(last.sign, &last.segment) else {
                break;
            };
            ring.pop_back();
            let head = ring.pop_front();
            let tail = head.map(|h| h.segment).unwrap_or_default();
            match ring.back_mut() {
                Some(prev) => {
                    push_reduced(&mut prev.segment, replacement);
                    push_reduced(&mut prev.segment, tail);
                }
                None => {
                    let mut rest = replacement;
                    push_reduced(&mut rest, tail);
                    return (0, canonical(rest));
                }
            }
        }
        let crossings = ring.len();
        let mut letters = Vec::new();
        for item in ring {
            push_reduced(&mut letters, [item.sign * STABLE]);
            push_reduced(&mut letters, item.segment);
        }
        (crossings, canonical(letters))
    }

    /// Geometric intersection number of the free homotopy class with `c1`.
    #[inline]
    pub(crate) fn crossings(&self, word: &[i32]) -> usize {
        self.pinch(word).0
    }

    /// The class is `c1` itself, in either orientation.
    pub(crate) fn is_anchor(&self, word: &[i32]) -> bool {
        let (crossings, residue) = self.pinch(word);
        crossings == 0 && self.forms.contains(&residue)
    }
}
