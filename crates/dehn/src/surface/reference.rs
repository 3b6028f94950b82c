//! Reference curve systems and the standard chain + Humphries system.
//!
//! Standard system for genus g
//! - chain `c1 … c(2g+1)`: `c_k` is the band core `x_k` for `k ≤ 2g`, and
//!   `c(2g+1)` runs forward through the odd bands `x1 x3 … x(2g−1)`.
//!   Consecutive chain curves meet once; all other chain pairs are disjoint.
//! - Humphries curve `c0 = x1 x3` (g ≥ 2), meeting only `c4`. In genus 2 it
//!   is isotopic to `c5`, and in genus 1 `c3` is isotopic to `c1`.
//!
//! Measurement
//! - Every reference curve `r` gets an unwinding automorphism `h_r⁻¹` with
//!   `h_r⁻¹(r) = c1`. Then `i(γ, r) = i(h_r⁻¹ γ, c1)`, and the right-hand
//!   side is a pinch count in the cut along `c1` (`pi1::Cut`).
//! - Unwinders are found breadth-first from the curves isotopic to `c1`:
//!   when `i(r, s) = 1`, `r = T_s T_r (s)` up to handedness, so
//!   `h_r⁻¹ = h_s⁻¹ ∘ T_r⁻¹ ∘ T_s⁻¹`.

use std::sync::Arc;

use nalgebra::DMatrix;
use num_bigint::BigInt;
use rayon::prelude::*;

use super::types::{HomologyClass, Surface};
use crate::curve::{Curve, CurveCoordinate};
use crate::error::{MappingClassError, Result};
use crate::pi1::{Automorphism, ChordPath, Cut};
use crate::twist::{Handedness, TwistAction, TwistGenerator};

/// Rank tolerance for small-integer matrices.
const RANK_EPS: f64 = 1e-9;

/// Curves at least this long are measured against all reference curves in
/// parallel.
const PARALLEL_LETTERS: usize = 1 << 14;

/// A named, oriented reference curve drawn in the chord model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceCurve {
    pub name: String,
    pub path: ChordPath,
}

impl ReferenceCurve {
    pub fn new(name: impl Into<String>, path: ChordPath) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }
}

/// Ordered reference curves with their twist actions and intersection
/// matrix.
///
/// Invariants:
/// - every path lives on the system's surface, is simple, and carries a
///   primitive non-zero class; names are unique;
/// - the classes span homology over Q;
/// - `rows[i][j] = i(r_i, r_j)`, so `rows[i][i] = 0`.
#[derive(Clone, Debug)]
pub struct ReferenceCurveSystem {
    surface: Surface,
    curves: Vec<ReferenceCurve>,
    words: Vec<Curve>,
    unwinders: Vec<Automorphism>,
    rows: Vec<Arc<[usize]>>,
    actions: Vec<Arc<TwistAction>>,
    cut: Arc<Cut>,
}

impl ReferenceCurveSystem {
    pub fn new(surface: Surface, curves: Vec<ReferenceCurve>) -> Result<Self> {
        let rank = surface.homology_rank();
        let mut words = Vec::with_capacity(curves.len());
        for (i, c) in curves.iter().enumerate() {
            MappingClassError::check_dim(rank, c.path.rank())?;
            if curves[..i].iter().any(|d| d.name == c.name) {
                return Err(MappingClassError::invalid_surface(format!(
                    "duplicate reference curve name `{}`",
                    c.name
                )));
            }
            let word = Curve::from_letters(rank, c.path.word())?;
            let class = word.homology();
            if class.is_zero() {
                return Err(MappingClassError::invalid_surface(format!(
                    "reference curve `{}` is null-homologous",
                    c.name
                )));
            }
            if !class.is_primitive() {
                return Err(MappingClassError::invalid_surface(format!(
                    "class of reference curve `{}` is not primitive (divisible by {})",
                    c.name,
                    class.divisor()
                )));
            }
            if !c.path.is_simple() {
                return Err(MappingClassError::invalid_surface(format!(
                    "reference curve `{}` is not simple",
                    c.name
                )));
            }
            words.push(word);
        }
        let classes: Vec<HomologyClass> = words.iter().map(Curve::homology).collect();
        let refs: Vec<&HomologyClass> = classes.iter().collect();
        let found = class_rank(&refs, rank);
        if found != rank {
            return Err(MappingClassError::invalid_surface(format!(
                "reference classes span rank {found}, need {rank}"
            )));
        }
        let cut = Arc::new(Cut::new(rank)?);
        let forward: Vec<Automorphism> = curves.iter().map(|c| c.path.twist(1)).collect();
        let backward: Vec<Automorphism> = curves.iter().map(|c| c.path.twist(-1)).collect();
        let unwinders = unwinders(rank, &curves, &words, &forward, &backward, &cut)?;
        let rows: Vec<Arc<[usize]>> = unwinders
            .iter()
            .map(|u| {
                words
                    .iter()
                    .map(|w| cut.crossings(&u.apply(w.letters())))
                    .collect::<Vec<usize>>()
                    .into()
            })
            .collect();
        let actions = forward
            .into_iter()
            .zip(backward)
            .zip(&unwinders)
            .map(|((f, b), u)| Arc::new(TwistAction::new(f, b, u.clone(), Arc::clone(&cut))))
            .collect();
        tracing::debug!(genus = surface.genus(), curves = curves.len(), "reference system built");
        Ok(Self {
            surface,
            curves,
            words,
            unwinders,
            rows,
            actions,
            cut,
        })
    }

    /// Chain `c1 … c(2g+1)` followed by the Humphries curve `c0` (g ≥ 2).
    pub fn standard(surface: Surface) -> Result<Self> {
        let g = surface.genus();
        let mut curves = Vec::with_capacity(2 * g + 2);
        for k in 1..=2 * g {
            curves.push(ReferenceCurve::new(format!("c{k}"), ChordPath::through(g, &[k])?));
        }
        let odd: Vec<usize> = (1..2 * g).step_by(2).collect();
        curves.push(ReferenceCurve::new(
            format!("c{}", 2 * g + 1),
            ChordPath::through(g, &odd)?,
        ));
        if g >= 2 {
            curves.push(ReferenceCurve::new("c0", ChordPath::through(g, &[1, 3])?));
        }
        Self::new(surface, curves)
    }

    #[inline]
    pub fn surface(&self) -> Surface {
        self.surface
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    #[inline]
    pub fn curves(&self) -> &[ReferenceCurve] {
        &self.curves
    }

    pub fn curve(&self, index: usize) -> Result<&ReferenceCurve> {
        self.curves
            .get(index)
            .ok_or_else(|| MappingClassError::unknown_curve(format!("#{index}")))
    }

    /// Reference curve `index` as a `Curve`.
    pub fn curve_word(&self, index: usize) -> Result<&Curve> {
        self.words
            .get(index)
            .ok_or_else(|| MappingClassError::unknown_curve(format!("#{index}")))
    }

    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.curves
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| MappingClassError::unknown_curve(name))
    }

    /// `i(r_i, r_j)`; zero for out-of-range indices.
    #[inline]
    pub fn intersection(&self, i: usize, j: usize) -> usize {
        self.rows
            .get(i)
            .and_then(|row| row.get(j))
            .copied()
            .unwrap_or(0)
    }

    /// Coordinate `(i(γ, r_j))_j` of a curve.
    pub fn coordinate_of(&self, curve: &Curve) -> Result<CurveCoordinate> {
        MappingClassError::check_dim(self.surface.homology_rank(), curve.rank())?;
        let measure = |u: &Automorphism| BigInt::from(self.cut.crossings(&u.apply(curve.letters())));
        let entries: Vec<BigInt> = if curve.len() >= PARALLEL_LETTERS {
            self.unwinders.par_iter().map(measure).collect()
        } else {
            self.unwinders.iter().map(measure).collect()
        };
        CurveCoordinate::new(entries)
    }

    /// Coordinate of reference curve `index` itself (its row of the matrix).
    pub fn reference_coordinate(&self, index: usize) -> Result<CurveCoordinate> {
        self.coordinate_of(self.curve_word(index)?)
    }

    /// `curve` is isotopic to reference curve `index`, in either orientation.
    pub fn is_reference_curve(&self, index: usize, curve: &Curve) -> Result<bool> {
        MappingClassError::check_dim(self.surface.homology_rank(), curve.rank())?;
        let unwind = self
            .unwinders
            .get(index)
            .ok_or_else(|| MappingClassError::unknown_curve(format!("#{index}")))?;
        Ok(self.cut.is_anchor(&unwind.apply(curve.letters())))
    }

    pub fn generator(&self, index: usize, handedness: Handedness) -> Result<TwistGenerator> {
        let row = self
            .rows
            .get(index)
            .ok_or_else(|| MappingClassError::unknown_curve(format!("#{index}")))?;
        let action = &self.actions[index];
        Ok(TwistGenerator::new(
            index,
            handedness,
            Arc::clone(action),
            Arc::clone(row),
        ))
    }

    pub fn generator_by_name(&self, name: &str, handedness: Handedness) -> Result<TwistGenerator> {
        self.generator(self.index_of(name)?, handedness)
    }
}

/// The derived tables follow from the surface and the curves.
impl PartialEq for ReferenceCurveSystem {
    fn eq(&self, other: &Self) -> bool {
        self.surface == other.surface && self.curves == other.curves
    }
}

impl Eq for ReferenceCurveSystem {}

/// Breadth-first search for `h_r⁻¹` over the "meets once" graph.
fn unwinders(
    rank: usize,
    curves: &[ReferenceCurve],
    words: &[Curve],
    forward: &[Automorphism],
    backward: &[Automorphism],
    cut: &Cut,
) -> Result<Vec<Automorphism>> {
    let n = words.len();
    let mut found: Vec<Option<Automorphism>> = words
        .iter()
        .map(|w| cut.is_anchor(w.letters()).then(|| Automorphism::identity(rank)))
        .collect();
    let mut changed = true;
    while changed {
        changed = false;
        for r in 0..n {
            if found[r].is_some() {
                continue;
            }
            let word = words[r].letters();
            let mut next = None;
            for s in 0..n {
                let Some(unwind_s) = &found[s] else {
                    continue;
                };
                let seen = unwind_s.apply(word);
                if cut.is_anchor(&seen) {
                    next = Some(unwind_s.clone());
                    break;
                }
                if cut.crossings(&seen) != 1 {
                    continue;
                }
                let candidates = [
                    backward[r].compose(&backward[s]),
                    forward[r].compose(&forward[s]),
                ];
                if let Some(u) = candidates
                    .iter()
                    .map(|c| unwind_s.compose(c))
                    .find(|u| cut.is_anchor(&u.apply(word)))
                {
                    next = Some(u);
                    break;
                }
            }
            if next.is_some() {
                found[r] = next;
                changed = true;
            }
        }
    }
    found
        .into_iter()
        .zip(curves)
        .map(|(u, c)| {
            u.ok_or_else(|| {
                MappingClassError::invalid_surface(format!(
                    "reference curve `{}` is not reachable from x1 through curves meeting once",
                    c.name
                ))
            })
        })
        .collect()
}

/// Rank over Q of a list of classes with `width` coefficients each.
pub(crate) fn class_rank(classes: &[&HomologyClass], width: usize) -> usize {
    if classes.is_empty() {
        return 0;
    }
    let m = DMatrix::from_fn(classes.len(), width, |i, j| {
        classes[i].coeffs().get(j).copied().unwrap_or(0) as f64
    });
    m.rank(RANK_EPS)
}
