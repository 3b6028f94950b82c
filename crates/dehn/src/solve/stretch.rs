//! Stretch factor from the growth of intersection numbers.
//!
//! Model
//! - Start from the seed curve and apply the word once per step, exactly.
//! - The growth ratio is `r_k = ‖coord(f^k γ)‖₁ / ‖coord(f^(k−1) γ)‖₁`,
//!   with coordinates measured against the reference system. For a
//!   pseudo-Anosov `f` it tends to the stretch factor `λ`.
//! - Curves cannot be renormalized, so word length grows like `λ^k`; the
//!   `max_letters` budget ends the run before memory does, reported as an
//!   unconverged estimate.
//! - Converged when `|r_k − r_(k−1)| < tolerance` and `r_k > 1 + tolerance`.
//!   A ratio that settles at 1 is not a stretch factor: the identity, finite
//!   order words and twists about a single curve all end there, so the run
//!   stops and is flagged like an exhausted budget. Oscillating ratios simply
//!   run out of budget.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::curve::Curve;
use crate::error::{MappingClassError, Result};
use crate::word::MappingClassWord;

use super::cfg::StretchCfg;

/// Result of one growth run.
#[derive(Clone, Debug, PartialEq)]
pub struct StretchEstimate {
    /// Last growth ratio; the stretch factor when `converged`.
    pub factor: f64,
    pub converged: bool,
    pub iterations: usize,
    /// Every ratio in order, for diagnosing oscillation.
    pub ratios: Vec<f64>,
}

impl StretchEstimate {
    /// The factor, or `NonConvergence` with the last ratio seen.
    pub fn into_result(self) -> Result<f64> {
        if self.converged {
            Ok(self.factor)
        } else {
            Err(MappingClassError::NonConvergence {
                iterations: self.iterations,
                last_ratio: self.factor,
            })
        }
    }
}

/// Iterate `word` on `seed` and watch the ℓ1 norm of its coordinate.
pub fn estimate_stretch_factor(
    word: &MappingClassWord,
    seed: &Curve,
    cfg: StretchCfg,
) -> Result<StretchEstimate> {
    MappingClassError::check_dim(word.model().rank(), seed.rank())?;
    let refs = word.model().reference();
    let mut curve = seed.clone();
    let mut norm = refs.coordinate_of(&curve)?.l1_norm();
    let mut ratios: Vec<f64> = Vec::with_capacity(cfg.iterations.min(1024));
    let mut converged = false;
    for k in 1..=cfg.iterations {
        curve = match word.apply_within(&curve, cfg.max_letters) {
            Ok(next) => next,
            Err(MappingClassError::CurveTooLong { limit }) => {
                tracing::debug!(iterations = k - 1, limit, "stretch letter budget exhausted");
                break;
            }
            Err(e) => return Err(e),
        };
        let next = refs.coordinate_of(&curve)?.l1_norm();
        let ratio = quotient(&next, &norm);
        norm = next;
        if let Some(&prev) = ratios.last() {
            if (ratio - prev).abs() < cfg.tolerance {
                ratios.push(ratio);
                converged = ratio > 1.0 + cfg.tolerance;
                if converged {
                    tracing::debug!(iterations = k, ratio, "stretch factor converged");
                } else {
                    tracing::debug!(iterations = k, ratio, "ratios settled without stretching");
                }
                break;
            }
        }
        tracing::trace!(iteration = k, ratio, letters = curve.len(), "stretch ratio");
        ratios.push(ratio);
    }
    let factor = ratios.last().copied().unwrap_or(f64::NAN);
    if !converged {
        tracing::debug!(iterations = ratios.len(), last = factor, "stretch factor did not converge");
    }
    Ok(StretchEstimate {
        factor,
        converged,
        iterations: ratios.len(),
        ratios,
    })
}

/// `a / b` in floating point; norms of essential curves are positive.
fn quotient(a: &BigInt, b: &BigInt) -> f64 {
    let a = a.to_f64().unwrap_or(f64::INFINITY);
    let b = b.to_f64().unwrap_or(f64::INFINITY);
    a / b
}
