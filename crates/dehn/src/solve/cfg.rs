//! Search bounds and tolerances for the solvers.
//!
//! Policy
//! - The bounds are empirical heuristics, not proven sufficient. They are
//!   plain `Copy` structs so experiments can sweep them; the constants below
//!   are only the defaults.

/// Default ceiling for the order search.
pub const DEFAULT_MAX_ORDER: usize = 64;
/// Default power-iteration budget.
pub const DEFAULT_STRETCH_ITERATIONS: usize = 1000;
/// Default bound on consecutive ratio differences.
pub const DEFAULT_STRETCH_TOLERANCE: f64 = 1e-9;
/// Default ceiling on the word length of the iterated curve.
pub const DEFAULT_STRETCH_LETTERS: usize = 1 << 22;

/// Order search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderCfg {
    /// Largest power tested; the search never goes beyond it.
    pub max_iterations: usize,
}

impl Default for OrderCfg {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ORDER,
        }
    }
}

/// Stretch-factor estimator configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StretchCfg {
    pub iterations: usize,
    /// Convergence is declared once `|r_k − r_(k−1)| < tolerance`.
    pub tolerance: f64,
    /// The run stops, unconverged, once the curve word would exceed this
    /// many letters. Curve words grow like `λ^k`, so this caps the
    /// reachable precision for slowly converging words.
    pub max_letters: usize,
}

impl Default for StretchCfg {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_STRETCH_ITERATIONS,
            tolerance: DEFAULT_STRETCH_TOLERANCE,
            max_letters: DEFAULT_STRETCH_LETTERS,
        }
    }
}

/// Everything `evaluate_batch` needs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BatchCfg {
    pub order: OrderCfg,
    pub stretch: StretchCfg,
}
