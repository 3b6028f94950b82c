//! Solvers driven by words: identity test, order search, stretch factor.
//!
//! Purpose
//! - `is_identity` / `equals`: the word problem, decided by the homology
//!   action plus exact isotopy of the model's witness curves.
//! - `find_order`: smallest trivial power, or a proof of infinite order.
//! - `estimate_stretch_factor`: growth of intersection numbers under
//!   repeated application of the word to a seed curve.
//! - `evaluate_batch`: the three above for many words, in parallel.
//!
//! All solvers are synchronous and deterministic; the only shared state is the
//! immutable `SurfaceModel`, so independent evaluations parallelize freely.

mod batch;
mod cfg;
mod identity;
mod order;
mod stretch;

pub use batch::{evaluate, evaluate_batch, WordReport};
pub use cfg::{
    BatchCfg, OrderCfg, StretchCfg, DEFAULT_MAX_ORDER, DEFAULT_STRETCH_ITERATIONS,
    DEFAULT_STRETCH_LETTERS, DEFAULT_STRETCH_TOLERANCE,
};
pub use identity::{equals, is_identity};
pub use order::{find_order, max_finite_order, OrderSearch};
pub use stretch::{estimate_stretch_factor, StretchEstimate};
