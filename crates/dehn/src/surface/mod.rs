//! Surfaces, reference curve systems, and witness families.
//!
//! Purpose
//! - Fix, once per surface, the oriented reference curves against which every
//!   `CurveCoordinate` is measured, their twist actions and intersection
//!   matrix, and the witness curves the identity test runs on.
//! - Bundle them into an immutable `SurfaceModel` shared behind `Arc`.
//!
//! Conventions
//! - Homology classes live in the band basis `(x1, …, x(2g))`; the band
//!   cores form a chain, so `x_k` and `x_(k+1)` meet once.
//! - Coordinates record geometric intersection numbers `i(γ, r_j)`.
//!
//! Code cross-refs: `curve::Curve`, `twist::TwistGenerator`, `pi1`,
//! `solve::is_identity`.

mod model;
mod reference;
mod types;
mod witness;

pub use model::SurfaceModel;
pub(crate) use model::same_model;
pub use reference::{ReferenceCurve, ReferenceCurveSystem};
pub use types::{HomologyClass, Surface};
pub use witness::WitnessFamily;

#[cfg(test)]
mod tests;
