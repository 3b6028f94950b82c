//! Fundamental-group engine behind curves and twists.
//!
//! Purpose
//! - Represent free homotopy classes of closed curves exactly, as cyclic
//!   words in the band generators `x1 … x(2g)` of `π1(S_g)`.
//! - Realize every Dehn twist about a simple chord path as an automorphism
//!   of the free group on those generators.
//! - Count geometric intersections with `c1` by cutting along it (`cut`).
//!   Other curves are measured by first unwinding them onto `c1`.
//!
//! Code cross-refs: `curve::Curve`, `twist::TwistGenerator`,
//! `surface::ReferenceCurveSystem`.

pub(crate) mod automorphism;
pub mod chord;
pub(crate) mod cut;
pub(crate) mod word;

pub(crate) use automorphism::Automorphism;
pub use chord::{ChordPath, Visit};
pub(crate) use cut::Cut;
