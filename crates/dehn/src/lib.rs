//! Mapping classes of closed surfaces as words in Dehn twists.
//!
//! Answers three questions about a composed element: is it the identity
//! (word problem), what is its finite order (bounded search), and what is its
//! stretch factor (growth of intersection numbers). All three run on exact
//! curves: a simple closed curve is a cyclic word in `π1(S_g)`, a Dehn twist
//! is a free-group automorphism, and intersection numbers with the reference
//! curves are geometric, counted by cutting the surface along a curve.
//!
//! Layout
//! - `pi1`: free-group words, chord paths, twist automorphisms, the cut along `c1`.
//! - `curve`: `Curve` (isotopy class as a cyclic word), `CurveCoordinate`.
//! - `twist`: `TwistGenerator`, `Handedness`.
//! - `surface`: `Surface`, `ReferenceCurveSystem`, `WitnessFamily`, `SurfaceModel`.
//! - `word`: `MappingClassWord` (composition convention documented there).
//! - `solve`: identity test, order search, stretch estimate, batch evaluation.
//! - `generators`: Humphries/chain generators, hyperelliptic involution, random words.

pub mod curve;
pub mod error;
pub mod generators;
pub mod pi1;
pub mod solve;
pub mod surface;
pub mod twist;
pub mod word;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use curve::{Curve, CurveCoordinate};
pub use error::{MappingClassError, Result};
pub use pi1::{ChordPath, Visit};
pub use surface::{HomologyClass, ReferenceCurveSystem, Surface, SurfaceModel, WitnessFamily};
pub use twist::{Handedness, TwistGenerator};
pub use word::{Letter, MappingClassWord};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::generators::{
        chain_generators, humphries_generators, humphries_twists, hyperelliptic_involution,
        random_word, ReplayToken,
    };
    pub use crate::solve::{
        equals, estimate_stretch_factor, evaluate_batch, find_order, is_identity, BatchCfg,
        OrderCfg, OrderSearch, StretchCfg, StretchEstimate, WordReport,
    };
    pub use crate::{
        Curve, CurveCoordinate, Handedness, HomologyClass, Letter, MappingClassError, MappingClassWord,
        SurfaceModel, TwistGenerator,
    };
}
