//! Mapping class words: compositions of Dehn twists with integer exponents.
//!
//! Composition convention (used everywhere in this crate)
//! - Letters are stored as written, left to right.
//! - A word acts like function composition: the RIGHTMOST letter is applied
//!   first. `(u * v).apply(c) == u.apply(v.apply(c))`.
//! - `inverse` reverses the letters and negates the exponents.
//!
//! Words are kept freely reduced: adjacent letters on the same curve merge by
//! summing exponents and a zero exponent drops the letter. This is syntax
//! only; equality of mapping classes is decided by `solve::equals`.
//!
//! Code cross-refs: `twist::TwistGenerator::apply_power`, `solve`.

mod parse;
mod types;

pub use types::{Letter, MappingClassWord};

#[cfg(test)]
mod tests;
