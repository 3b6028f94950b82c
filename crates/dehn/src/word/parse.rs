//! Text form of words: whitespace- or `*`-separated tokens `name[^exp]`.
//!
//! `"c1 c2^-1 c3^2"` is `T_c1 ∘ T_c2⁻¹ ∘ T_c3²` (rightmost applied first).
//! An empty string or `id` is the identity.

use super::types::Letter;
use crate::error::{MappingClassError, Result};
use crate::surface::ReferenceCurveSystem;

pub(crate) fn parse_letters(reference: &ReferenceCurveSystem, text: &str) -> Result<Vec<Letter>> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "id" {
        return Ok(Vec::new());
    }
    trimmed
        .split(|c: char| c.is_whitespace() || c == '*')
        .filter(|tok| !tok.is_empty())
        .map(|tok| parse_token(reference, tok))
        .collect()
}

fn parse_token(reference: &ReferenceCurveSystem, token: &str) -> Result<Letter> {
    let (name, exponent) = match token.split_once('^') {
        Some((name, exp)) => {
            let exp = exp
                .trim_start_matches('+')
                .parse::<i64>()
                .map_err(|e| MappingClassError::parse(format!("bad exponent in `{token}`: {e}")))?;
            (name, exp)
        }
        None => (token, 1),
    };
    if name.is_empty() {
        return Err(MappingClassError::parse(format!("missing curve name in `{token}`")));
    }
    let curve = reference.index_of(name)?;
    Ok(Letter::new(curve, exponent))
}
