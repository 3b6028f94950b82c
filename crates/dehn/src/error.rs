//! Error type shared by the curve engine, words, and solvers.

use std::fmt;

/// Failures of the mapping-class engine.
///
/// Order-search exhaustion is not an error: "no finite order within the
/// bound" is an ordinary outcome (`OrderSearch::Exhausted`).
#[derive(Clone, Debug, PartialEq)]
pub enum MappingClassError {
    InvalidSurface { reason: String },
    /// Two vectors or a vector and a generator of different length were combined.
    DimensionMismatch { expected: usize, found: usize },
    /// Two words (or a word and a witness family) live on different surface models.
    SurfaceMismatch,
    UnknownCurve { name: String },
    /// An all-zero coordinate or a null-homotopic curve word.
    DegenerateCoordinate,
    /// The witness classes do not span homology, so they cannot detect non-identity classes.
    WitnessRank { rank: usize, expected: usize },
    NonConvergence { iterations: usize, last_ratio: f64 },
    Parse { reason: String },
    /// A merged or negated exponent left the range `-i64::MAX ..= i64::MAX`.
    ExponentOverflow { curve: usize },
    /// A curve word grew past the letter limit of the operation.
    CurveTooLong { limit: usize },
    /// A curve letter outside `±1 ..= ±2g`.
    UnknownGenerator { letter: i32 },
}

impl MappingClassError {
    pub(crate) fn invalid_surface(reason: impl Into<String>) -> Self {
        Self::InvalidSurface {
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_curve(name: impl Into<String>) -> Self {
        Self::UnknownCurve { name: name.into() }
    }

    /// Check `found == expected`, producing a `DimensionMismatch` otherwise.
    #[inline]
    pub(crate) fn check_dim(expected: usize, found: usize) -> Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, found })
        }
    }
}

impl fmt::Display for MappingClassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSurface { reason } => write!(f, "invalid surface: {reason}"),
            Self::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected} entries, found {found}")
            }
            Self::SurfaceMismatch => write!(f, "operands belong to different surface models"),
            Self::UnknownCurve { name } => write!(f, "unknown reference curve `{name}`"),
            Self::DegenerateCoordinate => write!(f, "degenerate (all-zero) curve coordinate"),
            Self::WitnessRank { rank, expected } => write!(
                f,
                "witness family spans rank {rank}, needs full homology rank {expected}"
            ),
            Self::NonConvergence {
                iterations,
                last_ratio,
            } => write!(
                f,
                "stretch factor did not converge after {iterations} iterations (last ratio {last_ratio})"
            ),
            Self::Parse { reason } => write!(f, "cannot parse word: {reason}"),
            Self::ExponentOverflow { curve } => {
                write!(f, "exponent on curve #{curve} overflows a 64-bit twist count")
            }
            Self::CurveTooLong { limit } => {
                write!(f, "curve word exceeds the limit of {limit} letters")
            }
            Self::UnknownGenerator { letter } => write!(f, "no band generator for letter {letter}"),
        }
    }
}

impl std::error::Error for MappingClassError {}

pub type Result<T> = std::result::Result<T, MappingClassError>;
