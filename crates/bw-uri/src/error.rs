//! Error types for the URI algebra

use thiserror::Error;

/// Why a URI failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("empty cell")]
    EmptyCell,

    #[error("more than one '*' cell")]
    MultipleStars,

    #[error("more than one '!' cell")]
    MultipleBangs,

    #[error("'!' cell with no name")]
    BareBang,

    #[error("illegal character {0:?}")]
    IllegalCharacter(char),

    #[error("length {len} exceeds maximum")]
    TooLong { len: usize },
}

/// Errors that can occur in the URI algebra
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("Invalid URI {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: InvalidReason },

    /// The two patterns share no covered URI. Callers deny the operation.
    #[error("No intersection between {from:?} and {by:?}")]
    NoIntersection { from: String, by: String },

    #[error("Invalid cache capacity: {0}")]
    InvalidCacheCapacity(usize),
}

impl UriError {
    /// Whether this is the "no intersection" outcome rather than bad input.
    pub fn is_no_intersection(&self) -> bool {
        matches!(self, UriError::NoIntersection { .. })
    }
}
