//! Domain Layer - Pure URI algebra
//!
//! This layer contains:
//! - URI validation and the `Uri` type
//! - Pattern restriction (intersection)
//! - Topic matching
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions only

pub mod matching;
pub mod restrict;
pub mod uri;

pub use matching::{matches, matches_uri};
pub use restrict::restrict_by;
pub use uri::{analyze, is_literal_char, Uri, UriAnalysis, BANG, MAX_URI_LENGTH, PLUS, STAR};
