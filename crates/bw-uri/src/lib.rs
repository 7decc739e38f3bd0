//! # BOSSWAVE URI Algebra
//!
//! Every message is routed along a hierarchical URI and every delivery is
//! authorised by a permission pattern over the same namespace. This crate
//! decides which strings are URIs and what two patterns have in common.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure algebra, no I/O
//!   - `analyze` / `Uri`: validation
//!   - `restrict_by`: intersection of a topic pattern with a permission pattern
//!   - `matches`: whether a pattern covers a concrete topic
//! - **Cache** (`cache`): fingerprinted LRU memo of restriction results
//!
//! ## Grammar
//!
//! | Cell | Meaning |
//! |------|---------|
//! | literal | `[A-Za-z0-9._,\-()$]+`, optionally prefixed by one `!` |
//! | `+` | exactly one cell |
//! | `*` | zero or more cells, at most once per URI |
//!
//! ## Usage Example
//!
//! ```
//! use bw_uri::{matches, restrict_by};
//!
//! let granted = restrict_by("castle/*", "castle/+/temp").unwrap();
//! assert_eq!(granted, "castle/+/temp");
//! assert!(matches(&granted, "castle/kitchen/temp"));
//! ```

pub mod cache;
pub mod domain;
pub mod error;

pub use cache::{fingerprint, CacheStats, Fingerprint, RestrictionCache};
pub use domain::{
    analyze, is_literal_char, matches, matches_uri, restrict_by, Uri, UriAnalysis,
    MAX_URI_LENGTH, PLUS, STAR,
};
pub use error::{InvalidReason, UriError};
