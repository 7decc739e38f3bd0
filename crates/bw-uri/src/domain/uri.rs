//! URI validation
//!
//! A URI is a `/`-separated list of cells with no leading or trailing slash.
//! A cell is a literal (optionally `!`-prefixed), `+` (exactly one cell) or
//! `*` (zero or more cells).
//!
//! Rules:
//! - No empty cell anywhere
//! - At most one `*` cell and at most one `!` cell
//! - `!` never stands alone
//! - Literal characters come from `[A-Za-z0-9._,\-()$]`

use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidReason, UriError};

/// Matches exactly one cell.
pub const PLUS: &str = "+";
/// Matches zero or more cells.
pub const STAR: &str = "*";
/// Prefix marking an attribute/metadata cell.
pub const BANG: char = '!';
/// Longest URI accepted by the validator.
pub const MAX_URI_LENGTH: usize = 1024;

/// Result of [`analyze`]. Flags are only meaningful when `valid` is true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UriAnalysis {
    pub valid: bool,
    pub has_star: bool,
    pub has_plus: bool,
    pub has_bang: bool,
}

/// Whether `c` may appear in a literal cell.
pub fn is_literal_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ',' | '-' | '(' | ')' | '$')
}

struct Scan {
    star: Option<usize>,
    has_plus: bool,
    has_bang: bool,
}

fn scan(uri: &str) -> Result<Scan, InvalidReason> {
    if uri.len() > MAX_URI_LENGTH {
        return Err(InvalidReason::TooLong { len: uri.len() });
    }

    let mut result = Scan {
        star: None,
        has_plus: false,
        has_bang: false,
    };

    for (index, cell) in uri.split('/').enumerate() {
        match cell {
            "" => return Err(InvalidReason::EmptyCell),
            STAR => {
                if result.star.is_some() {
                    return Err(InvalidReason::MultipleStars);
                }
                result.star = Some(index);
            }
            PLUS => result.has_plus = true,
            _ => {
                let literal = match cell.strip_prefix(BANG) {
                    Some("") => return Err(InvalidReason::BareBang),
                    Some(rest) => {
                        if result.has_bang {
                            return Err(InvalidReason::MultipleBangs);
                        }
                        result.has_bang = true;
                        rest
                    }
                    None => cell,
                };
                if let Some(bad) = literal.chars().find(|c| !is_literal_char(*c)) {
                    return Err(InvalidReason::IllegalCharacter(bad));
                }
            }
        }
    }

    Ok(result)
}

/// Validate `uri` and report which wildcard kinds it uses.
pub fn analyze(uri: &str) -> UriAnalysis {
    match scan(uri) {
        Ok(scan) => UriAnalysis {
            valid: true,
            has_star: scan.star.is_some(),
            has_plus: scan.has_plus,
            has_bang: scan.has_bang,
        },
        Err(reason) => {
            tracing::trace!(uri, %reason, "uri rejected");
            UriAnalysis::default()
        }
    }
}

/// A validated URI pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    raw: String,
    star: Option<usize>,
    has_plus: bool,
    has_bang: bool,
}

impl Uri {
    /// Validate and wrap `uri`.
    pub fn parse(uri: &str) -> Result<Self, UriError> {
        let scan = scan(uri).map_err(|reason| UriError::InvalidUri {
            uri: uri.to_string(),
            reason,
        })?;
        Ok(Self {
            raw: uri.to_string(),
            star: scan.star,
            has_plus: scan.has_plus,
            has_bang: scan.has_bang,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The cells in order. Never empty.
    pub fn cells(&self) -> Vec<&str> {
        self.raw.split('/').collect()
    }

    /// Index of the `*` cell, if any.
    pub fn star_index(&self) -> Option<usize> {
        self.star
    }

    pub fn has_star(&self) -> bool {
        self.star.is_some()
    }

    pub fn has_plus(&self) -> bool {
        self.has_plus
    }

    pub fn has_bang(&self) -> bool {
        self.has_bang
    }

    /// A concrete URI names exactly one topic: no `+` and no `*`.
    pub fn is_concrete(&self) -> bool {
        !self.has_plus && self.star.is_none()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
