//! Payload object numbers.
//!
//! A PO number is a `u32` with a dotted-quad alias: `2.0.1.3` is
//! `0x02010003`. The two forms are a bijection over the whole `u32` range.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WireError;

/// Payload object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoNum(pub u32);

impl PoNum {
    pub fn value(self) -> u32 {
        self.0
    }

    /// Render as `a.b.c.d`, most significant octet first.
    pub fn to_dot(self) -> String {
        let [a, b, c, d] = self.0.to_be_bytes();
        format!("{a}.{b}.{c}.{d}")
    }

    /// Parse `a.b.c.d`. Each octet is 1-3 decimal digits in `0..=255`.
    pub fn from_dot(dotted: &str) -> Result<Self, WireError> {
        let invalid = || WireError::InvalidPoNum(dotted.to_string());

        let mut octets = [0u8; 4];
        let mut parts = dotted.split('.');
        for octet in &mut octets {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *octet = part.parse().map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(PoNum(u32::from_be_bytes(octets)))
    }
}

impl fmt::Display for PoNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot())
    }
}

impl FromStr for PoNum {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PoNum::from_dot(s)
    }
}

impl From<u32> for PoNum {
    fn from(value: u32) -> Self {
        PoNum(value)
    }
}

/// `po_num_to_dot(0x02010003) == "2.0.1.3"`
pub fn po_num_to_dot(po_num: u32) -> String {
    PoNum(po_num).to_dot()
}

/// Inverse of [`po_num_to_dot`].
pub fn po_num_from_dot(dotted: &str) -> Result<u32, WireError> {
    PoNum::from_dot(dotted).map(PoNum::value)
}
