//! Codec limits.

use std::env;

use serde::{Deserialize, Serialize};

use crate::domain::{FIXED_HEADER_LEN, MAX_ENTRY_LINE};
use crate::error::{Result, WireError};

/// Ceilings the parser enforces on untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireConfig {
    /// Maximum octets of entries plus terminator in one frame.
    pub max_frame_size: u64,

    /// Maximum length of a single entry header line, LF included.
    pub max_header_line: usize,

    /// Maximum number of entries in one frame.
    pub max_entries: usize,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_frame_size: 16 * 1024 * 1024,
            max_header_line: MAX_ENTRY_LINE,
            max_entries: 4096,
        }
    }
}

impl WireConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BW_MAX_FRAME_SIZE`: frame ceiling in bytes (default: 16 MiB)
    /// - `BW_MAX_HEADER_LINE`: entry header line ceiling (default: 1024)
    /// - `BW_MAX_ENTRIES`: entries per frame (default: 4096)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_frame_size: env::var("BW_MAX_FRAME_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_frame_size),

            max_header_line: env::var("BW_MAX_HEADER_LINE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_header_line),

            max_entries: env::var("BW_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_frame_size == 0 {
            return Err(WireError::Config("max_frame_size must be non-zero".into()));
        }
        if self.max_entries == 0 {
            return Err(WireError::Config("max_entries must be non-zero".into()));
        }
        if self.max_header_line < FIXED_HEADER_LEN {
            return Err(WireError::Config(format!(
                "max_header_line must be at least {FIXED_HEADER_LEN}"
            )));
        }
        Ok(())
    }
}
