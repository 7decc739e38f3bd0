//! Error types for the frame codec

use std::io;

use thiserror::Error;

use crate::domain::PoNum;

/// Why a routing or payload object body was refused by its loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    #[error("no loader registered for this kind")]
    Unregistered,

    #[error("wrong body length: expected {expected}, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("invalid verifying key")]
    InvalidKey,

    #[error("{0}")]
    Invalid(String),
}

/// Errors produced while building, parsing or writing frames.
#[derive(Debug, Error)]
pub enum WireError {
    /// The byte stream does not hold a well-formed frame. No partial frame
    /// is ever returned alongside this.
    #[error("Malformed frame: {reason}")]
    MalformedFrame {
        reason: String,
        source: Option<io::Error>,
    },

    #[error("Bad routing object 0x{ro_num:02x}: {reason}")]
    BadRoutingObject { ro_num: u8, reason: ObjectError },

    #[error("Bad payload object {po_num}: {reason}")]
    BadPayloadObject { po_num: PoNum, reason: ObjectError },

    #[error("Invalid command {0:?}: must be four printable ASCII bytes")]
    InvalidCommand(Vec<u8>),

    #[error("Invalid header key {0:?}")]
    InvalidHeaderKey(String),

    #[error("Invalid payload number {0:?}")]
    InvalidPoNum(String),

    /// Write-side stream failure.
    #[error("Stream error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl WireError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        WireError::MalformedFrame {
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn malformed_io(reason: impl Into<String>, source: io::Error) -> Self {
        WireError::MalformedFrame {
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Whether the caller should drop the frame rather than treat this as a
    /// local programming error.
    pub fn is_frame_error(&self) -> bool {
        matches!(
            self,
            WireError::MalformedFrame { .. }
                | WireError::BadRoutingObject { .. }
                | WireError::BadPayloadObject { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, WireError>;
