//! Frame model and builder.
//!
//! A frame is immutable once built. The builder keeps a running count of the
//! octets the entries will occupy on the wire so the fixed header can be
//! written without a second pass.

use std::fmt;

use bytes::Bytes;

use crate::domain::command::Command;
use crate::domain::objects::{PayloadObjectRef, RoutingObjectRef};
use crate::error::{Result, WireError};

/// Octets taken by the `end\n` terminator.
pub const TERMINATOR_LEN: u64 = 4;

/// Length of the fixed header line, LF included.
pub const FIXED_HEADER_LEN: usize = 27;

/// Largest value the ten-digit length field can carry.
pub const MAX_ENCODED_LENGTH: u64 = 9_999_999_999;

/// Default ceiling on one entry header line, LF included. The builder refuses
/// lines longer than this so every built frame parses under default limits.
pub const MAX_ENTRY_LINE: usize = 1024;

/// Number of decimal digits needed to print `n`.
pub(crate) fn decimal_len(mut n: u64) -> u64 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Header keys are non-empty runs of printable, non-space ASCII.
pub fn is_valid_header_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_graphic())
}

/// Named header entry. The value is opaque and may hold any byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: Bytes,
}

impl Header {
    /// Length of the `kv <key> <len>\n` line alone.
    fn line_len(&self) -> u64 {
        3 + self.key.len() as u64 + 1 + decimal_len(self.value.len() as u64) + 1
    }

    fn encoded_len(&self) -> u64 {
        let value_len = self.value.len() as u64;
        self.key.len() as u64 + decimal_len(value_len) + value_len + 6
    }
}

fn routing_entry_len(ro: &RoutingObjectRef) -> u64 {
    let body_len = ro.content().len() as u64;
    3 + decimal_len(u64::from(ro.ro_num())) + 1 + decimal_len(body_len) + 1 + body_len + 1
}

fn payload_entry_len(po: &PayloadObjectRef) -> u64 {
    let body_len = po.content().len() as u64;
    let po_num = po.po_num();
    3 + decimal_len(u64::from(po_num.value()))
        + 1
        + po_num.to_dot().len() as u64
        + 1
        + decimal_len(body_len)
        + 1
        + body_len
        + 1
}

/// Outcome carried by a `resp` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Okay,
    Error,
}

impl ResponseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseStatus::Okay => "okay",
            ResponseStatus::Error => "error",
        }
    }

    pub fn parse(value: &[u8]) -> Option<Self> {
        match value {
            b"okay" => Some(ResponseStatus::Okay),
            b"error" => Some(ResponseStatus::Error),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// FRAME
// =============================================================================

/// A command with its sequence number, headers, routing objects and payload
/// objects, each category kept in insertion order.
#[derive(Debug, Clone)]
pub struct Frame {
    command: Command,
    seqno: u32,
    headers: Vec<Header>,
    routing_objects: Vec<RoutingObjectRef>,
    payload_objects: Vec<PayloadObjectRef>,
    length: u64,
}

impl Frame {
    #[must_use]
    pub fn builder(command: Command, seqno: u32) -> FrameBuilder {
        FrameBuilder::new(command, seqno)
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn seqno(&self) -> u32 {
        self.seqno
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Value of the first header named `key`.
    pub fn header(&self, key: &str) -> Option<&Bytes> {
        self.headers.iter().find(|h| h.key == key).map(|h| &h.value)
    }

    /// Values of every header named `key`, in frame order.
    pub fn headers_named<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Bytes> + 'a {
        self.headers
            .iter()
            .filter(move |h| h.key == key)
            .map(|h| &h.value)
    }

    pub fn routing_objects(&self) -> &[RoutingObjectRef] {
        &self.routing_objects
    }

    pub fn payload_objects(&self) -> &[PayloadObjectRef] {
        &self.payload_objects
    }

    /// Status of a response frame, if it carries a recognised one.
    pub fn status(&self) -> Option<ResponseStatus> {
        self.header("status").and_then(|v| ResponseStatus::parse(v))
    }

    pub fn reason(&self) -> Option<&Bytes> {
        self.header("reason")
    }

    /// Octets between the fixed header line and the end of `end\n`.
    pub fn encoded_length(&self) -> u64 {
        self.length
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.command == other.command
            && self.seqno == other.seqno
            && self.headers == other.headers
            && self.routing_objects.len() == other.routing_objects.len()
            && self.payload_objects.len() == other.payload_objects.len()
            && self
                .routing_objects
                .iter()
                .zip(&other.routing_objects)
                .all(|(a, b)| a.ro_num() == b.ro_num() && a.content() == b.content())
            && self
                .payload_objects
                .iter()
                .zip(&other.payload_objects)
                .all(|(a, b)| a.po_num() == b.po_num() && a.content() == b.content())
    }
}

impl Eq for Frame {}

// =============================================================================
// BUILDER
// =============================================================================

/// Accumulates entries for a frame and tracks its encoded length.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    command: Command,
    seqno: u32,
    headers: Vec<Header>,
    routing_objects: Vec<RoutingObjectRef>,
    payload_objects: Vec<PayloadObjectRef>,
    length: u64,
}

impl FrameBuilder {
    #[must_use]
    pub fn new(command: Command, seqno: u32) -> Self {
        Self {
            command,
            seqno,
            headers: Vec::new(),
            routing_objects: Vec::new(),
            payload_objects: Vec::new(),
            length: TERMINATOR_LEN,
        }
    }

    /// A `resp` frame answering `seqno`. An empty `reason` is omitted.
    #[must_use]
    pub fn response(seqno: u32, status: ResponseStatus, reason: &str) -> Self {
        let builder = Self::new(Command::RESPONSE, seqno).header("status", status.as_str());
        if reason.is_empty() {
            builder
        } else {
            builder.header("reason", reason.to_string())
        }
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<Bytes>) -> Self {
        let header = Header {
            key: key.into(),
            value: value.into(),
        };
        self.length += header.encoded_len();
        self.headers.push(header);
        self
    }

    #[must_use]
    pub fn routing_object(mut self, ro: RoutingObjectRef) -> Self {
        self.length += routing_entry_len(&ro);
        self.routing_objects.push(ro);
        self
    }

    #[must_use]
    pub fn payload_object(mut self, po: PayloadObjectRef) -> Self {
        self.length += payload_entry_len(&po);
        self.payload_objects.push(po);
        self
    }

    /// Running length: entries added so far plus the terminator.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Check header keys, entry line lengths and the length field, then
    /// freeze the frame.
    pub fn build(self) -> Result<Frame> {
        if let Some(bad) = self.headers.iter().find(|h| !is_valid_header_key(&h.key)) {
            return Err(WireError::InvalidHeaderKey(bad.key.clone()));
        }
        // `ro` and `po` lines are bounded by their number widths; only keys can overflow.
        if let Some(bad) = self
            .headers
            .iter()
            .find(|h| h.line_len() > MAX_ENTRY_LINE as u64)
        {
            return Err(WireError::InvalidHeaderKey(bad.key.clone()));
        }
        if self.length > MAX_ENCODED_LENGTH {
            return Err(WireError::malformed(format!(
                "encoded length {} does not fit the length field",
                self.length
            )));
        }
        Ok(Frame {
            command: self.command,
            seqno: self.seqno,
            headers: self.headers,
            routing_objects: self.routing_objects,
            payload_objects: self.payload_objects,
            length: self.length,
        })
    }
}
