//! Frame parser.
//!
//! Every step threads a `Result`; the first failure aborts the frame and no
//! partially parsed frame escapes. The parser never resynchronises, so after
//! an error the caller should drop the connection.

use bytes::Bytes;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tracing::{debug, trace};

use crate::config::WireConfig;
use crate::domain::{Command, Frame, FrameBuilder, PoNum, FIXED_HEADER_LEN, TERMINATOR_LEN};
use crate::error::{Result, WireError};
use crate::registry::ObjectRegistry;

const END_LINE: &[u8] = b"end\n";

/// Read one frame from `reader`.
///
/// I/O failures, including timeouts surfaced by the stream, are reported as
/// [`WireError::MalformedFrame`] with the underlying error attached.
pub async fn read_frame<R>(
    reader: &mut R,
    registry: &ObjectRegistry,
    config: &WireConfig,
) -> Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    match parse_frame(reader, registry, config).await {
        Ok(frame) => {
            trace!(
                cmd = %frame.command(),
                seqno = frame.seqno(),
                headers = frame.headers().len(),
                routing_objects = frame.routing_objects().len(),
                payload_objects = frame.payload_objects().len(),
                "Parsed frame"
            );
            Ok(frame)
        }
        Err(e) => {
            debug!(error = %e, "Rejected frame");
            Err(e)
        }
    }
}

struct FixedHeader {
    command: Command,
    length: u64,
    seqno: u32,
}

async fn parse_frame<R>(
    reader: &mut R,
    registry: &ObjectRegistry,
    config: &WireConfig,
) -> Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    let fixed = read_fixed_header(reader).await?;
    if fixed.length > config.max_frame_size {
        return Err(WireError::malformed(format!(
            "declared length {} exceeds ceiling {}",
            fixed.length, config.max_frame_size
        )));
    }

    let mut builder = FrameBuilder::new(fixed.command, fixed.seqno);
    let mut consumed: u64 = 0;
    let mut entries = 0usize;
    let mut line = Vec::with_capacity(64);

    loop {
        read_entry_line(reader, config.max_header_line, &mut line).await?;
        consumed += line.len() as u64;

        if line == END_LINE {
            break;
        }

        entries += 1;
        if entries > config.max_entries {
            return Err(WireError::malformed(format!(
                "more than {} entries",
                config.max_entries
            )));
        }

        let tokens: Vec<&[u8]> = line[..line.len() - 1].split(|&b| b == b' ').collect();
        let [verb, name, len] = tokens.as_slice() else {
            return Err(WireError::malformed(format!(
                "entry line has {} tokens, expected 3",
                tokens.len()
            )));
        };

        let body_len = parse_decimal(len)
            .ok_or_else(|| WireError::malformed("non-numeric entry length"))?;
        consumed = consumed
            .checked_add(body_len)
            .and_then(|n| n.checked_add(1))
            .filter(|&n| n.saturating_add(TERMINATOR_LEN) <= config.max_frame_size)
            .ok_or_else(|| {
                WireError::malformed(format!("frame exceeds ceiling {}", config.max_frame_size))
            })?;

        let body = read_body(reader, body_len).await?;

        builder = match *verb {
            b"kv" => {
                let key = std::str::from_utf8(name)
                    .ok()
                    .filter(|k| crate::domain::is_valid_header_key(k))
                    .ok_or_else(|| WireError::malformed("invalid header key"))?;
                builder.header(key, body)
            }
            b"ro" => {
                let ro_num = parse_decimal(name)
                    .and_then(|n| u8::try_from(n).ok())
                    .ok_or_else(|| WireError::malformed("invalid routing object number"))?;
                builder.routing_object(registry.load_routing_object(ro_num, body)?)
            }
            b"po" => {
                let po_num = parse_po_token(name)?;
                builder.payload_object(registry.load_payload_object(po_num, body)?)
            }
            other => {
                return Err(WireError::malformed(format!(
                    "unknown entry verb {:?}",
                    String::from_utf8_lossy(other)
                )));
            }
        };
    }

    if builder.length() != fixed.length {
        trace!(
            declared = fixed.length,
            actual = builder.length(),
            "Frame length field disagrees with entries"
        );
    }

    builder.build()
}

async fn read_fixed_header<R>(reader: &mut R) -> Result<FixedHeader>
where
    R: AsyncBufRead + Unpin,
{
    let mut header = [0u8; FIXED_HEADER_LEN];
    reader
        .read_exact(&mut header)
        .await
        .map_err(|e| WireError::malformed_io("short read on frame header", e))?;

    if header[4] != b' ' || header[15] != b' ' || header[26] != b'\n' {
        return Err(WireError::malformed("bad frame header layout"));
    }

    let command = Command::from_slice(&header[0..4])
        .map_err(|_| WireError::malformed("command is not printable ASCII"))?;
    let length = parse_decimal(&header[5..15])
        .ok_or_else(|| WireError::malformed("non-numeric frame length"))?;
    let seqno = parse_decimal(&header[16..26])
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| WireError::malformed("invalid sequence number"))?;

    Ok(FixedHeader {
        command,
        length,
        seqno,
    })
}

/// Read up to and including the next LF, refusing lines longer than `limit`.
async fn read_entry_line<R>(reader: &mut R, limit: usize, line: &mut Vec<u8>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    line.clear();
    let n = (&mut *reader)
        .take(limit as u64)
        .read_until(b'\n', line)
        .await
        .map_err(|e| WireError::malformed_io("read failed on entry line", e))?;

    match line.last() {
        Some(&b'\n') => Ok(()),
        _ if n == 0 => Err(WireError::malformed("stream ended before end line")),
        _ if n >= limit => Err(WireError::malformed(format!(
            "entry line longer than {limit} bytes"
        ))),
        _ => Err(WireError::malformed("truncated entry line")),
    }
}

/// Read exactly `len` body bytes followed by a single LF.
async fn read_body<R>(reader: &mut R, len: u64) -> Result<Bytes>
where
    R: AsyncBufRead + Unpin,
{
    let len = usize::try_from(len).map_err(|_| WireError::malformed("entry too large"))?;
    let mut body = vec![0u8; len];
    reader
        .read_exact(&mut body)
        .await
        .map_err(|e| WireError::malformed_io("short read on entry body", e))?;

    let lf = reader
        .read_u8()
        .await
        .map_err(|e| WireError::malformed_io("missing LF after entry body", e))?;
    if lf != b'\n' {
        return Err(WireError::malformed("entry body not followed by LF"));
    }
    Ok(Bytes::from(body))
}

/// Strict unsigned decimal: digits only, no sign, no whitespace.
fn parse_decimal(token: &[u8]) -> Option<u64> {
    if token.is_empty() {
        return None;
    }
    token.iter().try_fold(0u64, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
    })
}

/// `int:dot`. Either side may be empty but not both; when both are present
/// they must name the same number.
fn parse_po_token(token: &[u8]) -> Result<PoNum> {
    let invalid = || WireError::malformed("invalid payload object number");

    let text = std::str::from_utf8(token).map_err(|_| invalid())?;
    let (int_part, dot_part) = text.split_once(':').ok_or_else(invalid)?;

    let from_int = if int_part.is_empty() {
        None
    } else {
        let n = parse_decimal(int_part.as_bytes())
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(invalid)?;
        Some(PoNum(n))
    };
    let from_dot = if dot_part.is_empty() {
        None
    } else {
        Some(PoNum::from_dot(dot_part).map_err(|_| invalid())?)
    };

    match (from_int, from_dot) {
        (Some(a), Some(b)) if a == b => Ok(a),
        (Some(_), Some(_)) => Err(WireError::malformed(format!(
            "payload number forms disagree in {text:?}"
        ))),
        (Some(n), None) | (None, Some(n)) => Ok(n),
        (None, None) => Err(invalid()),
    }
}

// =============================================================================
// CONNECTION READER
// =============================================================================

/// Reads successive frames from one connection.
#[derive(Debug)]
pub struct FrameReader<'r, R> {
    inner: R,
    registry: &'r ObjectRegistry,
    config: WireConfig,
}

impl<'r, R> FrameReader<'r, R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(inner: R, registry: &'r ObjectRegistry) -> Self {
        Self::with_config(inner, registry, WireConfig::default())
    }

    pub fn with_config(inner: R, registry: &'r ObjectRegistry, config: WireConfig) -> Self {
        Self {
            inner,
            registry,
            config,
        }
    }

    pub async fn read_frame(&mut self) -> Result<Frame> {
        read_frame(&mut self.inner, self.registry, &self.config).await
    }

    /// Next frame, or `None` if the stream ended cleanly between frames.
    pub async fn next_frame(&mut self) -> Result<Option<Frame>> {
        let buffered = self
            .inner
            .fill_buf()
            .await
            .map_err(|e| WireError::malformed_io("read failed between frames", e))?;
        if buffered.is_empty() {
            return Ok(None);
        }
        self.read_frame().await.map(Some)
    }

    pub fn config(&self) -> &WireConfig {
        &self.config
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
