//! Frame serialiser.

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::domain::{Frame, FrameBuilder, FIXED_HEADER_LEN};
use crate::error::Result;

impl Frame {
    /// Render the frame exactly as it goes on the wire: fixed header, then
    /// headers, routing objects and payload objects, then `end\n`.
    pub fn to_bytes(&self) -> Bytes {
        let capacity = usize::try_from(self.encoded_length())
            .map_or(FIXED_HEADER_LEN, |n| n + FIXED_HEADER_LEN);
        let mut out = BytesMut::with_capacity(capacity);

        out.put_slice(self.command().as_bytes());
        out.put_slice(format!(" {:010} {:010}\n", self.encoded_length(), self.seqno()).as_bytes());

        for header in self.headers() {
            out.put_slice(format!("kv {} {}\n", header.key, header.value.len()).as_bytes());
            out.put_slice(&header.value);
            out.put_u8(b'\n');
        }

        for ro in self.routing_objects() {
            let body = ro.content();
            out.put_slice(format!("ro {} {}\n", ro.ro_num(), body.len()).as_bytes());
            out.put_slice(body);
            out.put_u8(b'\n');
        }

        for po in self.payload_objects() {
            let body = po.content();
            let po_num = po.po_num();
            out.put_slice(
                format!("po {}:{} {}\n", po_num.value(), po_num.to_dot(), body.len()).as_bytes(),
            );
            out.put_slice(body);
            out.put_u8(b'\n');
        }

        out.put_slice(b"end\n");
        out.freeze()
    }

    /// Write the whole frame, then flush.
    pub async fn write_to<W>(&self, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let bytes = self.to_bytes();
        writer.write_all(&bytes).await?;
        writer.flush().await?;
        trace!(
            cmd = %self.command(),
            seqno = self.seqno(),
            bytes = bytes.len(),
            "Wrote frame"
        );
        Ok(())
    }
}

impl FrameBuilder {
    /// Build the frame and write it to `writer`, returning what was sent.
    pub async fn write_to<W>(self, writer: &mut W) -> Result<Frame>
    where
        W: AsyncWrite + Unpin,
    {
        let frame = self.build()?;
        frame.write_to(writer).await?;
        Ok(frame)
    }
}
