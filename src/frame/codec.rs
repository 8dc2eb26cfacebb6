//! Streaming frame codec bound to one connection's byte stream.

use std::{io, sync::Arc, time::Instant};

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

use super::{
    error::DecodeError,
    header::{FrameHeader, HEADER_SIZE, MAGIC_CODE},
    message::WireFrame,
};
use crate::chunk::ReassemblyTable;

/// Incremental decoder and encoder for the rpcframe wire format.
///
/// One codec instance is bound to one connection and driven by that
/// connection's I/O task; the codec holds no state of its own between calls
/// beyond the process-wide [`ReassemblyTable`] shared by every instance.
/// Invoking [`Decoder::decode`] again with the same unconsumed buffer is
/// always safe: nothing is consumed until a whole frame is available.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use bytes::BytesMut;
/// use rpcframe::{FrameCodec, FrameHeader, ReassemblyTable, WireFrame};
/// use tokio_util::codec::{Decoder, Encoder};
///
/// let mut codec = FrameCodec::new(Arc::new(ReassemblyTable::new()));
/// let mut buf = BytesMut::new();
/// let frame = WireFrame::new(FrameHeader::new(7), b"ping".as_slice().into());
/// codec.encode(frame, &mut buf)?;
///
/// let decoded = codec.decode(&mut buf)?.expect("complete frame buffered");
/// assert_eq!(decoded.header.correlation_id, 7);
/// assert_eq!(&decoded.payload[..], b"ping");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct FrameCodec {
    table: Arc<ReassemblyTable>,
}

impl FrameCodec {
    /// Create a codec sharing `table` with every other connection's codec.
    #[must_use]
    pub fn new(table: Arc<ReassemblyTable>) -> Self { Self { table } }
}

impl Decoder for FrameCodec {
    type Item = WireFrame;
    type Error = DecodeError;

    /// Attempt one decode step against the buffered bytes.
    ///
    /// Returns `Ok(None)` while the buffer holds less than a complete frame;
    /// no bytes are consumed on that path and the header is re-parsed on the
    /// next invocation. A chunk fragment is folded into the shared table and
    /// yields a frame only once its final fragment arrives.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<WireFrame>, DecodeError> {
        if src.len() < HEADER_SIZE {
            return Ok(None);
        }

        let started = Instant::now();
        let header = FrameHeader::parse(&src[..HEADER_SIZE])?;
        let Ok(body_size) = usize::try_from(header.body_size) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "frame body exceeds addressable memory",
            )
            .into());
        };
        if src.len() < HEADER_SIZE + body_size {
            return Ok(None);
        }

        if header.magic != MAGIC_CODE {
            return Err(DecodeError::BadMagic {
                found: String::from_utf8_lossy(&header.magic).into_owned(),
            });
        }

        src.advance(HEADER_SIZE);
        let payload = src.split_to(body_size).freeze();
        let frame = WireFrame::new(header, payload);
        trace!(elapsed = ?started.elapsed(), "frame decode cost");

        if header.is_chunk() {
            return Ok(self.table.accept_chunk(frame));
        }
        Ok(Some(frame))
    }
}

impl Encoder<WireFrame> for FrameCodec {
    type Error = io::Error;

    fn encode(&mut self, frame: WireFrame, dst: &mut BytesMut) -> Result<(), io::Error> {
        dst.reserve(HEADER_SIZE + frame.payload.len());
        frame.header.encode_into(dst);
        dst.extend_from_slice(&frame.payload);
        Ok(())
    }
}
