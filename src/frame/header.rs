//! Fixed-size header carried at the front of every wire frame.

use bytes::{BufMut, BytesMut};

use super::error::DecodeError;
use crate::{
    byte_order::{read_wire_u16, read_wire_u32, write_wire_u16, write_wire_u32},
    chunk::ChunkStreamId,
};

/// Number of bytes occupied by the header on the wire.
///
/// The header size is fixed and known before any body bytes are read.
pub const HEADER_SIZE: usize = 16;

/// Magic code expected at the start of every frame.
pub const MAGIC_CODE: [u8; 4] = *b"FRPC";

/// Marks a frame as one fragment of a chunked transfer.
const FLAG_CHUNK: u8 = 0b0000_0001;
/// Marks the last fragment of a chunked transfer.
const FLAG_FINAL: u8 = 0b0000_0010;

/// Header metadata parsed from the front of a frame.
///
/// Wire layout, all multi-byte fields little-endian:
///
/// ```text
/// ┌───────┬───────────┬────────────────┬──────────────┬───────┬──────────┐
/// │ magic │ body size │ correlation id │ chunk stream │ flags │ reserved │
/// │ 4     │ 4         │ 4              │ 2            │ 1     │ 1        │
/// └───────┴───────────┴────────────────┴──────────────┴───────┴──────────┘
/// ```
///
/// `body_size` counts the body bytes of this single frame only: one chunk's
/// worth when chunked, the whole message otherwise. The reserved byte is
/// written as zero and ignored on read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    /// Integrity marker; must equal [`MAGIC_CODE`] for the frame to be
    /// accepted.
    pub magic: [u8; 4],
    /// Declared length in bytes of everything following the header.
    pub body_size: u32,
    /// Caller-assigned token correlating a request to its response. Opaque to
    /// the framing layer.
    pub correlation_id: u32,
    /// Identifier shared by every fragment of one chunked message;
    /// [`ChunkStreamId::NONE`] when the frame is not chunked.
    pub chunk_stream_id: ChunkStreamId,
    flags: u8,
}

impl FrameHeader {
    /// Header for a plain, non-chunked frame.
    #[must_use]
    pub const fn new(correlation_id: u32) -> Self {
        Self {
            magic: MAGIC_CODE,
            body_size: 0,
            correlation_id,
            chunk_stream_id: ChunkStreamId::NONE,
            flags: 0,
        }
    }

    /// Header for one fragment of a chunked transfer.
    #[must_use]
    pub const fn chunk(correlation_id: u32, chunk_stream_id: ChunkStreamId, is_final: bool) -> Self {
        let flags = if is_final {
            FLAG_CHUNK | FLAG_FINAL
        } else {
            FLAG_CHUNK
        };
        Self {
            magic: MAGIC_CODE,
            body_size: 0,
            correlation_id,
            chunk_stream_id,
            flags,
        }
    }

    /// Parse a header from the first [`HEADER_SIZE`] bytes of `src`.
    ///
    /// The magic code is carried through unchecked; validation happens once
    /// the decoder knows the whole frame is buffered.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TruncatedHeader`] when `src` is shorter than
    /// [`HEADER_SIZE`]. Callers are expected to pre-check availability, so
    /// hitting this indicates a bug on their side.
    pub fn parse(src: &[u8]) -> Result<Self, DecodeError> {
        if src.len() < HEADER_SIZE {
            return Err(DecodeError::TruncatedHeader {
                have: src.len(),
                need: HEADER_SIZE,
            });
        }
        Ok(Self {
            magic: [src[0], src[1], src[2], src[3]],
            body_size: read_wire_u32([src[4], src[5], src[6], src[7]]),
            correlation_id: read_wire_u32([src[8], src[9], src[10], src[11]]),
            chunk_stream_id: ChunkStreamId::new(read_wire_u16([src[12], src[13]])),
            flags: src[14],
        })
    }

    /// Append the wire representation of this header to `dst`.
    pub fn encode_into(&self, dst: &mut BytesMut) {
        dst.reserve(HEADER_SIZE);
        dst.extend_from_slice(&self.magic);
        dst.extend_from_slice(&write_wire_u32(self.body_size));
        dst.extend_from_slice(&write_wire_u32(self.correlation_id));
        dst.extend_from_slice(&write_wire_u16(self.chunk_stream_id.get()));
        dst.put_u8(self.flags);
        dst.put_u8(0);
    }

    /// Whether this frame is part of a multi-fragment transfer.
    #[must_use]
    pub const fn is_chunk(&self) -> bool { self.flags & FLAG_CHUNK != 0 }

    /// Whether this frame is the last fragment of a multi-fragment transfer.
    #[must_use]
    pub const fn is_final_chunk(&self) -> bool { self.flags & FLAG_FINAL != 0 }

    /// Mark the header of a merged chunk sequence as complete.
    pub(crate) const fn mark_complete(&mut self) { self.flags |= FLAG_FINAL; }
}
