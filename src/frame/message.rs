//! Decoded frame unit returned by the codec.

use std::time::Instant;

use bytes::Bytes;

use super::header::FrameHeader;

/// One fully parsed header-plus-body unit.
///
/// For a merged chunk sequence this carries the first fragment's header,
/// marked complete, and a payload spanning every fragment in arrival order.
/// Non-chunked frames are handed to the caller the instant they are parsed.
#[derive(Clone, Debug)]
pub struct WireFrame {
    /// The header that produced this frame.
    pub header: FrameHeader,
    /// Body bytes; for a merged chunk sequence, the concatenation of every
    /// fragment's body.
    pub payload: Bytes,
    received_at: Instant,
}

impl WireFrame {
    /// Build a frame, recording the payload length in the header.
    ///
    /// Payloads beyond `u32::MAX` bytes are not representable on the wire;
    /// the recorded size saturates.
    #[must_use]
    pub fn new(header: FrameHeader, payload: Bytes) -> Self {
        Self::with_received_at(header, payload, Instant::now())
    }

    pub(crate) fn with_received_at(
        mut header: FrameHeader,
        payload: Bytes,
        received_at: Instant,
    ) -> Self {
        debug_assert!(u32::try_from(payload.len()).is_ok(), "payload exceeds wire range");
        header.body_size = u32::try_from(payload.len()).unwrap_or(u32::MAX);
        Self {
            header,
            payload,
            received_at,
        }
    }

    /// When the first byte group of this logical message was observed.
    ///
    /// Used only for reassembly-timeout accounting, never for protocol
    /// semantics.
    #[must_use]
    pub fn received_at(&self) -> Instant { self.received_at }
}
