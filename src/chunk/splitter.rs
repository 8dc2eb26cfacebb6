//! Send-side splitting of oversized payloads into chunk frames.

use std::num::NonZeroU32;

use super::id::ChunkStreamIdAllocator;
use crate::frame::{FrameHeader, WireFrame};

/// Splits outbound frames whose payload exceeds a per-frame body limit.
///
/// Frames within the limit pass through untouched. Larger payloads become an
/// ordered run of chunk frames sharing a freshly allocated stream id, each
/// carrying the original correlation id and only the last carrying the final
/// flag; the receiving side's reassembly table stitches them back together.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU32;
///
/// use bytes::Bytes;
/// use rpcframe::{Chunker, FrameHeader, WireFrame};
///
/// let chunker = Chunker::new(NonZeroU32::new(4).expect("non-zero"));
/// let frame = WireFrame::new(FrameHeader::new(9), Bytes::from_static(b"0123456789"));
/// let fragments = chunker.split(frame);
///
/// assert_eq!(fragments.len(), 3);
/// assert!(fragments.iter().all(|f| f.header.is_chunk()));
/// assert!(fragments.last().expect("non-empty").header.is_final_chunk());
/// ```
#[derive(Debug, Default)]
pub struct Chunker {
    body_limit: Option<NonZeroU32>,
    allocator: ChunkStreamIdAllocator,
}

impl Chunker {
    /// Create a splitter with the given per-frame body limit.
    #[must_use]
    pub fn new(body_limit: NonZeroU32) -> Self {
        Self {
            body_limit: Some(body_limit),
            allocator: ChunkStreamIdAllocator::new(),
        }
    }

    /// Split `frame` into chunk frames if its payload exceeds the limit.
    ///
    /// With no limit configured, or a payload within the limit, the frame is
    /// returned unchanged as the only element.
    #[must_use]
    pub fn split(&self, frame: WireFrame) -> Vec<WireFrame> {
        let Some(limit) = self.body_limit else {
            return vec![frame];
        };
        let limit = usize::try_from(limit.get()).unwrap_or(usize::MAX);
        if frame.payload.len() <= limit {
            return vec![frame];
        }

        let stream_id = self.allocator.next_id();
        let correlation_id = frame.header.correlation_id;
        let payload = frame.payload;
        let mut frames = Vec::with_capacity(payload.len().div_ceil(limit));
        let mut offset = 0;
        while offset < payload.len() {
            let end = usize::min(offset + limit, payload.len());
            let is_final = end == payload.len();
            let header = FrameHeader::chunk(correlation_id, stream_id, is_final);
            frames.push(WireFrame::new(header, payload.slice(offset..end)));
            offset = end;
        }
        frames
    }
}
