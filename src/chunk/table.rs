//! Process-wide table of in-progress chunk reassemblies.

use std::time::{Duration, Instant};

use bytes::BytesMut;
use dashmap::{DashMap, mapref::entry::Entry};

use super::id::ChunkStreamId;
use crate::frame::{FrameHeader, WireFrame};

/// One partially assembled logical message.
///
/// Carries the first fragment's header and arrival time; the buffer grows as
/// later fragments are merged in arrival order.
#[derive(Debug)]
struct PendingChunk {
    header: FrameHeader,
    buffer: BytesMut,
    received_at: Instant,
}

impl PendingChunk {
    fn start(frame: &WireFrame) -> Self {
        Self {
            header: frame.header,
            buffer: BytesMut::from(&frame.payload[..]),
            received_at: frame.received_at(),
        }
    }

    fn merge(&mut self, payload: &[u8]) { self.buffer.extend_from_slice(payload); }

    fn into_merged(self) -> WireFrame {
        let mut header = self.header;
        header.mark_complete();
        WireFrame::with_received_at(header, self.buffer.freeze(), self.received_at)
    }

    fn snapshot(&self, stream_id: ChunkStreamId) -> ChunkSnapshot {
        ChunkSnapshot {
            stream_id,
            correlation_id: self.header.correlation_id,
            received_at: self.received_at,
            buffered_len: self.buffer.len(),
        }
    }
}

/// Point-in-time view of one in-progress assembly.
///
/// Taken by [`ReassemblyTable::snapshot`] so the reaper can scan entries
/// without holding table locks while it works.
#[derive(Clone, Copy, Debug)]
pub struct ChunkSnapshot {
    /// Stream the assembly belongs to.
    pub stream_id: ChunkStreamId,
    /// Correlation id from the stream's first fragment.
    pub correlation_id: u32,
    /// Arrival time of the stream's first fragment.
    pub received_at: Instant,
    /// Bytes buffered so far.
    pub buffered_len: usize,
}

/// Concurrent map from chunk stream id to its in-progress assembly.
///
/// Shared by every connection's decoder and the reaper; all operations are
/// safe without caller-side locking. At most one live entry exists per stream
/// id at any time. Entries leave the table either on completion or on reaper
/// eviction, and both removals are idempotent.
#[derive(Debug, Default)]
pub struct ReassemblyTable {
    pending: DashMap<ChunkStreamId, PendingChunk>,
}

impl ReassemblyTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Fold one chunk fragment into the table.
    ///
    /// The first fragment of a stream seeds a new entry; later fragments
    /// extend it in arrival order. Returns the fully merged frame when
    /// `frame` is its stream's final fragment (the entry is removed in the
    /// same step) and `None` otherwise. Insert-or-merge happens under the
    /// entry lock, so two fragments racing on one stream cannot lose updates.
    pub fn accept_chunk(&self, frame: WireFrame) -> Option<WireFrame> {
        let is_final = frame.header.is_final_chunk();
        match self.pending.entry(frame.header.chunk_stream_id) {
            Entry::Occupied(mut occupied) => {
                occupied.get_mut().merge(&frame.payload);
                if is_final {
                    return Some(occupied.remove().into_merged());
                }
            }
            Entry::Vacant(vacant) => {
                let pending = PendingChunk::start(&frame);
                if is_final {
                    return Some(pending.into_merged());
                }
                vacant.insert(pending);
            }
        }
        None
    }

    /// Arrival time of the first fragment for `stream_id`, if one is pending.
    #[must_use]
    pub fn started_at(&self, stream_id: ChunkStreamId) -> Option<Instant> {
        self.pending
            .get(&stream_id)
            .map(|pending| pending.received_at)
    }

    /// Drop the assembly for `stream_id`, returning whether one existed.
    pub fn remove(&self, stream_id: ChunkStreamId) -> bool {
        self.pending.remove(&stream_id).is_some()
    }

    /// Drop the assembly for `stream_id` only if it still belongs to the
    /// transfer observed at `started_at`.
    ///
    /// Guards reaper eviction against the race where a stream completes and a
    /// new transfer reuses its identifier between snapshot and removal.
    pub(crate) fn remove_if_started_at(
        &self,
        stream_id: ChunkStreamId,
        started_at: Instant,
    ) -> Option<ChunkSnapshot> {
        self.pending
            .remove_if(&stream_id, |_, pending| pending.received_at == started_at)
            .map(|(id, pending)| pending.snapshot(id))
    }

    /// Evict every assembly whose age at `now` exceeds `timeout`.
    ///
    /// Accepting an explicit clock reading keeps eviction deterministic in
    /// tests and lets the reaper co-ordinate sweeps with its own timer.
    /// Returns a snapshot of each evicted entry.
    pub fn purge_expired_at(&self, timeout: Duration, now: Instant) -> Vec<ChunkSnapshot> {
        let mut evicted = Vec::new();
        for entry in self.snapshot() {
            if now.saturating_duration_since(entry.received_at) <= timeout {
                continue;
            }
            if let Some(snapshot) = self.remove_if_started_at(entry.stream_id, entry.received_at) {
                evicted.push(snapshot);
            }
        }
        evicted
    }

    /// Point-in-time copy of every entry's metadata.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ChunkSnapshot> {
        self.pending
            .iter()
            .map(|entry| entry.value().snapshot(*entry.key()))
            .collect()
    }

    /// Number of in-progress assemblies.
    #[must_use]
    pub fn len(&self) -> usize { self.pending.len() }

    /// Whether no assemblies are in progress.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.pending.is_empty() }
}
