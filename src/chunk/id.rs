//! Chunk stream identifiers and send-side allocation.

use std::sync::atomic::{AtomicU16, Ordering};

/// Identifier shared by every fragment of one chunked logical message.
///
/// The zero value is reserved: frames carrying it are not part of any chunked
/// transfer. Identifiers only need to be unique while their transfer is in
/// flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkStreamId(u16);

impl ChunkStreamId {
    /// Sentinel carried by frames that are not chunked.
    pub const NONE: Self = Self(0);

    /// Create an identifier with the provided wire value.
    #[must_use]
    pub const fn new(value: u16) -> Self { Self(value) }

    /// Return the wire representation.
    #[must_use]
    pub const fn get(self) -> u16 { self.0 }

    /// Whether this is the reserved "not chunked" sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool { self.0 == 0 }
}

impl From<u16> for ChunkStreamId {
    fn from(value: u16) -> Self { Self(value) }
}

impl std::fmt::Display for ChunkStreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out stream identifiers for outbound chunked transfers.
///
/// Identifiers wrap around; the reserved zero sentinel is skipped.
#[derive(Debug, Default)]
pub struct ChunkStreamIdAllocator {
    next: AtomicU16,
}

impl ChunkStreamIdAllocator {
    /// Create an allocator starting from the lowest identifier.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Reserve the next free identifier.
    pub fn next_id(&self) -> ChunkStreamId {
        loop {
            let id = self.next.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
            if id != 0 {
                return ChunkStreamId(id);
            }
        }
    }
}
