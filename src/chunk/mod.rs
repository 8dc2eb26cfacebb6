//! Chunked-transfer support: shared reassembly state, the background reaper,
//! and send-side splitting.
//!
//! One logical message larger than a transport's frame budget travels as an
//! ordered sequence of chunk frames sharing a [`ChunkStreamId`]. Every
//! connection's decoder folds inbound fragments into one process-wide
//! [`ReassemblyTable`]; the [`ChunkReaper`] bounds the memory held by
//! transfers whose peer went away. Fragments are assumed to arrive in send
//! order on a single connection; no reordering is performed.

pub mod config;
pub mod id;
pub mod reaper;
pub mod splitter;
pub mod table;

pub use config::{DEFAULT_SWEEP_INTERVAL, ReassemblyConfig};
pub use id::{ChunkStreamId, ChunkStreamIdAllocator};
pub use reaper::ChunkReaper;
pub use splitter::Chunker;
pub use table::{ChunkSnapshot, ReassemblyTable};
