//! Wire-protocol core for an RPC transport.
//!
//! `rpcframe` turns a raw, possibly fragmented byte stream arriving on a
//! connection into discrete, fully assembled messages, and typed method
//! calls into protocol-compliant byte payloads. It provides the streaming
//! [`FrameCodec`], the shared [`ReassemblyTable`] and its background
//! [`ChunkReaper`] for oversized messages split into chunk frames, and the
//! per-method [`MethodCodec`] binding used by the invocation layer.
//!
//! Transport management, method dispatch, and configuration bootstrap are
//! collaborators of this crate, not part of it.

pub mod byte_order;
pub mod chunk;
pub mod frame;
pub mod method;
pub mod runtime;

pub use chunk::{
    ChunkReaper,
    ChunkSnapshot,
    ChunkStreamId,
    ChunkStreamIdAllocator,
    Chunker,
    ReassemblyConfig,
    ReassemblyTable,
};
pub use frame::{DecodeError, FrameCodec, FrameHeader, HEADER_SIZE, MAGIC_CODE, WireFrame};
pub use method::{BincodeCodec, BincodeCodecFactory, BodyCodec, CodecError, MethodCodec};
pub use runtime::FramingRuntime;
