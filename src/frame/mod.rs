//! Wire framing: the fixed header model and the streaming frame codec.
//!
//! Every frame on the wire is `[16-byte header][body of header.body_size
//! bytes]`, header fields in little-endian order. [`FrameCodec`] incrementally
//! parses that layout from a connection's read buffer, folding chunked
//! transfers through the shared reassembly table so callers only ever see
//! fully assembled messages.

pub mod codec;
pub mod error;
pub mod header;
pub mod message;

pub use codec::FrameCodec;
pub use error::DecodeError;
pub use header::{FrameHeader, HEADER_SIZE, MAGIC_CODE};
pub use message::WireFrame;
