//! Error taxonomy for the framing layer.
//!
//! An incomplete frame is not an error: the decoder reports it by returning
//! `Ok(None)` and expects to be re-invoked once more bytes have arrived.
//! Every variant below is connection-fatal: once raised, the stream can no
//! longer be trusted and the caller must close the connection rather than
//! attempt resynchronisation.

use std::io;

use thiserror::Error;

/// Errors raised while decoding frames from a connection's byte stream.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The header slice handed to [`FrameHeader::parse`] was shorter than the
    /// fixed header size. The decoder always pre-checks availability, so this
    /// indicates a bug in the calling code.
    ///
    /// [`FrameHeader::parse`]: super::FrameHeader::parse
    #[error("truncated frame header: have {have} bytes, need {need}")]
    TruncatedHeader {
        /// Bytes actually supplied.
        have: usize,
        /// Bytes required for a complete header.
        need: usize,
    },

    /// The magic code at the front of a frame did not match [`MAGIC_CODE`].
    ///
    /// [`MAGIC_CODE`]: super::MAGIC_CODE
    #[error("bad magic code: {found}")]
    BadMagic {
        /// The rejected magic bytes, rendered lossily for diagnostics.
        found: String,
    },

    /// Transport-level I/O failure surfaced through the codec layer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<DecodeError> for io::Error {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Io(e) => e,
            e @ DecodeError::TruncatedHeader { .. } => {
                io::Error::new(io::ErrorKind::UnexpectedEof, e)
            }
            e @ DecodeError::BadMagic { .. } => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}
