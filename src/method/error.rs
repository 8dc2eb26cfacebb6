//! Errors surfaced by the method codec binding.

use std::{error::Error, io};

use thiserror::Error as ThisError;

/// A typed body could not be converted to or from wire payload bytes.
///
/// Wraps the collaborating codec's failure unchanged. Codec errors are local
/// to a single call: they never affect framing state or other in-flight
/// calls.
#[derive(Debug, ThisError)]
pub enum CodecError {
    /// The request body could not be serialised.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] Box<dyn Error + Send + Sync>),

    /// The response body could not be deserialised.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] Box<dyn Error + Send + Sync>),
}

impl From<CodecError> for io::Error {
    fn from(err: CodecError) -> Self { io::Error::new(io::ErrorKind::InvalidData, err) }
}
