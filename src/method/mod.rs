//! Per-method codec bindings for typed request and response bodies.
//!
//! An RPC method descriptor owns at most one input codec and one output
//! codec, obtained from a codec factory exactly once when the descriptor is
//! built and immutable afterwards. Methods that declare no input or output
//! type carry no codec for that direction, and the corresponding entry point
//! is a no-op rather than a failure.

pub mod body;
pub mod error;

pub use body::{BincodeCodec, BincodeCodecFactory, BodyCodec};
pub use error::CodecError;

#[cfg(feature = "codec-serde")]
pub use body::SerdeBincodeCodec;

use std::sync::Arc;

use bincode::{Decode, Encode};

/// Encode/decode entry points for one RPC method's typed bodies.
///
/// `I` and `O` are the method's declared input and output types. The binding
/// performs no validation and no retries: failures from the underlying body
/// codec propagate unchanged as [`CodecError`].
///
/// # Examples
///
/// ```
/// use bincode::{Decode, Encode};
/// use rpcframe::MethodCodec;
///
/// #[derive(Encode, Decode, Debug, PartialEq)]
/// struct Echo {
///     text: String,
/// }
///
/// let codec = MethodCodec::<Echo, Echo>::bincode();
/// let request = Echo { text: "hi".into() };
/// let bytes = codec.encode_input(&request)?.expect("input codec bound");
/// let decoded = codec.decode_output(&bytes)?.expect("output codec bound");
/// assert_eq!(decoded, request);
/// # Ok::<(), rpcframe::CodecError>(())
/// ```
pub struct MethodCodec<I, O> {
    input: Option<Arc<dyn BodyCodec<I>>>,
    output: Option<Arc<dyn BodyCodec<O>>>,
}

impl<I, O> MethodCodec<I, O> {
    /// Descriptor for a method that declares neither input nor output type.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input: None,
            output: None,
        }
    }

    /// Bind the codec handle for the declared input type.
    #[must_use]
    pub fn with_input(mut self, codec: Arc<dyn BodyCodec<I>>) -> Self {
        self.input = Some(codec);
        self
    }

    /// Bind the codec handle for the declared output type.
    #[must_use]
    pub fn with_output(mut self, codec: Arc<dyn BodyCodec<O>>) -> Self {
        self.output = Some(codec);
        self
    }

    /// Encode a typed request body into wire payload bytes.
    ///
    /// Returns `Ok(None)` when the method declares no input type; no codec is
    /// invoked on that path.
    ///
    /// # Errors
    ///
    /// Propagates the underlying codec's failure unchanged.
    pub fn encode_input(&self, value: &I) -> Result<Option<Vec<u8>>, CodecError> {
        self.input
            .as_ref()
            .map(|codec| codec.encode(value))
            .transpose()
    }

    /// Decode wire payload bytes into the typed response body.
    ///
    /// Returns `Ok(None)` when the method declares no output type; no codec
    /// is invoked on that path.
    ///
    /// # Errors
    ///
    /// Propagates the underlying codec's failure unchanged.
    pub fn decode_output(&self, bytes: &[u8]) -> Result<Option<O>, CodecError> {
        self.output
            .as_ref()
            .map(|codec| codec.decode(bytes))
            .transpose()
    }

    /// Whether an input codec is bound.
    #[must_use]
    pub fn has_input(&self) -> bool { self.input.is_some() }

    /// Whether an output codec is bound.
    #[must_use]
    pub fn has_output(&self) -> bool { self.output.is_some() }
}

impl<I, O> MethodCodec<I, O>
where
    I: Encode + Decode<()> + Send + Sync + 'static,
    O: Encode + Decode<()> + Send + Sync + 'static,
{
    /// Descriptor with bincode-backed codecs for both directions.
    #[must_use]
    pub fn bincode() -> Self {
        let factory = BincodeCodecFactory;
        Self::new()
            .with_input(factory.body_codec::<I>())
            .with_output(factory.body_codec::<O>())
    }
}

impl<I, O> Default for MethodCodec<I, O> {
    fn default() -> Self { Self::new() }
}

impl<I, O> Clone for MethodCodec<I, O> {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
            output: self.output.clone(),
        }
    }
}

impl<I, O> std::fmt::Debug for MethodCodec<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodCodec")
            .field("input", &self.input.is_some())
            .field("output", &self.output.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
