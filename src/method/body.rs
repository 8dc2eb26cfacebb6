//! Opaque body-codec capability and the bincode-backed default.

use std::{marker::PhantomData, sync::Arc};

use bincode::{Decode, Encode, config, decode_from_slice, encode_to_vec};

use super::error::CodecError;

/// Structured-encoding capability for one message type.
///
/// This is the collaborating codec's interface as the method binding sees it:
/// encode a typed value into body bytes and decode body bytes back into the
/// type. Implementations report failures as [`CodecError`], which the binding
/// propagates unchanged.
pub trait BodyCodec<T>: Send + Sync {
    /// Serialise `value` into wire payload bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] when the value cannot be serialised.
    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Deserialise a value from wire payload bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] when the bytes cannot be parsed.
    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// Body codec using bincode with its standard configuration.
pub struct BincodeCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> BincodeCodec<T> {
    /// Create a codec for `T`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for BincodeCodec<T> {
    fn default() -> Self { Self::new() }
}

impl<T> BodyCodec<T> for BincodeCodec<T>
where
    T: Encode + Decode<()> + Send + Sync,
{
    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        encode_to_vec(value, config::standard()).map_err(|err| CodecError::Encode(Box::new(err)))
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        decode_from_slice(bytes, config::standard())
            .map(|(value, _)| value)
            .map_err(|err| CodecError::Decode(Box::new(err)))
    }
}

/// Builds [`BincodeCodec`] handles for method descriptors.
///
/// A factory is consulted once per declared type while a descriptor is being
/// constructed; the resulting handles are cached on the descriptor for its
/// lifetime.
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeCodecFactory;

impl BincodeCodecFactory {
    /// Obtain the codec handle for `T`.
    #[must_use]
    pub fn body_codec<T>(self) -> Arc<dyn BodyCodec<T>>
    where
        T: Encode + Decode<()> + Send + Sync + 'static,
    {
        Arc::new(BincodeCodec::new())
    }
}

/// Body codec bridging Serde types through bincode's standard configuration.
#[cfg(feature = "codec-serde")]
pub struct SerdeBincodeCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

#[cfg(feature = "codec-serde")]
impl<T> SerdeBincodeCodec<T> {
    /// Create a codec for `T`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

#[cfg(feature = "codec-serde")]
impl<T> Default for SerdeBincodeCodec<T> {
    fn default() -> Self { Self::new() }
}

#[cfg(feature = "codec-serde")]
impl<T> BodyCodec<T> for SerdeBincodeCodec<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync,
{
    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        bincode::serde::encode_to_vec(value, config::standard())
            .map_err(|err| CodecError::Encode(Box::new(err)))
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        bincode::serde::decode_from_slice(bytes, config::standard())
            .map(|(value, _)| value)
            .map_err(|err| CodecError::Decode(Box::new(err)))
    }
}
