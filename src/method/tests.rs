//! Unit tests for the method codec binding.

use std::io;

use bincode::{Decode, Encode};

use super::{BincodeCodecFactory, BodyCodec, CodecError, MethodCodec};

#[derive(Encode, Decode, Debug, PartialEq)]
struct EchoRequest {
    text: String,
    attachment: Vec<u8>,
}

#[derive(Encode, Decode, Debug, PartialEq)]
struct EchoResponse {
    text: String,
}

#[test]
fn bound_codecs_round_trip_typed_bodies() {
    let codec = MethodCodec::<EchoRequest, EchoResponse>::bincode();
    assert!(codec.has_input());
    assert!(codec.has_output());

    let request = EchoRequest {
        text: "hello".into(),
        attachment: vec![1, 2, 3],
    };
    let bytes = codec
        .encode_input(&request)
        .expect("encode")
        .expect("input codec bound");
    let round_tripped: EchoRequest = BincodeCodecFactory
        .body_codec::<EchoRequest>()
        .decode(&bytes)
        .expect("decode");
    assert_eq!(round_tripped, request);

    let response = EchoResponse { text: "world".into() };
    let response_bytes = BincodeCodecFactory
        .body_codec::<EchoResponse>()
        .encode(&response)
        .expect("encode");
    let decoded = codec
        .decode_output(&response_bytes)
        .expect("decode")
        .expect("output codec bound");
    assert_eq!(decoded, response);
}

#[test]
fn absent_input_codec_is_a_no_op() {
    let codec = MethodCodec::<(), EchoResponse>::new()
        .with_output(BincodeCodecFactory.body_codec::<EchoResponse>());

    assert!(!codec.has_input());
    assert!(codec.encode_input(&()).expect("no-op encode").is_none());
}

#[test]
fn absent_output_codec_is_a_no_op() {
    let codec = MethodCodec::<EchoRequest, ()>::new()
        .with_input(BincodeCodecFactory.body_codec::<EchoRequest>());

    assert!(!codec.has_output());
    // Garbage bytes never reach a codec when no output type is declared.
    let decoded = codec.decode_output(b"\xff\xff\xff").expect("no-op decode");
    assert!(decoded.is_none());
}

#[test]
fn decode_failures_propagate_as_codec_errors() {
    let codec = MethodCodec::<EchoRequest, EchoResponse>::bincode();

    let err = codec
        .decode_output(&[0xff])
        .expect_err("truncated body must not decode");
    assert!(matches!(err, CodecError::Decode(_)));

    let io_err: io::Error = err.into();
    assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
}

#[cfg(feature = "codec-serde")]
mod serde_codec {
    use std::sync::Arc;

    use super::super::{BodyCodec, MethodCodec, SerdeBincodeCodec};

    #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
    struct Ping {
        sequence: u64,
    }

    #[test]
    fn serde_codec_round_trips() {
        let handle: Arc<dyn BodyCodec<Ping>> = Arc::new(SerdeBincodeCodec::new());
        let codec = MethodCodec::<Ping, Ping>::new()
            .with_input(Arc::clone(&handle))
            .with_output(handle);

        let ping = Ping { sequence: 99 };
        let bytes = codec
            .encode_input(&ping)
            .expect("encode")
            .expect("input codec bound");
        let decoded = codec
            .decode_output(&bytes)
            .expect("decode")
            .expect("output codec bound");
        assert_eq!(decoded, ping);
    }
}
