//! Behavioural tests for incremental frame decoding.
//!
//! The decoder must be invariant to how the transport fragments its reads:
//! decoding a byte stream in one call yields the same frames as decoding it
//! split at arbitrary points and fed incrementally.

use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use proptest::prelude::*;
use rpcframe::{ChunkStreamId, FrameCodec, FrameHeader, HEADER_SIZE, ReassemblyTable, WireFrame};
use tokio_util::codec::{Decoder, Encoder};

fn fresh_codec() -> FrameCodec { FrameCodec::new(Arc::new(ReassemblyTable::new())) }

fn encode_all(frames: &[WireFrame]) -> Vec<u8> {
    let mut codec = fresh_codec();
    let mut buf = BytesMut::new();
    for frame in frames {
        codec.encode(frame.clone(), &mut buf).expect("encode frame");
    }
    buf.to_vec()
}

/// Feed `pieces` into a fresh decoder, draining frames after every piece.
fn decode_pieces(pieces: &[Vec<u8>]) -> Vec<(FrameHeader, Vec<u8>)> {
    let mut codec = fresh_codec();
    let mut buf = BytesMut::new();
    let mut decoded = Vec::new();
    for piece in pieces {
        buf.extend_from_slice(piece);
        while let Some(frame) = codec.decode(&mut buf).expect("decode step") {
            decoded.push((frame.header, frame.payload.to_vec()));
        }
    }
    assert!(buf.is_empty(), "test streams end on a frame boundary");
    decoded
}

/// Build a stream mixing plain frames with in-order chunked transfers.
fn build_stream(payload_lens: &[usize]) -> Vec<WireFrame> {
    let mut frames = Vec::new();
    for (index, len) in payload_lens.iter().enumerate() {
        let correlation_id = u32::try_from(index).expect("small index");
        let fill = u8::try_from(index % 251).expect("byte range");
        let payload = vec![fill; *len];
        if index % 3 == 2 {
            let stream_id =
                ChunkStreamId::new(u16::try_from(index + 1).expect("small stream id"));
            let third = len / 3;
            let (first, rest) = payload.split_at(third);
            let (middle, last) = rest.split_at(third);
            for (body, is_final) in [(first, false), (middle, false), (last, true)] {
                frames.push(WireFrame::new(
                    FrameHeader::chunk(correlation_id, stream_id, is_final),
                    Bytes::copy_from_slice(body),
                ));
            }
        } else {
            frames.push(WireFrame::new(
                FrameHeader::new(correlation_id),
                Bytes::from(payload),
            ));
        }
    }
    frames
}

proptest! {
    #[test]
    fn splitting_points_do_not_change_decoded_frames(
        payload_lens in prop::collection::vec(0usize..48, 1..6),
        piece_lens in prop::collection::vec(1usize..40, 0..24),
    ) {
        let stream = encode_all(&build_stream(&payload_lens));
        let whole = decode_pieces(&[stream.clone()]);

        let mut pieces = Vec::new();
        let mut offset = 0;
        for len in piece_lens {
            if offset >= stream.len() {
                break;
            }
            let end = usize::min(offset + len, stream.len());
            pieces.push(stream[offset..end].to_vec());
            offset = end;
        }
        if offset < stream.len() {
            pieces.push(stream[offset..].to_vec());
        }

        prop_assert_eq!(whole, decode_pieces(&pieces));
    }
}

#[test]
fn header_and_body_arriving_separately_decode_once_complete() {
    let stream = encode_all(&[WireFrame::new(
        FrameHeader::new(600),
        Bytes::from_static(b"0123456789"),
    )]);
    assert_eq!(stream.len(), HEADER_SIZE + 10);

    let halves = [stream[..13].to_vec(), stream[13..].to_vec()];
    let decoded = decode_pieces(&halves);
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].0.correlation_id, 600);
    assert_eq!(decoded[0].1, b"0123456789");
}

#[test]
fn chunked_transfer_yields_exactly_one_message() {
    let stream_id = ChunkStreamId::new(41);
    let fragments: Vec<WireFrame> = [
        (&b"fragmented "[..], false),
        (&b"logical "[..], false),
        (&b"message"[..], true),
    ]
    .into_iter()
    .map(|(body, is_final)| {
        WireFrame::new(
            FrameHeader::chunk(77, stream_id, is_final),
            Bytes::from_static(body),
        )
    })
    .collect();

    let decoded = decode_pieces(&[encode_all(&fragments)]);
    assert_eq!(decoded.len(), 1);
    let (header, payload) = &decoded[0];
    assert_eq!(payload, b"fragmented logical message");
    assert_eq!(header.correlation_id, 77);
    assert_eq!(header.chunk_stream_id, stream_id);
    assert!(header.is_final_chunk());
}

#[test]
fn corrupted_magic_aborts_the_stream() {
    let mut stream = encode_all(&[WireFrame::new(
        FrameHeader::new(1),
        Bytes::from_static(b"payload"),
    )]);
    stream[..4].copy_from_slice(b"JUNK");

    let mut codec = fresh_codec();
    let mut buf = BytesMut::from(&stream[..]);
    let err = codec.decode(&mut buf).expect_err("bad magic is fatal");
    assert_eq!(err.to_string(), "bad magic code: JUNK");
}
