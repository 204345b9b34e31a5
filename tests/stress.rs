use bytes::BytesMut;
use packet_wire::core::codec::FrameCodec;
use packet_wire::core::message_type::MessageType;
use packet_wire::core::packet::Packet;
use tokio_util::codec::{Decoder, Encoder};

#[test]
fn stress_packet_encode_decode_large_series() {
    // Heavy burst of frames through one codec and one buffer
    let mut codec = FrameCodec::default();
    let mut buf = BytesMut::new();

    for size in [0usize, 1, 64, 512, 4096, 65536, 1_048_576] {
        let message = "s".repeat(size);
        for i in 0..200 {
            let p = Packet::new(i, MessageType::Data, i, -i, message.as_str()).unwrap();
            codec.encode(&p, &mut buf).unwrap();
            let decoded = codec.decode(&mut buf).unwrap().unwrap();
            assert_eq!(decoded.message_length() as usize, size);
            assert!(buf.is_empty());
        }
    }
}

#[test]
fn stress_many_frames_single_read() {
    let mut codec = FrameCodec::default();
    let mut buf = BytesMut::new();

    for i in 0..50_000 {
        let p = Packet::new(0, MessageType::Data, i, 0, "burst").unwrap();
        codec.encode(p, &mut buf).unwrap();
    }

    let mut count = 0;
    while let Some(p) = codec.decode(&mut buf).unwrap() {
        assert_eq!(p.message_source_id(), count);
        count += 1;
    }
    assert_eq!(count, 50_000);
}
