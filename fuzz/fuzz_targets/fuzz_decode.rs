#![no_main]

use libfuzzer_sys::fuzz_target;
use packet_wire::core::frame::{decode_with_limit, encode, frames};

fuzz_target!(|data: &[u8]| {
    // Decoding must never panic, and whatever decodes must re-encode to the same bytes
    if let Ok((packet, consumed)) = decode_with_limit(data, 64 * 1024) {
        let frame = encode(&packet).expect("decoded packet must encode");
        assert_eq!(&frame[..], &data[..consumed]);
    }

    for frame in frames(data, 64 * 1024) {
        if frame.is_err() {
            break;
        }
    }
});
