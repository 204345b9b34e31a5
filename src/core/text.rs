//! ISO-8859-1 text encoding for message payloads.
//!
//! Every character maps to exactly one byte, so the byte length of an
//! encodable message equals its character count and decoding never fails.

use crate::error::{EncodingError, Result};
use bytes::BufMut;

/// Byte length of `message` on the wire
pub fn encoded_len(message: &str) -> Result<usize> {
    let mut len = 0usize;
    for (index, character) in message.chars().enumerate() {
        if u32::from(character) > 0xFF {
            return Err(EncodingError::UnmappableCharacter { character, index }.into());
        }
        len += 1;
    }
    Ok(len)
}

/// Write the single-byte encoding of `message` into `dst`.
///
/// Callers validate with [`encoded_len`] first; unmappable characters are
/// rejected here as well so nothing partial is ever written.
pub fn encode_into<B: BufMut>(message: &str, dst: &mut B) -> Result<()> {
    encoded_len(message)?;
    for character in message.chars() {
        dst.put_u8(u32::from(character) as u8);
    }
    Ok(())
}

/// Encode `message` into a fresh byte vector
pub fn encode(message: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded_len(message)?);
    encode_into(message, &mut out)?;
    Ok(out)
}

/// Decode single-byte text; total over all inputs
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
