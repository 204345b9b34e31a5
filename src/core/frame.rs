//! # Frame Encoding and Decoding
//!
//! Translation between a [`Packet`] and its wire frame.
//!
//! ## Wire Format
//! ```text
//! [Magic(4)] [Type(2)] [Source(4)] [Destination(4)] [Length(4)] [Message(N)]
//! ```
//!
//! All integers are big-endian `i32`. The header carries no version byte,
//! no terminator and no checksum: `Length` alone tells the decoder where the
//! frame ends, so a wrong length desynchronizes the stream for good.
//!
//! Every function here is pure. Nothing is shared between calls, so
//! encoders and decoders can run concurrently on any number of threads.

use crate::config::{HEADER_SIZE, MAX_FRAME_SIZE};
use crate::core::message_type::MessageType;
use crate::core::packet::Packet;
use crate::core::text;
use crate::error::{ProtocolError, Result};
use crate::utils::buffer_pool::{FramePool, PooledFrame};
use bytes::BufMut;

/// Fixed-size header that precedes every message payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    magic_bytes: i32,
    message_type: MessageType,
    message_source_id: i32,
    message_destination_id: i32,
    message_length: i32,
}

impl FrameHeader {
    /// Parse and check a header at the start of `buf`.
    ///
    /// Validates the type code and the declared length against
    /// `max_frame_size`; does not require the payload to be present.
    pub fn parse(buf: &[u8], max_frame_size: usize) -> Result<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(ProtocolError::TruncatedFrame {
                needed: HEADER_SIZE,
                available: buf.len(),
            });
        }

        let message_type = MessageType::try_from([buf[4], buf[5]])?;
        let message_length = read_i32(buf, 14);

        let within_limit = usize::try_from(message_length)
            .ok()
            .and_then(|len| len.checked_add(HEADER_SIZE))
            .is_some_and(|total| total <= max_frame_size);
        if !within_limit {
            return Err(ProtocolError::MalformedLength {
                length: message_length,
                max_frame_size,
            });
        }

        Ok(Self {
            magic_bytes: read_i32(buf, 0),
            message_type,
            message_source_id: read_i32(buf, 6),
            message_destination_id: read_i32(buf, 10),
            message_length,
        })
    }

    pub fn magic_bytes(&self) -> i32 {
        self.magic_bytes
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn message_source_id(&self) -> i32 {
        self.message_source_id
    }

    pub fn message_destination_id(&self) -> i32 {
        self.message_destination_id
    }

    /// Declared payload length; never negative once parsed
    pub fn message_length(&self) -> i32 {
        self.message_length
    }

    /// Total frame size this header announces
    pub fn frame_len(&self) -> usize {
        HEADER_SIZE + self.payload_len()
    }

    /// Payload size this header announces
    pub fn payload_len(&self) -> usize {
        // parse() rejects negative lengths
        usize::try_from(self.message_length).unwrap_or(0)
    }

    /// Build the packet from this header and exactly its payload bytes
    pub(crate) fn into_packet(self, payload: &[u8]) -> Packet {
        debug_assert_eq!(payload.len(), self.payload_len());
        Packet::with_declared_length(
            self.magic_bytes,
            self.message_type,
            self.message_source_id,
            self.message_destination_id,
            self.message_length,
            text::decode(payload),
        )
    }
}

#[inline]
fn read_i32(buf: &[u8], at: usize) -> i32 {
    i32::from_be_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

/// Serialize a packet into a freshly allocated frame
pub fn encode(packet: &Packet) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(packet.frame_len());
    encode_into(packet, &mut out)?;
    Ok(out)
}

/// Serialize a packet into `dst`.
///
/// The packet is validated first; on error nothing is written.
pub fn encode_into<B: BufMut>(packet: &Packet, dst: &mut B) -> Result<()> {
    packet.validate()?;

    dst.put_i32(packet.magic_bytes());
    dst.put_slice(&packet.message_type().code());
    dst.put_i32(packet.message_source_id());
    dst.put_i32(packet.message_destination_id());
    dst.put_i32(packet.message_length());
    text::encode_into(packet.message(), dst)
}

/// Serialize a packet into a buffer checked out of `pool`.
///
/// The pool lock is held only while the buffer is taken out and put back.
pub fn encode_pooled(packet: &Packet, pool: &FramePool) -> Result<PooledFrame> {
    let mut frame = pool.checkout();
    frame.reserve(packet.frame_len());
    encode_into(packet, &mut *frame)?;
    Ok(frame)
}

/// Parse one frame from the start of `buf` using [`MAX_FRAME_SIZE`].
///
/// Returns the packet and the number of bytes it occupied; anything after
/// that belongs to the next frame.
pub fn decode(buf: &[u8]) -> Result<(Packet, usize)> {
    decode_with_limit(buf, MAX_FRAME_SIZE)
}

/// Parse one frame from the start of `buf`, rejecting frames larger than
/// `max_frame_size`
pub fn decode_with_limit(buf: &[u8], max_frame_size: usize) -> Result<(Packet, usize)> {
    let header = FrameHeader::parse(buf, max_frame_size)?;
    let frame_len = header.frame_len();
    if buf.len() < frame_len {
        return Err(ProtocolError::TruncatedFrame {
            needed: frame_len,
            available: buf.len(),
        });
    }

    let packet = header.into_packet(&buf[HEADER_SIZE..frame_len]);
    Ok((packet, frame_len))
}

/// Iterate over the complete frames at the start of `buf`
pub fn frames(buf: &[u8], max_frame_size: usize) -> Frames<'_> {
    Frames {
        buf,
        offset: 0,
        max_frame_size,
        done: false,
    }
}

/// Iterator over consecutive frames in a byte buffer.
///
/// Stops without an error at a truncated tail, leaving it for the caller to
/// complete; [`Frames::consumed`] tells where that tail begins. A fatal
/// error is yielded once and ends the iteration.
#[derive(Debug)]
pub struct Frames<'a> {
    buf: &'a [u8],
    offset: usize,
    max_frame_size: usize,
    done: bool,
}

impl<'a> Frames<'a> {
    /// Bytes taken by the frames yielded so far
    pub fn consumed(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed
    pub fn remainder(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }
}

impl Iterator for Frames<'_> {
    type Item = Result<Packet>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset == self.buf.len() {
            return None;
        }

        match decode_with_limit(&self.buf[self.offset..], self.max_frame_size) {
            Ok((packet, used)) => {
                self.offset += used;
                Some(Ok(packet))
            }
            Err(e) if e.is_incomplete() => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
