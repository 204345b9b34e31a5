//! # Frame Codec
//!
//! Tokio codec that splits a byte stream into packets and writes packets
//! back as frames, for use with `FramedRead`, `FramedWrite` or `Framed`.
//!
//! A read buffer may hold several frames or a fraction of one. A truncated
//! frame is not an error at this layer: `decode` returns `Ok(None)`, reserves
//! room for the missing bytes and leaves the buffer untouched until the rest
//! arrives. Unknown type codes and malformed lengths are returned as errors
//! and end the stream.

use crate::config::{CodecConfig, MAX_FRAME_SIZE};
use crate::core::frame::{self, FrameHeader};
use crate::core::packet::Packet;
use crate::error::{ProtocolError, Result};
use crate::utils::metrics::CodecMetrics;
use bytes::BytesMut;
use std::sync::Arc;
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

/// Streaming codec for packet frames
#[derive(Debug, Clone)]
pub struct FrameCodec {
    max_frame_size: usize,
    metrics: Option<Arc<CodecMetrics>>,
}

impl FrameCodec {
    pub fn new(max_frame_size: usize) -> Self {
        Self {
            max_frame_size,
            metrics: None,
        }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.max_frame_size)
    }

    /// Count frames and errors in `metrics`
    pub fn with_metrics(mut self, metrics: Arc<CodecMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    fn observe_error(&self, error: ProtocolError) -> ProtocolError {
        if let Some(metrics) = &self.metrics {
            metrics.record_error(&error);
        }
        error
    }

    fn await_more(&self, src: &mut BytesMut, needed: usize) {
        trace!(needed, available = src.len(), "waiting for rest of frame");
        if let Some(metrics) = &self.metrics {
            metrics.record_error(&ProtocolError::TruncatedFrame {
                needed,
                available: src.len(),
            });
        }
        src.reserve(needed - src.len());
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new(MAX_FRAME_SIZE)
    }
}

impl Decoder for FrameCodec {
    type Item = Packet;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        let header = match FrameHeader::parse(&src[..], self.max_frame_size) {
            Ok(header) => header,
            Err(ProtocolError::TruncatedFrame { needed, .. }) => {
                self.await_more(src, needed);
                return Ok(None);
            }
            Err(e) => return Err(self.observe_error(e)),
        };

        let frame_len = header.frame_len();
        if src.len() < frame_len {
            self.await_more(src, frame_len);
            return Ok(None);
        }

        let frame_bytes = src.split_to(frame_len);
        let (packet, _) = frame::decode_with_limit(&frame_bytes, self.max_frame_size)?;

        trace!(
            message_type = %packet.message_type(),
            source = packet.message_source_id(),
            destination = packet.message_destination_id(),
            frame_len,
            "frame decoded"
        );
        if let Some(metrics) = &self.metrics {
            metrics.frame_decoded(frame_len);
        }
        Ok(Some(packet))
    }
}

impl Encoder<&Packet> for FrameCodec {
    type Error = ProtocolError;

    fn encode(&mut self, packet: &Packet, dst: &mut BytesMut) -> Result<()> {
        dst.reserve(packet.frame_len());
        frame::encode_into(packet, dst).map_err(|e| self.observe_error(e))?;

        trace!(
            message_type = %packet.message_type(),
            destination = packet.message_destination_id(),
            frame_len = packet.frame_len(),
            "frame encoded"
        );
        if let Some(metrics) = &self.metrics {
            metrics.frame_encoded(packet.frame_len());
        }
        Ok(())
    }
}

impl Encoder<Packet> for FrameCodec {
    type Error = ProtocolError;

    fn encode(&mut self, packet: Packet, dst: &mut BytesMut) -> Result<()> {
        Encoder::<&Packet>::encode(self, &packet, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message_type::MessageType;

    #[allow(clippy::expect_used)]
    fn packet(message: &str) -> Packet {
        Packet::new(9, MessageType::Data, 3, 4, message).expect("valid packet")
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_partial_header_leaves_buffer() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::from(&[0u8, 0, 0][..]);
        assert!(codec.decode(&mut buf).expect("no error").is_none());
        assert_eq!(buf.len(), 3);
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_encode_then_decode() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::new();
        codec.encode(packet("hello"), &mut buf).expect("encode");
        codec.encode(&packet("world"), &mut buf).expect("encode");

        let first = codec.decode(&mut buf).expect("decode").expect("frame");
        let second = codec.decode(&mut buf).expect("decode").expect("frame");
        assert_eq!(first.message(), "hello");
        assert_eq!(second.message(), "world");
        assert!(buf.is_empty());
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_metrics_are_recorded() {
        let metrics = Arc::new(CodecMetrics::new());
        let mut codec = FrameCodec::new(1024).with_metrics(Arc::clone(&metrics));
        let mut buf = BytesMut::new();
        codec.encode(packet("abc"), &mut buf).expect("encode");

        let mut partial = BytesMut::from(&buf[..20]);
        assert!(codec.decode(&mut partial).expect("no error").is_none());
        codec.decode(&mut buf).expect("decode").expect("frame");

        let bad = Packet::with_declared_length(0, MessageType::Data, 1, 2, 99, "x");
        assert!(codec.encode(&bad, &mut BytesMut::new()).is_err());

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.frames_encoded, 1);
        assert_eq!(snapshot.bytes_encoded, 21);
        assert_eq!(snapshot.frames_decoded, 1);
        assert_eq!(snapshot.partial_reads, 1);
        assert_eq!(snapshot.encoding_errors, 1);
    }

    #[test]
    fn test_oversized_frame_is_fatal() {
        let mut codec = FrameCodec::new(64);
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(b"DA");
        buf.extend_from_slice(&1i32.to_be_bytes());
        buf.extend_from_slice(&2i32.to_be_bytes());
        buf.extend_from_slice(&1000i32.to_be_bytes());

        let result = codec.decode(&mut buf);
        assert!(matches!(
            result,
            Err(ProtocolError::MalformedLength {
                length: 1000,
                max_frame_size: 64
            })
        ));
    }
}
