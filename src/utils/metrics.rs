//! Codec Metrics
//!
//! Counters for frames passing through a [`crate::core::codec::FrameCodec`].
//!
//! Uses atomic counters so one instance can be shared by every connection.

use crate::error::ProtocolError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Frame and error counters
#[derive(Debug)]
pub struct CodecMetrics {
    /// Frames written
    pub frames_encoded: AtomicU64,
    /// Frames read
    pub frames_decoded: AtomicU64,
    /// Bytes written, headers included
    pub bytes_encoded: AtomicU64,
    /// Bytes read, headers included
    pub bytes_decoded: AtomicU64,
    /// Decode attempts that had to wait for more bytes
    pub partial_reads: AtomicU64,
    /// Packets refused by the encoder
    pub encoding_errors: AtomicU64,
    /// Frames with a type code outside the table
    pub unknown_type_errors: AtomicU64,
    /// Frames with a negative or oversized length
    pub malformed_length_errors: AtomicU64,
    start_time: Instant,
}

impl CodecMetrics {
    pub fn new() -> Self {
        Self {
            frames_encoded: AtomicU64::new(0),
            frames_decoded: AtomicU64::new(0),
            bytes_encoded: AtomicU64::new(0),
            bytes_decoded: AtomicU64::new(0),
            partial_reads: AtomicU64::new(0),
            encoding_errors: AtomicU64::new(0),
            unknown_type_errors: AtomicU64::new(0),
            malformed_length_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a frame written to the output buffer
    pub fn frame_encoded(&self, byte_count: usize) {
        self.frames_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_encoded
            .fetch_add(byte_count as u64, Ordering::Relaxed);
    }

    /// Record a frame read from the input buffer
    pub fn frame_decoded(&self, byte_count: usize) {
        self.frames_decoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_decoded
            .fetch_add(byte_count as u64, Ordering::Relaxed);
    }

    /// Record a codec failure under its category
    pub fn record_error(&self, error: &ProtocolError) {
        let counter = match error {
            ProtocolError::TruncatedFrame { .. } => &self.partial_reads,
            ProtocolError::Encoding(_) => &self.encoding_errors,
            ProtocolError::UnknownMessageType(_) => &self.unknown_type_errors,
            ProtocolError::MalformedLength { .. } => &self.malformed_length_errors,
            ProtocolError::Io(_) | ProtocolError::ConfigError(_) => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_encoded: self.frames_encoded.load(Ordering::Relaxed),
            frames_decoded: self.frames_decoded.load(Ordering::Relaxed),
            bytes_encoded: self.bytes_encoded.load(Ordering::Relaxed),
            bytes_decoded: self.bytes_decoded.load(Ordering::Relaxed),
            partial_reads: self.partial_reads.load(Ordering::Relaxed),
            encoding_errors: self.encoding_errors.load(Ordering::Relaxed),
            unknown_type_errors: self.unknown_type_errors.load(Ordering::Relaxed),
            malformed_length_errors: self.malformed_length_errors.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            frames_encoded = snapshot.frames_encoded,
            frames_decoded = snapshot.frames_decoded,
            bytes_encoded = snapshot.bytes_encoded,
            bytes_decoded = snapshot.bytes_decoded,
            partial_reads = snapshot.partial_reads,
            encoding_errors = snapshot.encoding_errors,
            unknown_type_errors = snapshot.unknown_type_errors,
            malformed_length_errors = snapshot.malformed_length_errors,
            uptime_seconds = snapshot.uptime_seconds,
            "Codec metrics snapshot"
        );
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub frames_encoded: u64,
    pub frames_decoded: u64,
    pub bytes_encoded: u64,
    pub bytes_decoded: u64,
    pub partial_reads: u64,
    pub encoding_errors: u64,
    pub unknown_type_errors: u64,
    pub malformed_length_errors: u64,
    pub uptime_seconds: u64,
}

impl MetricsSnapshot {
    /// Errors that ended a connection
    pub fn fatal_errors(&self) -> u64 {
        self.unknown_type_errors + self.malformed_length_errors
    }
}
