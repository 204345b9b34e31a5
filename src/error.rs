//! # Error Types
//!
//! Error handling for the packet wire format.
//!
//! Every failure the codec can produce is classified so that the transport
//! layer can decide recovery without inspecting strings:
//!
//! ## Error Categories
//! - **Encoding Errors**: a packet that cannot be written as a frame (caller bug)
//! - **Truncated Frames**: more bytes are needed, buffer and retry
//! - **Unknown Message Types**: protocol desync or version mismatch, fatal
//! - **Malformed Lengths**: corrupted or hostile input, fatal
//! - **Configuration Errors**: invalid or unreadable configuration
//!
//! The codec never logs or retries on its own; every error is returned with
//! the field and value that caused it.
//!
//! ## Example Usage
//! ```rust
//! use packet_wire::core::frame::decode;
//! use packet_wire::error::ProtocolError;
//!
//! match decode(&[0x00, 0x00]) {
//!     Err(e) if e.is_incomplete() => { /* wait for more bytes */ }
//!     Err(e) if e.is_fatal() => { /* reset the session */ }
//!     Err(_) | Ok(_) => {}
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    pub const ERR_POOL_LOCK_POISONED: &str = "Frame pool lock poisoned";
    pub const ERR_LOGGING_INIT: &str = "Failed to install tracing subscriber";
    pub const ERR_EMPTY_CANNED_MESSAGE: &str = "Canned message cannot be empty";
}

/// Reasons a packet cannot be written as a frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("declared message length {declared} does not match encoded length {actual}")]
    LengthMismatch { declared: i32, actual: usize },

    #[error("character {character:?} at index {index} is not representable in ISO-8859-1")]
    UnmappableCharacter { character: char, index: usize },

    #[error("message of {0} bytes does not fit the 32-bit length field")]
    PayloadTooLarge(usize),
}

// ProtocolError is the primary error type for all codec operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Truncated frame: need {needed} bytes, have {available}")]
    TruncatedFrame { needed: usize, available: usize },

    #[error("Unknown message type code: {:#04x} {:#04x}", .0[0], .0[1])]
    UnknownMessageType([u8; 2]),

    #[error("Malformed message length {length} (max frame size {max_frame_size})")]
    MalformedLength { length: i32, max_frame_size: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    /// More bytes are needed before the frame can be decoded.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ProtocolError::TruncatedFrame { .. })
    }

    /// The byte stream can no longer be trusted and the connection should be reset.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ProtocolError::UnknownMessageType(_)
                | ProtocolError::MalformedLength { .. }
                | ProtocolError::Io(_)
        )
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
