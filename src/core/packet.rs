//! # Packet
//!
//! Defines the `Packet` value object: one protocol message with a fixed set
//! of fields.
//!
//! ## Responsibilities
//! - Hold the six wire fields of a message
//! - Keep `message_length` equal to the encoded byte length of `message`
//! - Expose read-only access; a changed packet is always a new value
//!
//! Byte layout lives in [`crate::core::frame`].

use crate::config::HEADER_SIZE;
use crate::core::message_type::MessageType;
use crate::core::text;
use crate::error::{EncodingError, Result};
use std::fmt;

/// Represents one immutable protocol message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Packet {
    magic_bytes: i32,
    message_type: MessageType,
    message_source_id: i32,
    message_destination_id: i32,
    message_length: i32,
    message: String,
}

impl Packet {
    /// Build a packet, computing `message_length` from `message`
    pub fn new(
        magic_bytes: i32,
        message_type: MessageType,
        message_source_id: i32,
        message_destination_id: i32,
        message: impl Into<String>,
    ) -> Result<Self> {
        let message = message.into();
        let message_length = checked_length(&message)?;
        Ok(Self {
            magic_bytes,
            message_type,
            message_source_id,
            message_destination_id,
            message_length,
            message,
        })
    }

    /// Mirror an externally supplied record, keeping its declared length as is.
    ///
    /// No validation happens here. [`Packet::validate`] and
    /// [`crate::core::frame::encode`] reject a length that disagrees with the
    /// message before any byte reaches the wire.
    pub fn with_declared_length(
        magic_bytes: i32,
        message_type: MessageType,
        message_source_id: i32,
        message_destination_id: i32,
        message_length: i32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            magic_bytes,
            message_type,
            message_source_id,
            message_destination_id,
            message_length,
            message: message.into(),
        }
    }

    /// Build a packet from a message taken from another `Packet` or from a
    /// validated canned string, counting one byte per character.
    ///
    /// The text itself is not checked. A trigger made with
    /// [`Packet::with_declared_length`] can carry characters outside
    /// ISO-8859-1; the reply then fails [`Packet::validate`] and is refused
    /// by [`crate::core::frame::encode`].
    pub(crate) fn from_trusted(
        magic_bytes: i32,
        message_type: MessageType,
        message_source_id: i32,
        message_destination_id: i32,
        message: String,
    ) -> Self {
        let message_length = message.chars().count() as i32;
        Self {
            magic_bytes,
            message_type,
            message_source_id,
            message_destination_id,
            message_length,
            message,
        }
    }

    /// Check that the declared length matches the encoded message
    pub fn validate(&self) -> Result<()> {
        let actual = text::encoded_len(&self.message)?;
        if usize::try_from(self.message_length).ok() != Some(actual) {
            return Err(EncodingError::LengthMismatch {
                declared: self.message_length,
                actual,
            }
            .into());
        }
        Ok(())
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

    pub fn message_length(&self) -> i32 {
        self.message_length
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Payload bytes as they appear on the wire
    pub fn message_bytes(&self) -> Result<Vec<u8>> {
        text::encode(&self.message)
    }

    /// Total encoded size, header included.
    ///
    /// Based on the declared length; only meaningful for a valid packet.
    pub fn frame_len(&self) -> usize {
        HEADER_SIZE + usize::try_from(self.message_length).unwrap_or(0)
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} (magic {}, {} bytes)",
            self.message_type,
            self.message_source_id,
            self.message_destination_id,
            self.magic_bytes,
            self.message_length
        )
    }
}

fn checked_length(message: &str) -> Result<i32> {
    let len = text::encoded_len(message)?;
    i32::try_from(len).map_err(|_| EncodingError::PayloadTooLarge(len).into())
}
