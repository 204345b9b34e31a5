//! Message type enumeration and its fixed 2-byte wire codes.
//!
//! The table in [`MessageType::code`] is the single source of truth for the
//! mapping and is shared with every other protocol endpoint. Changing a code
//! breaks compatibility with deployed peers.

use crate::error::ProtocolError;
use std::fmt;

/// Kind of protocol message carried by a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// Server announces an id it assigned to a client
    GeneratedId,
    /// Login request, or the server's login acknowledgement
    Login,
    /// Logout request, or the server's logout acknowledgement
    Logout,
    /// Application data routed between clients
    Data,
}

impl MessageType {
    /// Every variant, in wire-code table order
    pub const ALL: [MessageType; 4] = [
        MessageType::GeneratedId,
        MessageType::Login,
        MessageType::Logout,
        MessageType::Data,
    ];

    /// Wire code written in the frame header.
    ///
    /// These codes are not confirmed against the table deployed peers use.
    /// If that table differs, change this match and [`MessageType::from_code`]
    /// together.
    #[inline]
    pub const fn code(self) -> [u8; 2] {
        match self {
            MessageType::GeneratedId => *b"ID",
            MessageType::Login => *b"LI",
            MessageType::Logout => *b"LO",
            MessageType::Data => *b"DA",
        }
    }

    /// Look up the variant for a wire code
    #[inline]
    pub fn from_code(code: [u8; 2]) -> Option<Self> {
        match &code {
            b"ID" => Some(MessageType::GeneratedId),
            b"LI" => Some(MessageType::Login),
            b"LO" => Some(MessageType::Logout),
            b"DA" => Some(MessageType::Data),
            _ => None,
        }
    }

    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            MessageType::GeneratedId => "GENERATED_ID",
            MessageType::Login => "LOGIN",
            MessageType::Logout => "LOGOUT",
            MessageType::Data => "DATA",
        }
    }
}

impl TryFrom<[u8; 2]> for MessageType {
    type Error = ProtocolError;

    fn try_from(code: [u8; 2]) -> Result<Self, Self::Error> {
        MessageType::from_code(code).ok_or(ProtocolError::UnknownMessageType(code))
    }
}

impl From<MessageType> for [u8; 2] {
    fn from(message_type: MessageType) -> Self {
        message_type.code()
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
