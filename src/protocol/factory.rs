//! Construction of the packets the server originates.
//!
//! Each method is a pure function of its inputs. Registry updates that go
//! with these events (assigning the id, recording the session) belong to
//! the caller.

use crate::config::{
    IdentityConfig, DESTINATION_NOT_FOUND_MESSAGE, GENERATED_ID_MESSAGE, NO_MAGIC_BYTES,
    SERVER_SOURCE_ID,
};
use crate::core::message_type::MessageType;
use crate::core::packet::Packet;
use crate::core::text;
use crate::error::{constants::ERR_EMPTY_CANNED_MESSAGE, ProtocolError, Result};
use tracing::trace;

/// Builds server responses stamped with the reserved server identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketFactory {
    server_source_id: i32,
    generated_id_message: String,
    destination_not_found_message: String,
}

impl PacketFactory {
    /// Build a factory from configured identity values.
    ///
    /// Both canned messages must be non-empty and ISO-8859-1 encodable.
    pub fn from_config(config: &IdentityConfig) -> Result<Self> {
        for message in [
            &config.generated_id_message,
            &config.destination_not_found_message,
        ] {
            if message.is_empty() {
                return Err(ProtocolError::ConfigError(
                    ERR_EMPTY_CANNED_MESSAGE.to_string(),
                ));
            }
            text::encoded_len(message)?;
        }

        Ok(Self {
            server_source_id: config.server_source_id,
            generated_id_message: config.generated_id_message.clone(),
            destination_not_found_message: config.destination_not_found_message.clone(),
        })
    }

    pub fn server_source_id(&self) -> i32 {
        self.server_source_id
    }

    /// Announce the id the server assigned to a new client
    pub fn generated_id(&self, client_id: i32) -> Packet {
        trace!(client_id, "building generated-id packet");
        Packet::from_trusted(
            NO_MAGIC_BYTES,
            MessageType::GeneratedId,
            self.server_source_id,
            client_id,
            self.generated_id_message.clone(),
        )
    }

    /// Acknowledge a login, handing the client its session magic number
    pub fn logged_in(&self, trigger: &Packet, magic_number: i32) -> Packet {
        trace!(
            client_id = trigger.message_source_id(),
            "building login packet"
        );
        Packet::from_trusted(
            magic_number,
            MessageType::Login,
            self.server_source_id,
            trigger.message_source_id(),
            trigger.message().to_owned(),
        )
    }

    /// Tell the sender that its destination is not connected
    pub fn destination_not_found(&self, trigger: &Packet) -> Packet {
        trace!(
            client_id = trigger.message_source_id(),
            destination = trigger.message_destination_id(),
            "building destination-not-found packet"
        );
        Packet::from_trusted(
            trigger.magic_bytes(),
            MessageType::Data,
            self.server_source_id,
            trigger.message_source_id(),
            self.destination_not_found_message.clone(),
        )
    }

    /// Acknowledge a logout, echoing the client's own message
    pub fn logged_out(&self, trigger: &Packet) -> Packet {
        trace!(
            client_id = trigger.message_source_id(),
            "building logout packet"
        );
        Packet::from_trusted(
            trigger.magic_bytes(),
            MessageType::Logout,
            self.server_source_id,
            trigger.message_source_id(),
            trigger.message().to_owned(),
        )
    }
}

impl Default for PacketFactory {
    fn default() -> Self {
        Self {
            server_source_id: SERVER_SOURCE_ID,
            generated_id_message: String::from(GENERATED_ID_MESSAGE),
            destination_not_found_message: String::from(DESTINATION_NOT_FOUND_MESSAGE),
        }
    }
}
