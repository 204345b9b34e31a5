//! # packet-wire
//!
//! Wire-format boundary of a client-server messaging protocol.
//!
//! Converts between the in-memory [`Packet`] and its fixed-layout frame, and
//! builds the packets a server sends in response to protocol events.
//!
//! ```text
//! transport bytes -> decode -> routing (caller) -> PacketFactory -> encode -> transport
//! ```
//!
//! ## Example
//! ```rust
//! use packet_wire::{decode, encode, MessageType, Packet, PacketFactory};
//!
//! let login = Packet::new(0, MessageType::Login, 42, 1, "hi")?;
//! let frame = encode(&login)?;
//! let (received, consumed) = decode(&frame)?;
//! assert_eq!(consumed, frame.len());
//!
//! let reply = PacketFactory::default().logged_in(&received, 777);
//! assert_eq!(reply.message_destination_id(), 42);
//! # Ok::<(), packet_wire::ProtocolError>(())
//! ```
//!
//! The header has no version byte. Peers must agree on the wire-code table
//! in [`core::message_type`] out of band.

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::core::codec::FrameCodec;
pub use crate::core::frame::{decode, decode_with_limit, encode, encode_into, frames};
pub use crate::core::message_type::MessageType;
pub use crate::core::packet::Packet;
pub use crate::error::{EncodingError, ProtocolError, Result};
pub use crate::protocol::PacketFactory;
