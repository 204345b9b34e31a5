//! # Core Wire Components
//!
//! Packet entity, message type table, and the frame codec.
//!
//! ## Components
//! - **MessageType**: closed set of message kinds and their 2-byte wire codes
//! - **Packet**: immutable protocol message
//! - **Frame**: pure encode/decode between packets and byte frames
//! - **Codec**: Tokio codec for framing over byte streams
//!
//! ## Wire Format
//! ```text
//! [Magic(4)] [Type(2)] [Source(4)] [Destination(4)] [Length(4)] [Message(N)]
//! ```
//!
//! ## Security
//! - Maximum frame size: 16MB by default (prevents memory exhaustion)
//! - Length validation before allocation
//! - Unknown type codes rejected, never defaulted

pub mod codec;
pub mod frame;
pub mod message_type;
pub mod packet;
pub mod text;
