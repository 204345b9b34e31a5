//! # Protocol Events
//!
//! Server-originated packets for the protocol's events: client id
//! assignment, login and logout acknowledgement, and routing failure.
//!
//! Deciding which event applies (routing, session tables) happens outside
//! this crate; these builders only produce the packet to send back.

pub mod factory;

pub use factory::PacketFactory;
