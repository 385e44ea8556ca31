//! Messaging session adapter.
//!
//! The session itself (pairing, protocol, persistence, reconnects) runs in an
//! external headless web-client bridge. This crate is the seam around it: the
//! [`MessagingClient`] call surface, the record types the session hands back,
//! lifecycle events, and [`BridgeClient`], which speaks to the bridge over HTTP.

pub mod bridge;
pub mod client;
pub mod events;
pub mod models;

pub use bridge::{BridgeClient, BridgeConfig};
pub use client::{MessagingClient, SessionError};
pub use events::{SessionEvent, SessionEvents};
pub use models::{
    Chat, LastMessage, Media, Message, MessageContent, MessageKey, Receipt, SendOptions, WireId,
};
