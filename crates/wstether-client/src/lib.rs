//! wsTether client library entry.
//!
//! This crate wires the channel facade, connection runtime, WebSocket
//! transport, config loader, and in-process metrics into the resilient
//! real-time channel consumed by applications. The transport-free state
//! machine and wire envelope live in `wstether-core`.

pub mod auth;
pub mod channel;
pub mod config;
pub mod obs;
pub mod transport;

pub use auth::{StaticToken, TokenProvider};
pub use channel::{Channel, ChannelEvent, ChannelEvents};
pub use config::ChannelConfig;
