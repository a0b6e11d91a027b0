//! Top-level facade crate for wsTether.
//!
//! Re-exports the core types and the client library so users can depend on
//! a single crate.

pub mod core {
    pub use wstether_core::*;
}

pub mod client {
    pub use wstether_client::*;
}

pub use wstether_client::{Channel, ChannelConfig, ChannelEvent, ChannelEvents};
pub use wstether_core::Envelope;
