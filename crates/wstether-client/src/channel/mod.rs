//! Channel runtime: the facade applications hold, the event stream they
//! consume, and the connection/reconnect machinery behind both.

pub mod events;
pub mod facade;
mod runtime;

pub use events::{ChannelEvent, ChannelEvents};
pub use facade::Channel;
