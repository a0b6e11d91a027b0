//! Wire protocol for the real-time channel.
//!
//! A single lane: UTF-8 JSON text frames carrying an `Envelope`. Parsing is
//! panic-free; malformed frames are reported as `WsTetherError::Decode` and
//! the caller decides whether to drop or surface them.

pub mod envelope;

pub use envelope::{decode_frame, encode_frame, Envelope};
