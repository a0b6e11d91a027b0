//! wsTether core: transport-agnostic channel primitives and error types.
//!
//! This crate defines the wire envelope, the connection state machine, and
//! the reconnect policy shared by the client runtime and by test tooling. It
//! intentionally carries no transport or runtime dependencies so the state
//! and policy logic can be exercised without a socket or an executor.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `WsTetherError`/`Result` so a hosting
//! application never crashes on malformed traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod retry;
pub mod session;

/// Shared result type.
pub use error::{Result, WsTetherError};
pub use protocol::Envelope;
pub use retry::RetryPolicy;
pub use session::{ConnState, Session};
