//! Channel lifecycle events.
//!
//! One typed stream replaces ad-hoc per-callback registration: consumers
//! receive a tagged union, so ordering and teardown are explicit at the
//! type level.

use tokio::sync::mpsc;

use wstether_core::Envelope;

/// Events delivered to the channel consumer, in transport order.
#[derive(Debug)]
pub enum ChannelEvent {
    /// The connection is open; sends will be accepted.
    Opened,
    /// The connection closed (expected or not). Emitted once per close.
    Closed,
    /// Transport-level error. Does not change connection state by itself;
    /// the close that follows does.
    Errored(String),
    /// One well-formed envelope arrived. Malformed frames never show up
    /// here; they are logged and dropped.
    Received(Envelope),
    /// The reconnect ceiling was reached; the channel stays closed until
    /// an explicit `connect()`.
    RetriesExhausted { attempts: u32 },
}

/// Receiving half of the channel's event stream.
///
/// Dropping it does not affect the channel; events are then discarded.
pub struct ChannelEvents {
    rx: mpsc::UnboundedReceiver<ChannelEvent>,
}

impl ChannelEvents {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<ChannelEvent>) -> Self {
        Self { rx }
    }

    /// Next event, or `None` once every `Channel` handle is gone.
    pub async fn recv(&mut self) -> Option<ChannelEvent> {
        self.rx.recv().await
    }

    /// Non-blocking poll, for callers draining on their own schedule.
    pub fn try_recv(&mut self) -> Option<ChannelEvent> {
        self.rx.try_recv().ok()
    }
}
