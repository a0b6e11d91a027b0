//! Transport layer (WebSocket dial side).
//!
//! Exposes the connector seam the channel runtime dials through, and the
//! codec that decodes raw socket messages once before they reach envelope
//! parsing. Tests substitute the connector with a scripted in-memory one.

pub mod codec;
pub mod ws;

use async_trait::async_trait;
use tokio::sync::mpsc;

use wstether_core::error::Result;

/// Inbound events surfaced by one established connection.
///
/// An `Error` does not terminate the stream by itself; the connection is
/// over when `Closed` arrives or the event queue ends.
#[derive(Debug)]
pub enum TransportEvent {
    /// One decoded text frame (UTF-8 JSON).
    Frame(String),
    /// Connection-level error; the close that follows drives state.
    Error(String),
    /// Underlying connection closed.
    Closed,
}

/// Sending half of one established connection.
#[async_trait]
pub trait TransportSink: Send + 'static {
    async fn send_text(&mut self, frame: String) -> Result<()>;
    async fn close(&mut self) -> Result<()>;
}

/// Dials the remote endpoint and hands back the two halves of the
/// connection: a sink for outbound frames and the inbound event queue.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn dial(
        &self,
        url: &str,
    ) -> Result<(Box<dyn TransportSink>, mpsc::Receiver<TransportEvent>)>;
}
