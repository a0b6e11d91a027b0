//! WebSocket connector (tokio-tungstenite).
//!
//! Responsibilities:
//! - Dial the target URI (plain or TLS, decided by the scheme)
//! - Split the stream; outbound writes go through [`WsSink`]
//! - Spawn a read loop that forwards decoded frames into the event queue
//!   and always terminates the queue with `Closed`

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use wstether_core::error::{Result, WsTetherError};

use crate::transport::codec::{decode, Inbound};
use crate::transport::{Connector, TransportEvent, TransportSink};

const EVENT_QUEUE_DEPTH: usize = 64;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Production connector used by `Channel::new`.
#[derive(Debug, Default)]
pub struct WsConnector;

impl WsConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for WsConnector {
    async fn dial(
        &self,
        url: &str,
    ) -> Result<(Box<dyn TransportSink>, mpsc::Receiver<TransportEvent>)> {
        let (stream, _resp) = connect_async(url)
            .await
            .map_err(|e| WsTetherError::Transport(format!("dial failed: {e}")))?;
        let (sink, read) = stream.split();

        let (tx, rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        tokio::spawn(read_loop(read, tx));

        Ok((Box::new(WsSink { sink }), rx))
    }
}

struct WsSink {
    sink: SplitSink<WsStream, Message>,
}

#[async_trait]
impl TransportSink for WsSink {
    async fn send_text(&mut self, frame: String) -> Result<()> {
        self.sink
            .send(Message::Text(frame))
            .await
            .map_err(|e| WsTetherError::Transport(format!("write failed: {e}")))
    }

    async fn close(&mut self) -> Result<()> {
        self.sink
            .close()
            .await
            .map_err(|e| WsTetherError::Transport(format!("close failed: {e}")))
    }
}

async fn read_loop(mut read: SplitStream<WsStream>, tx: mpsc::Sender<TransportEvent>) {
    while let Some(item) = read.next().await {
        match item {
            Ok(msg) => match decode(msg) {
                Ok(Inbound::Frame(text)) => {
                    if tx.send(TransportEvent::Frame(text)).await.is_err() {
                        // receiver gone: the channel was torn down
                        return;
                    }
                }
                Ok(Inbound::Ping) | Ok(Inbound::Pong) => {
                    tracing::trace!("ws control frame");
                }
                Ok(Inbound::Close) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "dropping undecodable ws frame");
                }
            },
            Err(e) => {
                let _ = tx.send(TransportEvent::Error(e.to_string())).await;
                break;
            }
        }
    }
    let _ = tx.send(TransportEvent::Closed).await;
}
