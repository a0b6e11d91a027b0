//! Scripted in-memory connector shared by the channel tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use wstether_client::transport::{Connector, TransportEvent, TransportSink};
use wstether_client::ChannelConfig;
use wstether_core::error::{Result, WsTetherError};

/// One established mock connection, as seen from the test side.
#[derive(Clone)]
pub struct Link {
    /// Feed inbound transport events to the channel.
    pub events: mpsc::Sender<TransportEvent>,
    /// Frames the channel wrote to the sink.
    pub sent: Arc<Mutex<Vec<String>>>,
    /// Set once the channel closed the sink.
    pub sink_closed: Arc<AtomicBool>,
}

#[derive(Clone, Default)]
pub struct MockConnector {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    dials: AtomicU32,
    refuse: AtomicBool,
    urls: Mutex<Vec<String>>,
    links: Mutex<Vec<Link>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent dials fail with a transport error.
    pub fn refuse_dials(&self, refuse: bool) {
        self.inner.refuse.store(refuse, Ordering::SeqCst);
    }

    pub fn dial_count(&self) -> u32 {
        self.inner.dials.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.inner.urls.lock().unwrap().clone()
    }

    /// Connection established by the most recent successful dial.
    pub fn last_link(&self) -> Link {
        self.inner.links.lock().unwrap().last().unwrap().clone()
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn dial(
        &self,
        url: &str,
    ) -> Result<(Box<dyn TransportSink>, mpsc::Receiver<TransportEvent>)> {
        self.inner.dials.fetch_add(1, Ordering::SeqCst);
        self.inner.urls.lock().unwrap().push(url.to_string());
        if self.inner.refuse.load(Ordering::SeqCst) {
            return Err(WsTetherError::Transport("dial refused".into()));
        }
        let (tx, rx) = mpsc::channel(16);
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink_closed = Arc::new(AtomicBool::new(false));
        self.inner.links.lock().unwrap().push(Link {
            events: tx,
            sent: Arc::clone(&sent),
            sink_closed: Arc::clone(&sink_closed),
        });
        Ok((Box::new(MockSink { sent, sink_closed }), rx))
    }
}

struct MockSink {
    sent: Arc<Mutex<Vec<String>>>,
    sink_closed: Arc<AtomicBool>,
}

#[async_trait]
impl TransportSink for MockSink {
    async fn send_text(&mut self, frame: String) -> Result<()> {
        self.sent.lock().unwrap().push(frame);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.sink_closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Opt-in log output for debugging: `RUST_LOG=debug cargo test -- --nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Config pointed at nowhere real, with a short retry interval so paused
/// clocks converge fast.
pub fn test_config() -> ChannelConfig {
    ChannelConfig::new("ws://test.invalid/ws")
        .with_reconnect_interval(Duration::from_millis(200))
}

/// Let the paused clock drain timers and spawned tasks.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
