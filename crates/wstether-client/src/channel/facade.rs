//! Channel facade: the only surface application code touches.
//!
//! `Channel` is a cheap clonable handle over shared internals. Exactly one
//! underlying socket and at most one pending reconnect timer exist per
//! facade at any time; neither is ever shared across facades. All
//! operations are non-blocking: `connect`/`disconnect` return immediately
//! and outcomes arrive on the event stream and the watch outputs.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use wstether_core::error::Result;
use wstether_core::protocol::{self, Envelope};
use wstether_core::retry::RetryPolicy;
use wstether_core::{ConnState, Session};

use crate::auth::{StaticToken, TokenProvider};
use crate::channel::events::{ChannelEvent, ChannelEvents};
use crate::config::ChannelConfig;
use crate::obs::metrics::ChannelMetrics;
use crate::transport::ws::WsConnector;
use crate::transport::Connector;

/// Resilient real-time channel handle.
///
/// Must be used inside a tokio runtime: `connect()` spawns the connection
/// task. Dropping the last handle tears the runtime down (equivalent to
/// `disconnect()`).
#[derive(Clone)]
pub struct Channel {
    shared: Arc<Shared>,
}

impl Channel {
    /// Channel over the real WebSocket transport, token taken from config.
    pub fn new(cfg: ChannelConfig) -> Result<(Channel, ChannelEvents)> {
        let tokens = StaticToken::new(cfg.token.clone());
        Self::with_connector(cfg, Arc::new(WsConnector::new()), tokens)
    }

    /// Channel over an injected transport and credential source. This is
    /// the seam tests and embedders with custom transports use.
    pub fn with_connector(
        cfg: ChannelConfig,
        connector: Arc<dyn Connector>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<(Channel, ChannelEvents)> {
        cfg.validate()?;
        let policy = cfg.retry_policy();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (connected_tx, _) = watch::channel(false);
        let (attempt_tx, _) = watch::channel(0u32);

        let shared = Arc::new(Shared {
            cfg,
            policy,
            connector,
            tokens,
            core: Mutex::new(Core {
                session: Session::new(),
                epoch: 0,
                out_tx: None,
                retry_timer: None,
            }),
            connected_tx,
            attempt_tx,
            last_message: Mutex::new(None),
            events_tx,
            metrics: ChannelMetrics::default(),
        });

        Ok((Channel { shared }, ChannelEvents::new(events_rx)))
    }

    /// Dial the configured endpoint. No-op unless the channel is closed:
    /// calling while connecting or open never dials a second socket and
    /// never resets the attempt counter.
    pub fn connect(&self) {
        let epoch = {
            let mut core = self.shared.lock_core();
            if !core.session.begin_dial() {
                tracing::debug!(state = ?core.session.state(), "connect ignored");
                return;
            }
            core.epoch
        };
        self.shared.metrics.dials.inc();
        Shared::spawn_dial(&self.shared, epoch);
    }

    /// Tear the connection down. Guarantees: the socket is closed, no
    /// pending reconnect timer fires after this returns, and no event from
    /// the old connection lifetime is delivered. Safe to call repeatedly.
    pub fn disconnect(&self) {
        let (was_active, timer) = {
            let mut core = self.shared.lock_core();
            core.epoch = core.epoch.wrapping_add(1);
            let timer = core.retry_timer.take();
            // dropping the writer queue makes the writer close the socket
            core.out_tx = None;
            (core.session.mark_closed(), timer)
        };
        if let Some(t) = timer {
            t.abort();
        }
        if was_active {
            self.shared.connected_tx.send_replace(false);
            self.shared.metrics.closes.inc();
            self.shared.emit(ChannelEvent::Closed);
            tracing::debug!("channel disconnected");
        }
    }

    /// Transmit one envelope. Returns `false` without buffering when the
    /// channel is not open, when encoding fails, or when the outbound
    /// queue is full; the frame is dropped in all three cases.
    pub fn send(&self, env: &Envelope) -> bool {
        let frame = match protocol::encode_frame(env) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(error = %e, "envelope encode failed");
                return false;
            }
        };
        let core = self.shared.lock_core();
        if core.session.state() != ConnState::Open {
            self.shared.metrics.sends_dropped.inc();
            return false;
        }
        let Some(tx) = core.out_tx.as_ref() else {
            self.shared.metrics.sends_dropped.inc();
            return false;
        };
        match tx.try_send(frame) {
            Ok(()) => {
                self.shared.metrics.frames_out.inc();
                true
            }
            Err(_) => {
                tracing::warn!("outbound queue full; frame dropped");
                self.shared.metrics.sends_dropped.inc();
                false
            }
        }
    }

    /// Whether the connection is currently open.
    pub fn is_connected(&self) -> bool {
        *self.shared.connected_tx.borrow()
    }

    /// Watch mirror of [`Self::is_connected`] for reactive consumers.
    pub fn watch_connected(&self) -> watch::Receiver<bool> {
        self.shared.connected_tx.subscribe()
    }

    /// Consecutive reconnect attempts since the last successful open.
    pub fn reconnect_attempt(&self) -> u32 {
        *self.shared.attempt_tx.borrow()
    }

    /// Watch mirror of [`Self::reconnect_attempt`] (UIs show "retrying (n)").
    pub fn watch_attempt(&self) -> watch::Receiver<u32> {
        self.shared.attempt_tx.subscribe()
    }

    /// Most recently received well-formed envelope, if any.
    pub fn last_message(&self) -> Option<Envelope> {
        self.shared
            .last_message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// In-process counters for this channel.
    pub fn metrics(&self) -> &ChannelMetrics {
        &self.shared.metrics
    }
}

/// State shared between the facade handles and the spawned tasks.
pub(crate) struct Shared {
    pub(crate) cfg: ChannelConfig,
    pub(crate) policy: RetryPolicy,
    pub(crate) connector: Arc<dyn Connector>,
    pub(crate) tokens: Arc<dyn TokenProvider>,
    pub(crate) core: Mutex<Core>,
    pub(crate) connected_tx: watch::Sender<bool>,
    pub(crate) attempt_tx: watch::Sender<u32>,
    pub(crate) last_message: Mutex<Option<Envelope>>,
    pub(crate) events_tx: mpsc::UnboundedSender<ChannelEvent>,
    pub(crate) metrics: ChannelMetrics,
}

/// Mutable channel core. Single-writer: every mutation happens under this
/// one lock, so the state machine and the task handles cannot diverge.
pub(crate) struct Core {
    pub(crate) session: Session,
    /// Teardown epoch. `disconnect()` bumps it; any task carrying an older
    /// epoch discards its outcome instead of touching state.
    pub(crate) epoch: u64,
    pub(crate) out_tx: Option<mpsc::Sender<String>>,
    pub(crate) retry_timer: Option<JoinHandle<()>>,
}

impl Shared {
    pub(crate) fn lock_core(&self) -> MutexGuard<'_, Core> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn current_epoch(&self) -> u64 {
        self.lock_core().epoch
    }

    pub(crate) fn emit(&self, ev: ChannelEvent) {
        let _ = self.events_tx.send(ev);
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let core = self
            .core
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(t) = core.retry_timer.take() {
            t.abort();
        }
    }
}
