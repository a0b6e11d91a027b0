//! Connection runtime: the tasks behind the facade.
//!
//! Three task kinds exist per facade, all holding only `Weak` references to
//! the shared state so that dropping the last `Channel` handle stops them:
//! - the connection task (dial, then pump transport events),
//! - the writer task (drains the outbound queue into the sink, closes the
//!   socket when the queue ends),
//! - at most one retry timer.
//!
//! Every task carries the epoch it was spawned under. `disconnect()` bumps
//! the epoch, which turns any in-flight outcome from the old lifetime into
//! a discard: a socket won by a raced dial is closed on the spot, a stale
//! close event emits nothing and schedules nothing.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::mpsc;

use wstether_core::protocol;
use wstether_core::ConnState;

use crate::auth::dial_url;
use crate::channel::events::ChannelEvent;
use crate::channel::facade::Shared;
use crate::transport::{TransportEvent, TransportSink};

impl Shared {
    pub(crate) fn spawn_dial(shared: &Arc<Shared>, epoch: u64) {
        let weak = Arc::downgrade(shared);
        tokio::spawn(run_connection(weak, epoch));
    }

    /// One decoded-or-dropped inbound frame.
    fn on_frame(&self, text: &str) {
        match protocol::decode_frame(text) {
            Ok(env) => {
                self.metrics.frames_in.inc();
                *self
                    .last_message
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(env.clone());
                self.emit(ChannelEvent::Received(env));
            }
            Err(e) => {
                self.metrics.decode_errors.inc();
                tracing::warn!(error = %e, "dropping undecodable frame");
            }
        }
    }

    /// An unexpected close (including a failed dial). Transitions to
    /// Closed, then consults the retry policy.
    fn handle_close(shared: &Arc<Shared>, epoch: u64) {
        let attempt = {
            let mut core = shared.lock_core();
            if core.epoch != epoch {
                return; // explicit disconnect already settled this lifetime
            }
            if !core.session.mark_closed() {
                return;
            }
            core.out_tx = None;
            core.session.attempt()
        };
        shared.connected_tx.send_replace(false);
        shared.metrics.closes.inc();
        shared.emit(ChannelEvent::Closed);

        match shared.policy.next_delay(attempt) {
            Some(delay) => Shared::schedule_retry(shared, epoch, delay),
            None if shared.policy.enabled => {
                shared.metrics.retries_exhausted.inc();
                tracing::warn!(attempts = attempt, "reconnect ceiling reached; staying closed");
                shared.emit(ChannelEvent::RetriesExhausted { attempts: attempt });
            }
            None => {
                tracing::debug!("reconnection disabled; staying closed");
            }
        }
    }

    fn schedule_retry(shared: &Arc<Shared>, epoch: u64, delay: Duration) {
        let attempt = {
            let mut core = shared.lock_core();
            if core.epoch != epoch {
                return; // disconnect raced the close handling
            }
            let attempt = core.session.bump_attempt();
            let weak = Arc::downgrade(shared);
            core.retry_timer = Some(tokio::spawn(run_retry(weak, epoch, delay)));
            attempt
        };
        shared.attempt_tx.send_replace(attempt);
        shared.metrics.reconnects_scheduled.inc();
        tracing::info!(
            attempt,
            delay_ms = delay.as_millis() as u64,
            "reconnect scheduled"
        );
    }
}

async fn run_connection(weak: Weak<Shared>, epoch: u64) {
    let (connector, url) = {
        let Some(shared) = weak.upgrade() else { return };
        let token = shared.tokens.bearer_token();
        (
            Arc::clone(&shared.connector),
            dial_url(&shared.cfg.url, token.as_deref()),
        )
    };

    let dialed = connector.dial(&url).await;

    let Some(shared) = weak.upgrade() else { return };
    let (sink, mut events) = match dialed {
        Ok(pair) => pair,
        Err(e) => {
            if shared.current_epoch() != epoch {
                return;
            }
            shared.metrics.transport_errors.inc();
            tracing::warn!(error = %e, url = %shared.cfg.url, "dial failed");
            shared.emit(ChannelEvent::Errored(e.to_string()));
            Shared::handle_close(&shared, epoch);
            return;
        }
    };

    {
        let mut core = shared.lock_core();
        if core.epoch != epoch || core.session.state() != ConnState::Connecting {
            drop(core);
            // disconnect raced the dial: close the fresh socket right away
            tokio::spawn(async move {
                let mut sink = sink;
                let _ = sink.close().await;
            });
            return;
        }
        let (out_tx, out_rx) = mpsc::channel::<String>(shared.cfg.outbound_queue);
        core.out_tx = Some(out_tx);
        core.session.mark_open();
        drop(core);

        shared.connected_tx.send_replace(true);
        shared.attempt_tx.send_replace(0);
        shared.metrics.opens.inc();
        tracing::debug!(url = %shared.cfg.url, "channel open");
        shared.emit(ChannelEvent::Opened);
        tokio::spawn(run_writer(out_rx, sink));
    }
    drop(shared);

    loop {
        // shared is not held across this await; teardown stays reachable
        let Some(ev) = events.recv().await else { break };
        let Some(shared) = weak.upgrade() else { return };
        if shared.current_epoch() != epoch {
            return;
        }
        match ev {
            TransportEvent::Frame(text) => shared.on_frame(&text),
            TransportEvent::Error(e) => {
                shared.metrics.transport_errors.inc();
                tracing::warn!(error = %e, "transport error");
                shared.emit(ChannelEvent::Errored(e));
            }
            TransportEvent::Closed => break,
        }
    }

    let Some(shared) = weak.upgrade() else { return };
    Shared::handle_close(&shared, epoch);
}

async fn run_retry(weak: Weak<Shared>, epoch: u64, delay: Duration) {
    tokio::time::sleep(delay).await;
    let Some(shared) = weak.upgrade() else { return };
    let dial = {
        let mut core = shared.lock_core();
        if core.epoch != epoch {
            return;
        }
        core.retry_timer = None;
        // refused when the caller already reconnected by hand
        core.session.begin_dial()
    };
    if dial {
        shared.metrics.dials.inc();
        Shared::spawn_dial(&shared, epoch);
    }
}

async fn run_writer(mut rx: mpsc::Receiver<String>, mut sink: Box<dyn TransportSink>) {
    while let Some(frame) = rx.recv().await {
        if let Err(e) = sink.send_text(frame).await {
            tracing::debug!(error = %e, "transport write failed");
            break;
        }
    }
    let _ = sink.close().await;
}
