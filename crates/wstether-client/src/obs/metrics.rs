//! Per-channel counters.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter.
#[derive(Default)]
pub struct Counter(AtomicU64);

impl Counter {
    /// Increment by 1.
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// Current value.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters for one channel instance.
#[derive(Default)]
pub struct ChannelMetrics {
    /// Dial attempts (initial connects and scheduled retries).
    pub dials: Counter,
    /// Successful opens.
    pub opens: Counter,
    /// Closes, expected or not.
    pub closes: Counter,
    /// Well-formed envelopes received.
    pub frames_in: Counter,
    /// Envelopes accepted for transmission.
    pub frames_out: Counter,
    /// Inbound frames dropped as undecodable.
    pub decode_errors: Counter,
    /// Transport-level errors (dial failures included).
    pub transport_errors: Counter,
    /// Sends refused while not open or with a full queue.
    pub sends_dropped: Counter,
    /// Reconnects scheduled after unexpected closes.
    pub reconnects_scheduled: Counter,
    /// Times the reconnect ceiling was reached.
    pub retries_exhausted: Counter,
}

impl ChannelMetrics {
    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rows: [(&str, &Counter); 10] = [
            ("wstether_dials_total", &self.dials),
            ("wstether_opens_total", &self.opens),
            ("wstether_closes_total", &self.closes),
            ("wstether_frames_in_total", &self.frames_in),
            ("wstether_frames_out_total", &self.frames_out),
            ("wstether_decode_errors_total", &self.decode_errors),
            ("wstether_transport_errors_total", &self.transport_errors),
            ("wstether_sends_dropped_total", &self.sends_dropped),
            ("wstether_reconnects_scheduled_total", &self.reconnects_scheduled),
            ("wstether_retries_exhausted_total", &self.retries_exhausted),
        ];
        for (name, c) in rows {
            let _ = writeln!(out, "# TYPE {name} counter");
            let _ = writeln!(out, "{name} {}", c.get());
        }
        out
    }
}
