//! Lightweight in-process metrics (dependency-free).
//!
//! Counters are plain atomics rendered on demand in Prometheus text
//! format; a client channel has a single connection, so no label maps are
//! needed.

pub mod metrics;
