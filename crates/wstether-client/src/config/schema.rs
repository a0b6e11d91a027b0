use std::time::Duration;

use serde::Deserialize;

use wstether_core::error::{Result, WsTetherError};
use wstether_core::retry::RetryPolicy;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    /// Dial target, `ws://` or `wss://`.
    pub url: String,

    /// Bearer credential appended to the dial URI as `?token=...`.
    #[serde(default)]
    pub token: Option<String>,

    /// Automatic reconnection after an unexpected close.
    #[serde(default = "default_auto_reconnect")]
    pub auto_reconnect: bool,

    /// Fixed delay between reconnect attempts.
    #[serde(default = "default_reconnect_interval_ms")]
    pub reconnect_interval_ms: u64,

    /// Ceiling on consecutive reconnect attempts; unset retries forever.
    #[serde(default)]
    pub max_reconnect_attempts: Option<u32>,

    /// Bounded outbound queue; sends beyond it are dropped, not buffered.
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl ChannelConfig {
    /// Config with defaults for a dial target; fields adjusted via the
    /// `with_*` methods or by YAML loading.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            auto_reconnect: default_auto_reconnect(),
            reconnect_interval_ms: default_reconnect_interval_ms(),
            max_reconnect_attempts: None,
            outbound_queue: default_outbound_queue(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_auto_reconnect(mut self, enabled: bool) -> Self {
        self.auto_reconnect = enabled;
        self
    }

    pub fn with_reconnect_interval(mut self, interval: Duration) -> Self {
        self.reconnect_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_max_reconnect_attempts(mut self, max: u32) -> Self {
        self.max_reconnect_attempts = Some(max);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Err(WsTetherError::InvalidConfig(
                "url must start with ws:// or wss://".into(),
            ));
        }
        if !(100..=300_000).contains(&self.reconnect_interval_ms) {
            return Err(WsTetherError::InvalidConfig(
                "reconnect_interval_ms must be between 100 and 300000".into(),
            ));
        }
        if self.max_reconnect_attempts == Some(0) {
            return Err(WsTetherError::InvalidConfig(
                "max_reconnect_attempts must be at least 1 when set".into(),
            ));
        }
        if self.outbound_queue == 0 {
            return Err(WsTetherError::InvalidConfig(
                "outbound_queue must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Reconnect policy derived from this config.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_millis(self.reconnect_interval_ms),
            max_attempts: self.max_reconnect_attempts,
            enabled: self.auto_reconnect,
        }
    }
}

fn default_auto_reconnect() -> bool {
    true
}
fn default_reconnect_interval_ms() -> u64 {
    3000
}
fn default_outbound_queue() -> usize {
    64
}
