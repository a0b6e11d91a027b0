//! Credential access for the dial URI.
//!
//! The token is read once per connection attempt and never refreshed
//! mid-connection; rotating it takes an explicit `disconnect()` +
//! `connect()` cycle by the caller.

use std::sync::Arc;

/// Source of the bearer credential, injected so channel behavior is
/// deterministic without a real credential store.
pub trait TokenProvider: Send + Sync + 'static {
    /// Current bearer token, or `None` to dial unauthenticated.
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed token (or none), typically lifted from [`crate::ChannelConfig`].
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Arc<Self> {
        Arc::new(Self(token))
    }
}

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Dial URI: the base url, suffixed with `?token={token}` when a credential
/// is present at dial time.
pub(crate) fn dial_url(base: &str, token: Option<&str>) -> String {
    match token {
        Some(t) => format!("{base}?token={t}"),
        None => base.to_string(),
    }
}
