//! Shared error type across wsTether crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, WsTetherError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum WsTetherError {
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl WsTetherError {
    /// Stable lowercase label for log fields and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            WsTetherError::Encode(_) => "encode",
            WsTetherError::Decode(_) => "decode",
            WsTetherError::Transport(_) => "transport",
            WsTetherError::InvalidConfig(_) => "invalid_config",
            WsTetherError::Internal(_) => "internal",
        }
    }
}
