//! Channel config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use wstether_core::error::{Result, WsTetherError};

pub use schema::ChannelConfig;

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ChannelConfig> {
    let s = fs::read_to_string(path.as_ref())
        .map_err(|e| WsTetherError::InvalidConfig(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ChannelConfig> {
    let cfg: ChannelConfig = serde_yaml::from_str(s)
        .map_err(|e| WsTetherError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
