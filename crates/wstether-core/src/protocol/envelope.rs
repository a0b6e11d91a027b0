//! Channel envelope (JSON text frame).
//!
//! The core stores `data` as `RawValue`: the payload is opaque to the
//! channel, and consumers parse it lazily keyed on `kind`.

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{Result, WsTetherError};

/// One message exchanged over the channel.
///
/// Wire shape: `{"type": string, "data": any, "timestamp": string}`.
/// `timestamp` is the producer-side emission time (ISO-8601) and is
/// advisory: it is never validated and never used for reordering. Unknown
/// fields on inbound frames are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Message discriminator (field name is `type` in JSON).
    #[serde(rename = "type")]
    pub kind: String,
    /// Opaque payload, stored as raw JSON (lazy parsing).
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
    /// Producer-side emission time, ISO-8601.
    pub timestamp: String,
}

impl Envelope {
    /// Build an envelope stamped with the current UTC time.
    pub fn new(kind: impl Into<String>, data: &impl Serialize) -> Result<Self> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        Self::with_timestamp(kind, data, timestamp)
    }

    /// Build an envelope with an explicit timestamp.
    pub fn with_timestamp(
        kind: impl Into<String>,
        data: &impl Serialize,
        timestamp: impl Into<String>,
    ) -> Result<Self> {
        let raw = serde_json::value::to_raw_value(data)
            .map_err(|e| WsTetherError::Encode(format!("envelope data: {e}")))?;
        Ok(Self {
            kind: kind.into(),
            data: Some(raw),
            timestamp: timestamp.into(),
        })
    }

    /// Parse the payload into a concrete type.
    pub fn parse_data<T: DeserializeOwned>(&self) -> Result<T> {
        let raw = self
            .data
            .as_ref()
            .ok_or_else(|| WsTetherError::Decode("envelope has no data".into()))?;
        serde_json::from_str(raw.get())
            .map_err(|e| WsTetherError::Decode(format!("envelope data: {e}")))
    }
}

/// Decode one text frame into an envelope.
pub fn decode_frame(frame: &str) -> Result<Envelope> {
    serde_json::from_str(frame)
        .map_err(|e| WsTetherError::Decode(format!("invalid envelope json: {e}")))
}

/// Encode an envelope into its text-frame form.
pub fn encode_frame(env: &Envelope) -> Result<String> {
    serde_json::to_string(env).map_err(|e| WsTetherError::Encode(format!("envelope: {e}")))
}
