//! Decode-once codec for the transport layer.
//!
//! - Text frames pass through as envelope candidates.
//! - Binary frames are validated as UTF-8 once and treated as text
//!   (the wire contract is UTF-8 JSON regardless of the frame opcode).
//! - Ping/Pong are transport chatter; Close ends the stream.

use tokio_tungstenite::tungstenite::Message;

use wstether_core::error::{Result, WsTetherError};

#[derive(Debug)]
pub enum Inbound {
    Frame(String),
    Ping,
    Pong,
    Close,
}

pub fn decode(msg: Message) -> Result<Inbound> {
    match msg {
        Message::Text(s) => Ok(Inbound::Frame(s)),
        Message::Binary(b) => {
            let s = std::str::from_utf8(&b)
                .map_err(|e| WsTetherError::Decode(format!("binary frame is not utf-8: {e}")))?;
            Ok(Inbound::Frame(s.to_owned()))
        }
        Message::Ping(_) => Ok(Inbound::Ping),
        Message::Pong(_) => Ok(Inbound::Pong),
        Message::Close(_) => Ok(Inbound::Close),
        Message::Frame(_) => Err(WsTetherError::Decode("unexpected raw frame".into())),
    }
}
