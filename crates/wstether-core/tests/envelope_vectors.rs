//! Envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde_json::Value;
use wstether_core::protocol::{decode_frame, encode_frame, Envelope};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn parse_envelope_min() {
    let env = decode_frame(&load("envelope_min.json")).unwrap();
    assert_eq!(env.kind, "ping");
    assert_eq!(env.timestamp, "2026-08-04T09:15:00.000Z");
    assert!(env.data.is_none());
}

#[test]
fn parse_envelope_full() {
    let env = decode_frame(&load("envelope_full.json")).unwrap();
    assert_eq!(env.kind, "notification");
    let raw = env.data.as_ref().unwrap();
    assert!(raw.get().contains("\"unread\""));

    #[derive(serde::Deserialize)]
    struct Notif {
        id: u64,
        title: String,
        unread: bool,
    }
    let n: Notif = env.parse_data().unwrap();
    assert_eq!(n.id, 412);
    assert_eq!(n.title, "Webinar starting");
    assert!(n.unread);
}

#[test]
fn null_data_is_absent() {
    let env = decode_frame(&load("envelope_null_data.json")).unwrap();
    assert_eq!(env.kind, "heartbeat");
    assert!(env.data.is_none());
}

#[test]
fn unknown_fields_are_tolerated() {
    let env = decode_frame(&load("envelope_extra_field.json")).unwrap();
    assert_eq!(env.kind, "notification");
}

#[test]
fn reject_non_json() {
    let err = decode_frame("this is not json").unwrap_err();
    assert_eq!(err.kind(), "decode");
}

#[test]
fn reject_missing_type() {
    let err = decode_frame(r#"{"data": {}, "timestamp": "2026-08-04T09:00:00Z"}"#).unwrap_err();
    assert_eq!(err.kind(), "decode");
}

#[test]
fn reject_missing_timestamp() {
    let err = decode_frame(r#"{"type": "ping"}"#).unwrap_err();
    assert_eq!(err.kind(), "decode");
}

#[test]
fn reject_json_scalar() {
    let err = decode_frame("42").unwrap_err();
    assert_eq!(err.kind(), "decode");
}

#[test]
fn encode_preserves_data_verbatim() {
    let env = decode_frame(&load("envelope_full.json")).unwrap();
    let frame = encode_frame(&env).unwrap();

    let reparsed: Value = serde_json::from_str(&frame).unwrap();
    let original: Value = serde_json::from_str(&load("envelope_full.json")).unwrap();
    assert_eq!(reparsed, original);
}

#[test]
fn build_outbound_envelope() {
    #[derive(serde::Serialize)]
    struct Ack {
        id: u64,
    }
    let env = Envelope::with_timestamp("ack", &Ack { id: 9 }, "2026-08-04T10:00:00Z").unwrap();
    let frame = encode_frame(&env).unwrap();
    let v: Value = serde_json::from_str(&frame).unwrap();
    assert_eq!(v["type"], "ack");
    assert_eq!(v["data"]["id"], 9);
    assert_eq!(v["timestamp"], "2026-08-04T10:00:00Z");
}

#[test]
fn stamped_envelope_carries_rfc3339_utc() {
    let env = Envelope::new("ack", &serde_json::json!({})).unwrap();
    // e.g. 2026-08-04T10:00:00.123Z
    assert!(env.timestamp.ends_with('Z'));
    assert!(env.timestamp.contains('T'));
}
