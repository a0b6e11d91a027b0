//! Strict channel config parsing.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use wstether_client::config;

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str(r#"url: "wss://itas.example/ws""#).expect("must parse");
    assert_eq!(cfg.url, "wss://itas.example/ws");
    assert!(cfg.auto_reconnect);
    assert_eq!(cfg.reconnect_interval_ms, 3000);
    assert_eq!(cfg.max_reconnect_attempts, None);
    assert_eq!(cfg.outbound_queue, 64);
}

#[test]
fn ok_full_config() {
    let ok = r#"
url: "wss://itas.example/ws"
token: "abc"
auto_reconnect: false
reconnect_interval_ms: 500
max_reconnect_attempts: 5
outbound_queue: 8
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.token.as_deref(), Some("abc"));
    assert!(!cfg.auto_reconnect);
    assert_eq!(cfg.max_reconnect_attempts, Some(5));

    let policy = cfg.retry_policy();
    assert!(!policy.enabled);
    assert_eq!(policy.interval, Duration::from_millis(500));
    assert_eq!(policy.max_attempts, Some(5));
}

#[test]
fn deny_unknown_fields() {
    let bad = r#"
url: "wss://itas.example/ws"
reconect_interval_ms: 500 # typo should fail
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind(), "invalid_config");
}

#[test]
fn reject_bad_scheme() {
    let err = config::load_from_str(r#"url: "https://itas.example/ws""#).expect_err("must fail");
    assert_eq!(err.kind(), "invalid_config");
}

#[test]
fn reject_out_of_range_interval() {
    let bad = r#"
url: "wss://itas.example/ws"
reconnect_interval_ms: 50
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn reject_zero_max_attempts() {
    let bad = r#"
url: "wss://itas.example/ws"
max_reconnect_attempts: 0
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn reject_zero_outbound_queue() {
    let bad = r#"
url: "wss://itas.example/ws"
outbound_queue: 0
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn builder_matches_loader_defaults() {
    let built = config::ChannelConfig::new("wss://itas.example/ws");
    let loaded = config::load_from_str(r#"url: "wss://itas.example/ws""#).unwrap();
    assert_eq!(built.auto_reconnect, loaded.auto_reconnect);
    assert_eq!(built.reconnect_interval_ms, loaded.reconnect_interval_ms);
    assert_eq!(built.outbound_queue, loaded.outbound_queue);
    assert!(built.validate().is_ok());
}
