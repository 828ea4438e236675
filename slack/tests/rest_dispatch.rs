use std::sync::mpsc;
use std::time::Duration;

use serde_json::Value;

use slack::{ClientConfig, RestTransport, SlackError, Transport};

/// Port 9 (discard) refuses connections immediately; nothing leaves the host.
fn unreachable_config() -> ClientConfig {
    ClientConfig::new("xoxb-test")
        .with_base_url("http://127.0.0.1:9/api")
        .with_timeout(Duration::from_secs(2))
}

fn dispatch_and_wait(transport: &RestTransport, method: &str) -> Value {
    let (tx, rx) = mpsc::channel();
    transport.api_call(
        method,
        vec![("channel".to_string(), "G1".to_string())],
        Box::new(move |payload| {
            tx.send(payload).unwrap();
        }),
    );
    rx.recv_timeout(Duration::from_secs(10))
        .expect("completion handler never fired")
}

#[test]
fn test_handler_fires_exactly_once_on_transport_failure() {
    let transport = RestTransport::new(unreachable_config()).unwrap();

    let (tx, rx) = mpsc::channel();
    transport.api_call(
        "groups.close",
        vec![("channel".to_string(), "G1".to_string())],
        Box::new(move |payload| {
            tx.send(payload).unwrap();
        }),
    );

    // Exactly one payload arrives, error-shaped because the host is unreachable
    let payload = rx.recv_timeout(Duration::from_secs(10)).unwrap();
    assert_eq!(payload["ok"], Value::Bool(false));
    assert!(payload["error"].as_str().is_some());
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn test_queued_calls_drain_before_shutdown() {
    let transport = RestTransport::new(unreachable_config()).unwrap();

    let (tx, rx) = mpsc::channel();
    for _ in 0..3 {
        let tx = tx.clone();
        transport.api_call(
            "groups.open",
            Vec::new(),
            Box::new(move |payload| {
                tx.send(payload).unwrap();
            }),
        );
    }

    transport.shutdown();

    // All three completions were delivered during the drain
    for _ in 0..3 {
        assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
    }
}

#[test]
fn test_calls_after_shutdown_complete_locally() {
    let transport = RestTransport::new(unreachable_config()).unwrap();
    transport.shutdown();

    let payload = dispatch_and_wait(&transport, "groups.archive");

    assert_eq!(payload["ok"], Value::Bool(false));
    assert_eq!(
        payload["error"],
        Value::String("dispatch_queue_closed".to_string())
    );
}

#[test]
fn test_call_blocking_reports_http_error() {
    let transport = RestTransport::new(unreachable_config()).unwrap();

    let result = transport.call_blocking("groups.list", Vec::new());

    assert!(matches!(result, Err(SlackError::Http(_))));
}

#[test]
fn test_invalid_config_is_rejected_up_front() {
    assert!(matches!(
        RestTransport::new(ClientConfig::new("")),
        Err(SlackError::Config(_))
    ));
    assert!(matches!(
        RestTransport::new(ClientConfig::new("xoxb-test").with_base_url("ftp://example.test")),
        Err(SlackError::Config(_))
    ));
}
