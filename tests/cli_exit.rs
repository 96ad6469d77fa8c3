//! Process-level behavior of the `bitkub-dca` binary: exit status and console lines.

use std::io::ErrorKind;
use std::net::TcpListener;
use std::process::{Command, Output};

use httpmock::prelude::*;

fn run_bin(vars: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bitkub-dca"))
        .env_clear()
        .envs(vars.iter().copied())
        .output()
        .expect("failed to spawn bitkub-dca")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn mock_exchange(reply: &str) -> MockServer {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/servertime");
        then.status(200).body("1700000000000");
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/v3/market/place-bid");
        then.status(200).body(reply);
    });
    server
}

#[test]
fn missing_credentials_exit_1_without_connecting() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let host = format!("http://{}", listener.local_addr().unwrap());

    let out = run_bin(&[("BITKUB_HOST", &host)]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("CRITICAL:"), "stdout: {}", stdout(&out));
    match listener.accept() {
        Err(e) if e.kind() == ErrorKind::WouldBlock => {}
        Ok(_) => panic!("binary connected to the exchange without credentials"),
        Err(e) => panic!("unexpected accept error: {}", e),
    }
}

#[test]
fn invalid_symbol_exit_1_with_hint() {
    let server = mock_exchange(r#"{"error":11}"#);
    let host = server.base_url();

    let out = run_bin(&[
        ("API_KEY", "test-key"),
        ("API_SECRET", "abc123"),
        ("BITKUB_HOST", &host),
    ]);

    let text = stdout(&out);
    assert_eq!(out.status.code(), Some(1), "stdout: {}", text);
    assert!(text.contains("FAILED"), "stdout: {}", text);
    assert!(text.contains("HINT:"), "stdout: {}", text);
    assert!(text.contains("Invalid Symbol"), "stdout: {}", text);
}

#[test]
fn successful_order_exit_0() {
    let server = mock_exchange(r#"{"error":0,"result":{"id":"X","spend":"500"}}"#);
    let host = server.base_url();

    let out = run_bin(&[
        ("API_KEY", "test-key"),
        ("API_SECRET", "abc123"),
        ("BITKUB_HOST", &host),
    ]);

    let text = stdout(&out);
    assert_eq!(out.status.code(), Some(0), "stdout: {}", text);
    assert!(text.contains("SUCCESS!"), "stdout: {}", text);
    assert!(text.contains("Order ID: X"), "stdout: {}", text);
    assert!(text.contains("Credit Used: 500"), "stdout: {}", text);

    let stderr = String::from_utf8_lossy(&out.stderr);
    let start: serde_json::Value = stderr
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .find(|v| v["event"] == "system.start")
        .expect("no system.start record on stderr");
    assert_eq!(start["msg"], "starting");
}
