use std::io::Write;
use std::net::TcpListener;
use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::{NamedTempFile, TempDir};
use tokio::time::sleep;

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a config with database path
fn config_with_db(port: u16, db_path: &str) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = {}

[database]
path = "{}"
"#,
        port, db_path
    )
}

/// Spawn the server and return a handle
fn spawn_server(config_path: &std::path::Path) -> tokio::process::Child {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_ticketdesk"))
        .env("TICKETDESK_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .env_remove("OPENAI_API_KEY")
        .env_remove("PORT")
        .env_remove("DATABASE_URL")
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/api/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

/// Helper to start a server for testing
async fn start_test_server() -> (u16, tokio::process::Child, TempDir, NamedTempFile) {
    let port = get_available_port();
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let mut config_file = NamedTempFile::new().unwrap();
    config_file
        .write_all(config_with_db(port, db_path.to_str().unwrap()).as_bytes())
        .unwrap();
    config_file.flush().unwrap();

    let server = spawn_server(config_file.path());

    assert!(
        wait_for_server(port, 100).await,
        "Server did not start in time"
    );

    (port, server, temp_dir, config_file)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (port, mut server, _temp_dir, _config) = start_test_server().await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/api/health", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let json: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["status"], "ok");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_ticket_round_trip_over_http() {
    let (port, mut server, _temp_dir, _config) = start_test_server().await;
    let client = Client::new();
    let base = format!("http://127.0.0.1:{}/api", port);

    // use_ai with no key configured still succeeds via the heuristic
    let response = client
        .post(format!("{}/tickets", base))
        .json(&json!({
            "title": "Payment failed",
            "description": "Card charged twice",
            "use_ai": true
        }))
        .send()
        .await
        .expect("Failed to create ticket");

    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["priority"], "HIGH");
    assert_eq!(created["status"], "NEW");
    let id = created["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/tickets/{}/status", base, id))
        .json(&json!({ "status": "CLOSED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .delete(format!("{}/tickets/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/tickets/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_invalid_config_exits_with_error() {
    let mut config_file = NamedTempFile::new().unwrap();
    config_file
        .write_all(b"[server]\nport = 0\n")
        .unwrap();
    config_file.flush().unwrap();

    let status = tokio::process::Command::new(env!("CARGO_BIN_EXE_ticketdesk"))
        .env("TICKETDESK_CONFIG", config_file.path())
        .env("RUST_LOG", "error")
        .status()
        .await
        .expect("Failed to run server");

    assert!(!status.success());
}

#[tokio::test]
async fn test_missing_explicit_config_exits_with_error() {
    let status = tokio::process::Command::new(env!("CARGO_BIN_EXE_ticketdesk"))
        .env("TICKETDESK_CONFIG", "/nonexistent/ticketdesk.toml")
        .env("RUST_LOG", "error")
        .status()
        .await
        .expect("Failed to run server");

    assert!(!status.success());
}
