//! `HttpAdminTransport` tests against a one-shot local HTTP server.
//!
//! Each server accepts a single connection, records the raw request and
//! answers with a canned status and body.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use schemareg_core::{
    AdminRequest, AdminTransport, SchemaDefinition, SchemaRegistryClient, SchemaRegistryError,
    TransportError,
};
use schemareg_http::{AdminConfig, HttpAdminTransport};

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Start a server that answers one request; returns its base URL and a
/// handle resolving to the raw request text.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });
    (format!("http://{addr}"), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find_header_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn client_for(url: &str) -> SchemaRegistryClient {
    let config = AdminConfig::new(url).with_api_key("secret");
    SchemaRegistryClient::new(Arc::new(HttpAdminTransport::new(config).unwrap()))
}

// ─── Status handling ──────────────────────────────────────────────────────────

#[tokio::test]
async fn sign_agreement_200_with_plain_text_body_is_true() {
    let (url, server) = serve_once("200 OK", "OK").await;
    let accepted = client_for(&url).sign_agreement().await.unwrap();
    assert!(accepted);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /ledger/taa/accept HTTP/1.1\r\n"));
    assert!(request.to_lowercase().contains("x-api-key: secret"));
    assert!(request.contains("\"mechanism\":\"service_agreement\""));
}

#[tokio::test]
async fn sign_agreement_202_is_false() {
    let (url, server) = serve_once("202 Accepted", "").await;
    assert!(!client_for(&url).sign_agreement().await.unwrap());
    server.await.unwrap();
}

#[tokio::test]
async fn not_found_status_becomes_status_error() {
    let (url, server) = serve_once("404 Not Found", "no such route").await;
    let err = client_for(&url).sign_agreement().await.unwrap_err();
    match err {
        SchemaRegistryError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such route");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    server.await.unwrap();
}

// ─── Body decoding ────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_body_decodes_to_null() {
    let (url, server) = serve_once("200 OK", "").await;
    let transport = HttpAdminTransport::new(AdminConfig::new(url)).unwrap();
    let resp = transport.send(AdminRequest::get("/schemas/created")).await.unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, Value::Null);
    server.await.unwrap();
}

#[tokio::test]
async fn non_json_body_is_kept_as_string() {
    let (url, server) = serve_once("200 OK", "accepted, thanks").await;
    let transport = HttpAdminTransport::new(AdminConfig::new(url)).unwrap();
    let resp = transport
        .send(AdminRequest::post("/ledger/taa/accept", json!({})))
        .await
        .unwrap();
    assert_eq!(resp.body, Value::String("accepted, thanks".into()));
    server.await.unwrap();
}

#[tokio::test]
async fn publish_with_non_json_body_is_malformed() {
    let (url, server) = serve_once("200 OK", "OK").await;
    let client = client_for(&url);
    let err = client
        .publish_schema(&SchemaDefinition::new("degree", "1.0", ["name"]))
        .await
        .unwrap_err();
    assert!(matches!(err, SchemaRegistryError::MalformedResponse { .. }));
    assert!(client.cache().is_empty());
    server.await.unwrap();
}

// ─── Query parameters ─────────────────────────────────────────────────────────

#[tokio::test]
async fn schema_id_filters_reach_request_line() {
    let (url, server) = serve_once("200 OK", r#"{"schema_ids":["WgWx:2:degree:1.0"]}"#).await;
    let ids = client_for(&url)
        .fetch_schema_ids(Some("degree"), Some("1.0"))
        .await
        .unwrap();
    assert_eq!(ids, vec!["WgWx:2:degree:1.0"]);

    let request = server.await.unwrap();
    assert!(request
        .starts_with("GET /schemas/created?schema_name=degree&schema_version=1.0 HTTP/1.1\r\n"));
}

#[tokio::test]
async fn schema_ids_without_filters_send_no_query() {
    let (url, server) = serve_once("200 OK", r#"{"schema_ids":[]}"#).await;
    let ids = client_for(&url).fetch_schema_ids(None, None).await.unwrap();
    assert!(ids.is_empty());

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /schemas/created HTTP/1.1\r\n"));
}
