//! End-to-end tests for the `/ws` prompt session.

#![allow(clippy::panic)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FAIL_PROMPT, HANG_PROMPT, RecordingService, TestServer};
use futures_util::{SinkExt, StreamExt};
use prompt_gateway::domain::PromptResult;
use prompt_gateway::service::PromptService;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

const TIMEOUT: Duration = Duration::from_secs(5);

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn connect(server: &TestServer) -> WsStream {
    let Ok((ws, _)) = connect_async(server.ws_url()).await else {
        panic!("websocket handshake failed");
    };
    ws
}

async fn send_prompt(ws: &mut WsStream, prompt: &str) {
    let frame = serde_json::json!({ "prompt": prompt }).to_string();
    if ws.send(Message::text(frame)).await.is_err() {
        panic!("send failed");
    }
}

async fn next_frame(ws: &mut WsStream) -> Option<Message> {
    match timeout(TIMEOUT, ws.next()).await {
        Ok(Some(Ok(msg))) => Some(msg),
        Ok(Some(Err(_)) | None) => None,
        Err(_) => panic!("timed out waiting for a frame"),
    }
}

async fn next_result(ws: &mut WsStream) -> PromptResult {
    match next_frame(ws).await {
        Some(Message::Text(text)) => {
            let Ok(result) = serde_json::from_str(text.as_str()) else {
                panic!("reply is not a prompt result: {text}");
            };
            result
        }
        other => panic!("expected a text frame, got {other:?}"),
    }
}

/// Reads until the session ends and returns the close code, if any.
async fn expect_termination(ws: &mut WsStream) -> Option<u16> {
    match next_frame(ws).await {
        Some(Message::Close(frame)) => frame.map(|f| u16::from(f.code)),
        None => None,
        Some(other) => panic!("expected the session to end, got {other:?}"),
    }
}

#[tokio::test]
async fn hello_round_trip_and_deregistration() {
    let server = TestServer::start(Arc::new(RecordingService::default())).await;
    let baseline = server.connections.len();

    let mut ws = connect(&server).await;
    assert!(server.wait_for_connections(baseline + 1).await);

    send_prompt(&mut ws, "hello").await;
    let result = next_result(&mut ws).await;
    assert_eq!(result.result, "echo: hello");

    let _ = ws.close(None).await;
    assert!(server.wait_for_connections(baseline).await);
}

#[tokio::test]
async fn replies_match_request_order() {
    let service = Arc::new(RecordingService::default());
    let server = TestServer::start(Arc::clone(&service) as Arc<dyn PromptService>).await;
    let mut ws = connect(&server).await;

    let prompts: Vec<String> = (0..5).map(|i| format!("prompt {i}")).collect();
    for prompt in &prompts {
        send_prompt(&mut ws, prompt).await;
    }

    let mut replies = Vec::new();
    for _ in &prompts {
        replies.push(next_result(&mut ws).await.result);
    }
    let expected: Vec<String> = prompts.iter().map(|p| format!("echo: {p}")).collect();
    assert_eq!(replies, expected);
    assert_eq!(service.prompts().await, prompts);
}

#[tokio::test]
async fn extra_fields_are_ignored() {
    let server = TestServer::start(Arc::new(RecordingService::default())).await;
    let mut ws = connect(&server).await;

    let frame = r#"{"prompt":"hi","history":[["a","b"]],"stream":false}"#;
    if ws.send(Message::text(frame.to_string())).await.is_err() {
        panic!("send failed");
    }
    assert_eq!(next_result(&mut ws).await.result, "echo: hi");
}

#[tokio::test]
async fn malformed_frames_terminate_without_reply() {
    for bad in ["this is not json", r#"{"question":"hello"}"#, r#"{"prompt":42}"#] {
        let service = Arc::new(RecordingService::default());
        let server = TestServer::start(Arc::clone(&service) as Arc<dyn PromptService>).await;
        let mut ws = connect(&server).await;
        assert!(server.wait_for_connections(1).await);

        if ws.send(Message::text(bad.to_string())).await.is_err() {
            panic!("send failed");
        }
        let code = expect_termination(&mut ws).await;
        assert_eq!(code, Some(1003), "input {bad:?}");
        assert!(server.wait_for_connections(0).await, "input {bad:?}");
        assert!(service.prompts().await.is_empty());
    }
}

#[tokio::test]
async fn service_failure_terminates_session() {
    let server = TestServer::start(Arc::new(RecordingService::default())).await;
    let mut ws = connect(&server).await;
    assert!(server.wait_for_connections(1).await);

    send_prompt(&mut ws, FAIL_PROMPT).await;
    assert_eq!(expect_termination(&mut ws).await, Some(1011));
    assert!(server.wait_for_connections(0).await);
}

#[tokio::test]
async fn abrupt_disconnect_deregisters() {
    let server = TestServer::start(Arc::new(RecordingService::default())).await;
    let ws = connect(&server).await;
    assert!(server.wait_for_connections(1).await);

    drop(ws);
    assert!(server.wait_for_connections(0).await);
}

#[tokio::test]
async fn registry_counts_concurrent_sessions() {
    let server = TestServer::start(Arc::new(RecordingService::default())).await;

    let mut first = connect(&server).await;
    let mut second = connect(&server).await;
    assert!(server.wait_for_connections(2).await);

    send_prompt(&mut first, "from first").await;
    send_prompt(&mut second, "from second").await;
    assert_eq!(next_result(&mut second).await.result, "echo: from second");
    assert_eq!(next_result(&mut first).await.result, "echo: from first");

    let _ = first.close(None).await;
    assert!(server.wait_for_connections(1).await);

    send_prompt(&mut second, "still here").await;
    assert_eq!(next_result(&mut second).await.result, "echo: still here");

    let _ = second.close(None).await;
    assert!(server.wait_for_connections(0).await);
}

#[tokio::test]
async fn hung_prompt_does_not_block_other_sessions() {
    let server = TestServer::start(Arc::new(RecordingService::default())).await;

    let mut stuck = connect(&server).await;
    send_prompt(&mut stuck, HANG_PROMPT).await;

    let mut other = connect(&server).await;
    send_prompt(&mut other, "are you there?").await;
    assert_eq!(next_result(&mut other).await.result, "echo: are you there?");
}

#[tokio::test]
async fn health_reports_open_sessions() {
    let server = TestServer::start(Arc::new(RecordingService::default())).await;
    let _ws = connect(&server).await;
    assert!(server.wait_for_connections(1).await);

    let Ok(response) = reqwest::get(server.http_url("/health")).await else {
        panic!("health request failed");
    };
    let body: serde_json::Value = response.json().await.unwrap_or_default();
    assert_eq!(body["connections"], 1);
}
