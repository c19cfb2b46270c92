//! EngineClient integration tests against a local tiny_http server.

use std::io::{Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempo_config::EngineConfig;
use tempo_core::EngineReadiness;
use tempo_engine::{EngineClient, EngineError};

type JsonResponse = tiny_http::Response<Cursor<Vec<u8>>>;

fn json_response(body: &str) -> JsonResponse {
    tiny_http::Response::from_string(body).with_header(
        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
    )
}

/// Spawn a throwaway server; the handler sees the method, URL, and body.
fn spawn_server<F>(handler: F) -> String
where
    F: Fn(&str, &str, &str) -> JsonResponse + Send + 'static,
{
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    std::thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let method = request.method().as_str().to_string();
            let url = request.url().to_string();
            let response = handler(&method, &url, &body);
            let _ = request.respond(response);
        }
    });
    format!("http://{addr}")
}

fn client_for(base_url: String) -> EngineClient {
    let config = EngineConfig {
        base_url,
        request_timeout_ms: 2_000,
        move_request_retries: 1,
    };
    EngineClient::new(&config).unwrap()
}

#[tokio::test]
async fn status_resolves_ready() {
    let url = spawn_server(|method, url, _| {
        assert_eq!(method, "GET");
        assert_eq!(url, "/api/engine-status");
        json_response(r#"{"status":"ready"}"#)
    });
    let client = client_for(url);
    assert_eq!(client.status().await.unwrap(), EngineReadiness::Ready);
}

#[tokio::test]
async fn status_maps_unrecognized_to_unavailable() {
    let url = spawn_server(|_, _, _| json_response(r#"{"status":"hibernating"}"#));
    let client = client_for(url);
    assert_eq!(client.status().await.unwrap(), EngineReadiness::Unavailable);
}

#[tokio::test]
async fn status_non_2xx_is_transport_failure() {
    let url = spawn_server(|_, _, _| json_response("oops").with_status_code(503));
    let client = client_for(url);
    assert!(matches!(
        client.status().await,
        Err(EngineError::Transport(_))
    ));
}

#[tokio::test]
async fn move_request_carries_fen_and_returns_move() {
    let url = spawn_server(|method, url, body| {
        assert_eq!(method, "POST");
        assert_eq!(url, "/api/engine-move");
        // Refuse if the position was not sent, so a passing test proves it was.
        if body.contains(r#""fen":"#) && body.contains("rnbqkbnr") {
            json_response(r#"{"move":"e7e5"}"#)
        } else {
            json_response("{}").with_status_code(400)
        }
    });
    let client = client_for(url);
    let mv = client
        .request_move(tempo_core::STARTING_FEN)
        .await
        .unwrap();
    assert_eq!(mv, "e7e5");
}

#[tokio::test]
async fn empty_move_field_is_no_move() {
    let url = spawn_server(|_, _, _| json_response(r#"{"move":"  "}"#));
    let client = client_for(url);
    assert!(matches!(
        client.request_move(tempo_core::STARTING_FEN).await,
        Err(EngineError::NoMove)
    ));
}

#[tokio::test]
async fn missing_move_field_is_no_move() {
    let url = spawn_server(|_, _, _| json_response("{}"));
    let client = client_for(url);
    assert!(matches!(
        client.request_move(tempo_core::STARTING_FEN).await,
        Err(EngineError::NoMove)
    ));
}

#[tokio::test]
async fn move_request_retries_once_on_transport_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let url = spawn_server(move |_, _, _| {
        if seen.fetch_add(1, Ordering::SeqCst) == 0 {
            json_response("busy").with_status_code(500)
        } else {
            json_response(r#"{"move":"g8f6"}"#)
        }
    });
    let client = client_for(url);
    let mv = client
        .request_move(tempo_core::STARTING_FEN)
        .await
        .unwrap();
    assert_eq!(mv, "g8f6");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn no_move_reply_is_not_retried() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let url = spawn_server(move |_, _, _| {
        seen.fetch_add(1, Ordering::SeqCst);
        json_response("{}")
    });
    let client = client_for(url);
    assert!(matches!(
        client.request_move(tempo_core::STARTING_FEN).await,
        Err(EngineError::NoMove)
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn notify_reset_posts_the_new_position() {
    let url = spawn_server(|method, url, body| {
        assert_eq!(method, "POST");
        assert_eq!(url, "/api/engine-reset");
        assert!(body.contains("rnbqkbnr"));
        json_response("{}")
    });
    let client = client_for(url);
    client.notify_reset(tempo_core::STARTING_FEN).await.unwrap();
}
