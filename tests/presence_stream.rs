//! Presence changes streamed over `/ws/presence`.

mod helpers;

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use futures::StreamExt;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use uuid::Uuid;

use helpers::TestApp;

type Client =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn serve(app: &TestApp) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn connect(addr: SocketAddr, query: &str) -> Result<Client, WsError> {
    tokio_tungstenite::connect_async(format!("ws://{addr}/ws/presence{query}"))
        .await
        .map(|(stream, _)| stream)
}

async fn next_json(client: &mut Client) -> Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("presence frame in time")
            .expect("stream open")
            .unwrap();
        if let WsMessage::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

#[tokio::test]
async fn test_default_channel_streams_global_changes() {
    let app = TestApp::new();
    let addr = serve(&app).await;
    let mut client = connect(addr, "").await.unwrap();

    let user_id = Uuid::new_v4();
    assert_eq!(
        app.auth_event("login", user_id, "Ada").await,
        StatusCode::NO_CONTENT
    );

    let frame = next_json(&mut client).await;
    assert_eq!(frame["type"], "user_online");
    assert_eq!(frame["user_id"], user_id.to_string());
    assert_eq!(frame["name"], "Ada");

    app.auth_event("logout", user_id, "Ada").await;
    assert_eq!(next_json(&mut client).await["type"], "user_offline");
}

#[tokio::test]
async fn test_user_channel_only_streams_that_user() {
    let app = TestApp::new();
    let addr = serve(&app).await;
    let user_id = Uuid::new_v4();
    let mut client = connect(addr, &format!("?channel=presence:{user_id}"))
        .await
        .unwrap();

    app.auth_event("login", Uuid::new_v4(), "Grace").await;
    app.auth_event("login", user_id, "Ada").await;

    let frame = next_json(&mut client).await;
    assert_eq!(frame["user_id"], user_id.to_string());
}

#[tokio::test]
async fn test_unknown_channel_is_rejected() {
    let app = TestApp::new();
    let addr = serve(&app).await;

    match connect(addr, "?channel=tickets:1").await {
        Err(WsError::Http(response)) => assert_eq!(response.status(), StatusCode::BAD_REQUEST),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("handshake should be refused"),
    }
}
