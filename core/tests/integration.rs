//! `UserClient` over `HttpTransport` against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port on its own runtime thread, then
//! exercises both operations over real HTTP. Covers the failure kinds the
//! transport produces: remote rejection, timeout and refused connection.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use serde_json::json;
use user_client::{HttpTransport, RequestOptions, TransportError, UserClient, UserPayload};

/// Start `router` on a random port and return its address.
fn spawn_server(router: Router) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::serve(listener, router).await
        })
        .unwrap();
    });

    addr
}

fn payload(value: serde_json::Value) -> UserPayload {
    serde_json::from_value(value).unwrap()
}

fn seeded_client() -> UserClient<HttpTransport> {
    let router = mock_server::app_with_users(vec![payload(json!({"id": 3, "name": "Alice"}))]);
    let addr = spawn_server(router);
    UserClient::new(&format!("http://{addr}"), HttpTransport::new())
}

#[tokio::test]
async fn fetch_existing_user() {
    let client = seeded_client();

    let user = client.fetch_user(3, RequestOptions::default()).await.unwrap();

    assert_eq!(user, payload(json!({"id": 3, "name": "Alice"})));
}

#[tokio::test]
async fn fetch_missing_user_is_remote_rejection() {
    let client = seeded_client();

    let err = client.fetch_user(4, RequestOptions::default()).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn create_then_fetch_round_trip() {
    let client = seeded_client();

    let created = client
        .create_user(&payload(json!({"name": "Bob", "email": "bob@example.com"})))
        .await
        .unwrap();
    assert_eq!(
        created,
        payload(json!({"id": 4, "name": "Bob", "email": "bob@example.com"}))
    );

    let fetched = client.fetch_user(4, RequestOptions::default()).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn fetch_times_out_against_slow_server() {
    let router = mock_server::with_latency(
        mock_server::app_with_users(vec![payload(json!({"id": 5}))]),
        Duration::from_secs(2),
    );
    let addr = spawn_server(router);
    let client = UserClient::new(&format!("http://{addr}"), HttpTransport::new());

    let err = client
        .fetch_user(5, RequestOptions::with_timeout(Duration::from_millis(100)))
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
}

#[tokio::test]
async fn agent_default_timeout_applies_without_options() {
    let router = mock_server::with_latency(mock_server::app(), Duration::from_secs(2));
    let addr = spawn_server(router);
    let client = UserClient::new(
        &format!("http://{addr}"),
        HttpTransport::with_default_timeout(Duration::from_millis(100)),
    );

    let err = client
        .create_user(&payload(json!({"name": "Slow"})))
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = UserClient::new(&format!("http://{addr}"), HttpTransport::new());

    let fetch_err = client.fetch_user(1, RequestOptions::default()).await.unwrap_err();
    let create_err = client.create_user(&UserPayload::new()).await.unwrap_err();

    assert!(matches!(fetch_err, TransportError::Network(_)), "{fetch_err:?}");
    assert!(matches!(create_err, TransportError::Network(_)), "{create_err:?}");
}

#[tokio::test]
async fn per_call_timeout_extends_agent_default() {
    let router = mock_server::with_latency(
        mock_server::app_with_users(vec![payload(json!({"id": 5}))]),
        Duration::from_millis(500),
    );
    let addr = spawn_server(router);
    let client = UserClient::new(
        &format!("http://{addr}"),
        HttpTransport::with_default_timeout(Duration::from_millis(100)),
    );

    let user = client
        .fetch_user(5, RequestOptions::with_timeout(Duration::from_secs(5)))
        .await
        .unwrap();

    assert_eq!(user, payload(json!({"id": 5})));
}

#[tokio::test]
async fn per_call_timeout_shortens_agent_default() {
    let router = mock_server::with_latency(
        mock_server::app_with_users(vec![payload(json!({"id": 5}))]),
        Duration::from_secs(2),
    );
    let addr = spawn_server(router);
    let client = UserClient::new(
        &format!("http://{addr}"),
        HttpTransport::with_default_timeout(Duration::from_secs(5)),
    );

    let err = client
        .fetch_user(5, RequestOptions::with_timeout(Duration::from_millis(100)))
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
}

#[tokio::test]
async fn fetched_fields_keep_server_order() {
    let router = mock_server::app_with_users(vec![payload(
        json!({"id": 8, "username": "zed", "email": "zed@example.com", "address": {"city": "Oslo"}}),
    )]);
    let addr = spawn_server(router);
    let client = UserClient::new(&format!("http://{addr}"), HttpTransport::new());

    let user = client.fetch_user(8, RequestOptions::default()).await.unwrap();

    let keys: Vec<&str> = user.keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "username", "email", "address"]);
}
