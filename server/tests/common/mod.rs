//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use taskapi_core::{FileTaskStore, InMemoryTaskStore};
use taskapi_server::{router, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

/// Router backed by a fresh file store in its own temporary directory.
/// Keep the `TempDir` alive for as long as the router is used.
pub fn file_app() -> (Router, FileTaskStore, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = FileTaskStore::in_dir(dir.path()).expect("create store");
    let app = router(AppState::from_store(store.clone()));
    (app, store, dir)
}

pub fn memory_app() -> Router {
    router(AppState::from_store(InMemoryTaskStore::new()))
}

/// Sends one request and returns the status with the body parsed as JSON
/// (`Value::Null` for an empty body).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, value)
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    send_typed(app, method, uri, "application/json", body).await
}

/// Sends `body` verbatim under the given `Content-Type`.
pub async fn send_typed(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_owned()))
        .expect("build request");

    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("read body").to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
