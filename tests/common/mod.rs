#![allow(dead_code)]

use association_admin::{config::Config, create_app, db, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Once;
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";

static INIT: Once = Once::new();

pub fn setup() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// Fresh app over its own in-memory database.
pub async fn test_app() -> Router {
    app_with_token(TOKEN).await
}

pub async fn app_with_token(token: &str) -> Router {
    setup();
    let config = Config::for_tests(token);
    let db = db::connect(&config).await.expect("in-memory database");
    create_app(AppState::new(db, config))
}

/// Sends one request and returns the status with the parsed JSON body
/// (`Value::Null` when the body is not JSON).
pub async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("x-admin-token", token);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None, None).await
}

pub async fn admin_get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, Some(TOKEN), None).await
}

pub async fn admin_post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(TOKEN), Some(body)).await
}

/// Creates a member and returns its id.
pub async fn create_member(app: &Router, email: &str) -> i64 {
    let (status, user) = admin_post(
        app,
        "/users",
        serde_json::json!({"firstName": "Awa", "lastName": "Diop", "email": email}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{user}");
    user["id"].as_i64().unwrap()
}
