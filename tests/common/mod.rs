#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use cinematika::api::AppState;
use cinematika::config::Config;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config
}

pub async fn spawn_app_with(config: Config) -> (Router, Arc<AppState>) {
    let state = cinematika::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    (cinematika::api::router(state.clone()), state)
}

pub async fn spawn_app() -> (Router, Arc<AppState>) {
    spawn_app_with(test_config()).await
}

/// Sends one request and returns the status with the decoded JSON body,
/// or `Value::Null` when the body is empty.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn create_director(app: &Router, full_name: &str, birthday: Option<&str>) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/directors/",
        Some(json!({"full_name": full_name, "birthday": birthday})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

pub async fn create_genre(app: &Router, name: &str) -> i64 {
    let (status, body) = send(app, "POST", "/api/v1/genres/", Some(json!({"name": name}))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

pub fn film_body(title: &str, director_id: i64, genres: &[i64]) -> Value {
    json!({
        "title": title,
        "text": "A film about a film",
        "rating": 7.5,
        "is_active": true,
        "director_id": director_id,
        "genres": genres,
    })
}

pub async fn create_film(app: &Router, title: &str, director_id: i64, genres: &[i64]) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/films/",
        Some(film_body(title, director_id, genres)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}
