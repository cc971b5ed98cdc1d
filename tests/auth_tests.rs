mod common;

use axum::http::StatusCode;
use common::{send, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_register_then_login_after_activation() {
    let (app, state) = spawn_app().await;
    let credentials = json!({"username": "cinephile", "password": "letterboxd"});

    let (status, body) = send(&app, "POST", "/auth/register/", Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["user_id"].is_i64());

    let (status, body) = send(&app, "POST", "/auth/login/", Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_null());

    assert!(state.store.set_user_active("cinephile", true).await.unwrap());

    let (status, first) = send(&app, "POST", "/auth/login/", Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let key = first["key"].as_str().unwrap();
    assert_eq!(key.len(), 40);

    let (status, second) = send(&app, "POST", "/auth/login/", Some(credentials)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["key"], key);
}

#[tokio::test]
async fn test_bad_credentials_get_empty_401() {
    let (app, state) = spawn_app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/auth/register/",
        Some(json!({"username": "critic", "password": "right"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    state.store.set_user_active("critic", true).await.unwrap();

    for body in [
        json!({"username": "critic", "password": "wrong"}),
        json!({"username": "nobody", "password": "right"}),
    ] {
        let (status, response) = send(&app, "POST", "/auth/login/", Some(body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(response.is_null());
    }
}

#[tokio::test]
async fn test_login_requires_fields() {
    let (app, _) = spawn_app().await;
    let (status, errors) = send(
        &app,
        "POST",
        "/auth/login/",
        Some(json!({"username": "critic"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors, json!({"password": ["This field is required."]}));
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let (app, _) = spawn_app().await;
    let body = json!({"username": "auteur", "password": "first"});

    let (status, _) = send(&app, "POST", "/auth/register/", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, errors) = send(
        &app,
        "POST",
        "/auth/register/",
        Some(json!({"username": "auteur", "password": "second"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        errors,
        json!({"errors": {"username": ["A user with that username already exists."]}})
    );
}

#[tokio::test]
async fn test_registration_validation_is_wrapped() {
    let (app, _) = spawn_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/auth/register/",
        Some(json!({"username": "has space", "password": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["username"].is_array());
    assert_eq!(
        body["errors"]["password"],
        json!(["This field may not be blank."])
    );
}
