//! Handler tests for Users domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ErrorResponse;
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::new()))
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn register(app: &Router, email: &str) -> UserCreated {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/users",
            Some(json!({ "email": email, "name": "Ada" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_register_and_list() {
    let app = app();
    let created = register(&app, "a@x.com").await;
    assert_eq!(created.message, "User added successfully");

    let response = app
        .oneshot(request("GET", "/users", None))
        .await
        .unwrap();
    let users: Vec<User> = json_body(response.into_body()).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, created.inserted_id);
}

#[tokio::test]
async fn test_register_duplicate_email_returns_400() {
    let app = app();
    register(&app, "a@x.com").await;

    let response = app
        .oneshot(request(
            "POST",
            "/users",
            Some(json!({ "email": "a@x.com" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "User already exists");
}

#[tokio::test]
async fn test_subscription_flow() {
    let app = app();
    register(&app, "a@x.com").await;

    let response = app
        .clone()
        .oneshot(request("GET", "/users/a@x.com", None))
        .await
        .unwrap();
    let status: SubscriptionStatus = json_body(response.into_body()).await;
    assert!(!status.subscription_status);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/subscribe",
            Some(json!({ "email": "a@x.com" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/subscribe",
            Some(json!({ "email": "a@x.com" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(request("GET", "/users/a@x.com", None))
        .await
        .unwrap();
    let status: SubscriptionStatus = json_body(response.into_body()).await;
    assert!(status.subscription_status);
}

#[tokio::test]
async fn test_unknown_email_returns_404() {
    let response = app()
        .oneshot(request("GET", "/users/ghost@x.com", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_promotions() {
    let app = app();
    let created = register(&app, "a@x.com").await;
    let uri = format!("/users/{}/moderator", created.inserted_id);

    let response = app
        .clone()
        .oneshot(request("PATCH", &uri, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let promoted: UserMutation = json_body(response.into_body()).await;
    assert_eq!(promoted.user.position, Position::Moderator);

    let response = app
        .clone()
        .oneshot(request("PATCH", &uri, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "User is already moderator");

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/users/{}/admin", uuid::Uuid::now_v7()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(request("PATCH", "/users/not-a-uuid/admin", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
