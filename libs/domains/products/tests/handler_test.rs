//! Handler tests for Products domain
//!
//! These tests drive the products router end to end over the in-memory
//! repository:
//! - Request deserialization and validation
//! - Vote ledger and repeated moderation decisions
//! - HTTP status codes and error bodies
//!
//! The MongoDB-backed test at the bottom needs Docker and is ignored by default.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ErrorResponse;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::{TestDataBuilder, TestMongo};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn submit(app: &Router, name: &str, tags: &[&str]) -> Product {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/products",
            json!({
                "name": name,
                "ownerEmail": "a@x.com",
                "tags": tags,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: ProductMutation = json_body(response.into_body()).await;
    created.product
}

#[tokio::test]
async fn test_create_product_returns_201_with_defaults() {
    let app = app();
    let product = submit(&app, "Foo", &["ai", "tool"]).await;

    assert_eq!(product.name, "Foo");
    assert_eq!(product.status, ProductStatus::Pending);
    assert_eq!(product.votes, 0);
    assert!(product.voted_users.is_empty());
    assert!(!product.is_featured);
    assert_eq!(product.report_count, 0);
}

#[tokio::test]
async fn test_create_product_accepts_legacy_owner_field() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/products",
            json!({ "name": "Foo", "ownerMail": "legacy@x.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: ProductMutation = json_body(response.into_body()).await;
    assert_eq!(created.product.owner_email, "legacy@x.com");
}

#[tokio::test]
async fn test_create_product_validates_input() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/products",
            json!({ "name": "", "ownerEmail": "a@x.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_search_filters_by_tag() {
    let app = app();
    submit(&app, "Foo", &["ai", "tool"]).await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/products?search=ai"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 1);

    let response = app
        .oneshot(empty_request("GET", "/products?search=zzz"))
        .await
        .unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_list_by_owner() {
    let app = app();
    submit(&app, "Foo", &[]).await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/products/a@x.com"))
        .await
        .unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 1);

    let response = app
        .oneshot(empty_request("GET", "/products/nobody@x.com"))
        .await
        .unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let app = app();
    let accepted = submit(&app, "Foo", &[]).await;
    submit(&app, "Bar", &[]).await;

    app.clone()
        .oneshot(empty_request(
            "POST",
            &format!("/products/accept/{}", accepted.id),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(empty_request("GET", "/products?status=Accepted"))
        .await
        .unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, accepted.id);
}

#[tokio::test]
async fn test_vote_twice_is_rejected_and_count_unchanged() {
    let app = app();
    let product = submit(&app, "Foo", &[]).await;
    let uri = format!("/product/{}/vote", product.id);

    let response = app
        .clone()
        .oneshot(json_request("POST", &uri, json!({ "userEmail": "b@x.com" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let voted: ProductMutation = json_body(response.into_body()).await;
    assert_eq!(voted.message, "Vote added successfully");
    assert_eq!(voted.product.votes, 1);

    let response = app
        .clone()
        .oneshot(json_request("POST", &uri, json!({ "userEmail": "b@x.com" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "CONFLICT");
    assert_eq!(error.message, "User has already voted");

    let response = app
        .oneshot(empty_request("GET", &format!("/product/{}", product.id)))
        .await
        .unwrap();
    let stored: Product = json_body(response.into_body()).await;
    assert_eq!(stored.votes, 1);
}

#[tokio::test]
async fn test_vote_by_name() {
    let app = app();
    submit(&app, "Foo", &[]).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/products/vote/Foo",
            json!({ "userEmail": "b@x.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/products/vote/Foo",
            json!({ "userEmail": "b@x.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "CONFLICT");

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/products"))
        .await
        .unwrap();
    let stored: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(stored[0].votes, 1);
    assert!(stored[0].voted_users.contains("b@x.com"));

    let response = app
        .oneshot(json_request(
            "POST",
            "/products/vote/Unknown",
            json!({ "userEmail": "b@x.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vote_requires_user_email() {
    let app = app();
    let product = submit(&app, "Foo", &[]).await;

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/product/{}/vote", product.id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_twice_returns_404() {
    let app = app();
    let product = submit(&app, "Foo", &[]).await;
    let uri = format!("/product/{}", product.id);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: MessageResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Product deleted successfully");

    let response = app
        .oneshot(empty_request(
            "DELETE",
            &format!("/products/{}", product.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_returns_400() {
    let response = app()
        .oneshot(empty_request("GET", "/product/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "INVALID_UUID");
}

#[tokio::test]
async fn test_unknown_id_returns_404() {
    let response = app()
        .oneshot(empty_request(
            "GET",
            &format!("/product/{}", uuid::Uuid::now_v7()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_accept_twice_returns_404() {
    let app = app();
    let product = submit(&app, "Foo", &[]).await;
    let uri = format!("/products/accept/{}", product.id);

    let response = app
        .clone()
        .oneshot(empty_request("POST", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let accepted: ProductMutation = json_body(response.into_body()).await;
    assert_eq!(accepted.product.status, ProductStatus::Accepted);

    let response = app.oneshot(empty_request("POST", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Product is already Accepted");
}

#[tokio::test]
async fn test_reject_twice_returns_404() {
    let app = app();
    let product = submit(&app, "Foo", &[]).await;
    let uri = format!("/products/reject/{}", product.id);

    let response = app
        .clone()
        .oneshot(empty_request("POST", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(empty_request("POST", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Product is already Rejected");
}

#[tokio::test]
async fn test_feature_twice_returns_404() {
    let app = app();
    let product = submit(&app, "Foo", &[]).await;
    let uri = format!("/products/feature/{}", product.id);

    let response = app
        .clone()
        .oneshot(empty_request("POST", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(empty_request("POST", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Product is already featured");
}

#[tokio::test]
async fn test_feature_and_report_unknown_id_return_404() {
    let app = app();
    let id = uuid::Uuid::now_v7();

    for (method, uri) in [
        ("POST", format!("/products/feature/{}", id)),
        ("PATCH", format!("/products/report/{}", id)),
    ] {
        let response = app
            .clone()
            .oneshot(empty_request(method, &uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{} {}", method, uri);
        let error: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(error.error, "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_list_rejects_malformed_query_with_json_error() {
    let app = app();

    let response = app
        .oneshot(empty_request("GET", "/products?featured=maybe"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "INVALID_QUERY");
    assert!(error.message.starts_with("Failed to deserialize query string"));
}

#[tokio::test]
async fn test_feature_and_report() {
    let app = app();
    let product = submit(&app, "Foo", &[]).await;

    let response = app
        .clone()
        .oneshot(empty_request(
            "POST",
            &format!("/products/feature/{}", product.id),
        ))
        .await
        .unwrap();
    let featured: ProductMutation = json_body(response.into_body()).await;
    assert!(featured.product.is_featured);

    let report_uri = format!("/products/report/{}", product.id);
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(empty_request("PATCH", &report_uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(empty_request("GET", &format!("/product/{}", product.id)))
        .await
        .unwrap();
    let stored: Product = json_body(response.into_body()).await;
    assert!(stored.is_reported);
    assert_eq!(stored.report_count, 2);
}

#[tokio::test]
async fn test_update_edits_presentation_fields_only() {
    let app = app();
    let product = submit(&app, "Foo", &[]).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/product/{}", product.id),
            json!({ "name": "Bar", "votes": 99, "status": "Accepted" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: ProductMutation = json_body(response.into_body()).await;
    assert_eq!(updated.product.name, "Bar");
    assert_eq!(updated.product.votes, 0);
    assert_eq!(updated.product.status, ProductStatus::Pending);
}

#[tokio::test]
#[ignore] // Requires Docker for the MongoDB container
async fn test_vote_ledger_against_mongodb() {
    let mongo = TestMongo::new().await;
    let repo = MongoProductRepository::new(&mongo.database());
    repo.init_indexes().await.unwrap();
    let app = handlers::router(ProductService::new(repo));

    let builder = TestDataBuilder::from_test_name("mongo_vote_ledger");
    let product = submit(&app, &builder.name("product", "main"), &["ai"]).await;
    let uri = format!("/product/{}/vote", product.id);
    let voter = builder.email("voter");

    let response = app
        .clone()
        .oneshot(json_request("POST", &uri, json!({ "userEmail": voter })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request("POST", &uri, json!({ "userEmail": voter })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(empty_request("GET", "/products?search=AI"))
        .await
        .unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].votes, 1);
}

#[tokio::test]
#[ignore] // Requires Docker for the MongoDB container
async fn test_created_at_is_stored_as_datetime_and_sorts_newest_first() {
    use ::mongodb::bson::{Bson, Document, doc};

    let mongo = TestMongo::new().await;
    let db = mongo.database();
    let repo = MongoProductRepository::new(&db);
    repo.init_indexes().await.unwrap();
    let app = handlers::router(ProductService::new(repo));

    let builder = TestDataBuilder::from_test_name("mongo_created_at");
    let older = submit(&app, &builder.name("product", "older"), &[]).await;
    let newer = submit(&app, &builder.name("product", "newer"), &[]).await;

    let stored = db
        .collection::<Document>("products")
        .find_one(doc! { "_id": older.id.to_string() })
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(stored.get("createdAt"), Some(Bson::DateTime(_))));

    let response = app
        .oneshot(empty_request("GET", "/products"))
        .await
        .unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    let ids: Vec<_> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}
