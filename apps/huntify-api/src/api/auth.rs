//! Token issuance
//!
//! `POST /jwt` signs a short-lived HS256 token for the given email. The token
//! identifies the caller to the frontend; the product endpoints do not check it.

use axum::{Json, Router, extract::State, routing::post};
use axum_helpers::{
    AppError, JwtConfig, JwtIssuer, ValidatedJson,
    errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse},
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use validator::Validate;

#[derive(OpenApi)]
#[openapi(
    paths(issue_token),
    components(
        schemas(TokenRequest, TokenResponse),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Auth", description = "JWT issuance")
    )
)]
pub struct ApiDoc;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

pub fn router(config: &JwtConfig) -> Router {
    Router::new()
        .route("/jwt", post(issue_token))
        .with_state(JwtIssuer::new(config))
}

/// Issue a token for an email
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Signed token", body = TokenResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn issue_token(
    State(issuer): State<JwtIssuer>,
    ValidatedJson(input): ValidatedJson<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = issuer.issue(input.email.trim())?;
    tracing::info!(email = %input.email, "Issued access token");
    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn config() -> JwtConfig {
        JwtConfig::new("0123456789abcdef0123456789abcdef").unwrap()
    }

    fn token_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/jwt")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_issued_token_verifies() {
        let response = router(&config())
            .oneshot(token_request(r#"{"email":"a@x.com"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: TokenResponse = serde_json::from_slice(&bytes).unwrap();

        let claims = JwtIssuer::new(&config()).verify(&body.token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let response = router(&config())
            .oneshot(token_request(r#"{"email":"not-an-email"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
