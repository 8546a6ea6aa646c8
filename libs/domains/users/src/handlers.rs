use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    CreateUser, Position, SubscribeRequest, SubscriptionStatus, User, UserCreated, UserMutation,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        subscription_status,
        subscribe,
        make_moderator,
        make_admin,
    ),
    components(
        schemas(
            User, CreateUser, Position, SubscribeRequest,
            SubscriptionStatus, UserCreated, UserMutation
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User registration, subscriptions and staff positions")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{key}", get(subscription_status))
        .route("/users/{key}/moderator", patch(make_moderator))
        .route("/users/{key}/admin", patch(make_admin))
        .route("/subscribe", post(subscribe))
        .with_state(shared_service)
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Register a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User added successfully", body = UserCreated),
        (status = 400, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserCreated {
            message: "User added successfully".to_string(),
            inserted_id: user.id,
        }),
    ))
}

/// Subscription status of a user
#[utoipa::path(
    get,
    path = "/users/{key}",
    tag = "Users",
    params(
        ("key" = String, Path, description = "User email")
    ),
    responses(
        (status = 200, description = "Subscription status", body = SubscriptionStatus),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn subscription_status<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(email): Path<String>,
) -> UserResult<Json<SubscriptionStatus>> {
    let status = service.subscription_status(&email).await?;
    Ok(Json(status))
}

/// Subscribe an email, registering it if unknown
#[utoipa::path(
    post,
    path = "/subscribe",
    tag = "Users",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscription successful", body = UserMutation),
        (status = 400, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn subscribe<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(request): ValidatedJson<SubscribeRequest>,
) -> UserResult<Json<UserMutation>> {
    let user = service.subscribe(&request.email).await?;
    Ok(Json(UserMutation {
        message: "Subscription successful".to_string(),
        user,
    }))
}

/// Make a user a moderator
#[utoipa::path(
    patch,
    path = "/users/{key}/moderator",
    tag = "Users",
    params(
        ("key" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User updated to Moderator successfully", body = UserMutation),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn make_moderator<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserMutation>> {
    let user = service.make_moderator(id).await?;
    Ok(Json(UserMutation {
        message: "User updated to Moderator successfully".to_string(),
        user,
    }))
}

/// Make a user an admin
#[utoipa::path(
    patch,
    path = "/users/{key}/admin",
    tag = "Users",
    params(
        ("key" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User updated to Admin successfully", body = UserMutation),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn make_admin<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserMutation>> {
    let user = service.make_admin(id).await?;
    Ok(Json(UserMutation {
        message: "User updated to Admin successfully".to_string(),
        user,
    }))
}
