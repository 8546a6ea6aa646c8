//! HTTP handlers for reviews, coupons, newsletter and help

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    AppError, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CommunityResult;
use crate::models::{
    Coupon, CouponMutation, CreateCoupon, CreateHelpRequest, CreateNewsletterSubscription,
    CreateReview, HelpMutation, HelpRequest, MessageResponse, NewsletterMutation,
    NewsletterSubscription, Review, ReviewCreated,
};
use crate::repository::CommunityRepository;
use crate::service::CommunityService;

/// OpenAPI documentation for the community endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        add_review,
        list_reviews,
        reviews_for_product,
        add_coupon,
        list_coupons,
        delete_coupon,
        subscribe_newsletter,
        request_help,
    ),
    components(
        schemas(
            Review, CreateReview, ReviewCreated,
            Coupon, CreateCoupon, CouponMutation,
            NewsletterSubscription, CreateNewsletterSubscription, NewsletterMutation,
            HelpRequest, CreateHelpRequest, HelpMutation,
            MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Community", description = "Reviews, coupons, newsletter and help requests")
    )
)]
pub struct ApiDoc;

/// Create the community router with all HTTP endpoints
pub fn router<R: CommunityRepository + 'static>(service: CommunityService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/reviews", get(list_reviews).post(add_review))
        .route("/review/{product_id}", get(reviews_for_product))
        .route("/coupons", get(list_coupons).post(add_coupon))
        .route("/coupons/{id}", delete(delete_coupon))
        .route("/newsletter", post(subscribe_newsletter))
        .route("/helps", post(request_help))
        .with_state(shared_service)
}

/// Review a product
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Community",
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review added successfully!", body = ReviewCreated),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_review<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    payload: Result<Json<CreateReview>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let review = service.add_review(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReviewCreated {
            message: "Review added successfully!".to_string(),
            review_id: review.id,
        }),
    ))
}

/// List all reviews
#[utoipa::path(
    get,
    path = "/reviews",
    tag = "Community",
    responses(
        (status = 200, description = "All reviews", body = Vec<Review>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_reviews<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
) -> CommunityResult<Json<Vec<Review>>> {
    Ok(Json(service.list_reviews().await?))
}

/// Reviews of one product
#[utoipa::path(
    get,
    path = "/review/{product_id}",
    tag = "Community",
    params(
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Reviews of the product", body = Vec<Review>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn reviews_for_product<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    UuidPath(product_id): UuidPath,
) -> CommunityResult<Json<Vec<Review>>> {
    Ok(Json(service.reviews_for_product(product_id).await?))
}

/// Create a coupon
#[utoipa::path(
    post,
    path = "/coupons",
    tag = "Community",
    request_body = CreateCoupon,
    responses(
        (status = 201, description = "Coupon created", body = CouponMutation),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_coupon<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCoupon>,
) -> CommunityResult<impl IntoResponse> {
    let coupon = service.add_coupon(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(CouponMutation {
            message: "Coupon added successfully".to_string(),
            coupon,
        }),
    ))
}

/// List coupons
#[utoipa::path(
    get,
    path = "/coupons",
    tag = "Community",
    responses(
        (status = 200, description = "All coupons", body = Vec<Coupon>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_coupons<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
) -> CommunityResult<Json<Vec<Coupon>>> {
    Ok(Json(service.list_coupons().await?))
}

/// Delete a coupon
#[utoipa::path(
    delete,
    path = "/coupons/{id}",
    tag = "Community",
    params(
        ("id" = Uuid, Path, description = "Coupon ID")
    ),
    responses(
        (status = 200, description = "Coupon deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_coupon<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    UuidPath(id): UuidPath,
) -> CommunityResult<Json<MessageResponse>> {
    service.delete_coupon(id).await?;
    Ok(Json(MessageResponse {
        message: "Coupon deleted successfully".to_string(),
    }))
}

/// Sign up for the newsletter
#[utoipa::path(
    post,
    path = "/newsletter",
    tag = "Community",
    request_body = CreateNewsletterSubscription,
    responses(
        (status = 201, description = "Subscribed", body = NewsletterMutation),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn subscribe_newsletter<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateNewsletterSubscription>,
) -> CommunityResult<impl IntoResponse> {
    let subscription = service.subscribe_newsletter(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(NewsletterMutation {
            message: "Subscribed to the newsletter".to_string(),
            subscription,
        }),
    ))
}

/// Send a help request
#[utoipa::path(
    post,
    path = "/helps",
    tag = "Community",
    request_body = CreateHelpRequest,
    responses(
        (status = 201, description = "Help request received", body = HelpMutation),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn request_help<R: CommunityRepository>(
    State(service): State<Arc<CommunityService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateHelpRequest>,
) -> CommunityResult<impl IntoResponse> {
    let help = service.request_help(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(HelpMutation {
            message: "Help request received".to_string(),
            help,
        }),
    ))
}
