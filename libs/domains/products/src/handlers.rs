//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestQueryResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, MessageResponse, Product, ProductMutation, ProductQuery, ProductStatus,
    UpdateProduct, VoteRequest,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        list_by_owner,
        create_product,
        get_product,
        update_product,
        delete_product,
        delete_product_legacy,
        vote_by_name,
        vote_by_id,
        accept_product,
        reject_product,
        feature_product,
        report_product,
    ),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct, ProductStatus,
            VoteRequest, ProductMutation, MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestQueryResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product submission, voting and moderation")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{key}",
            get(list_by_owner).delete(delete_product_legacy),
        )
        .route("/products/vote/{product_name}", post(vote_by_name))
        .route("/products/accept/{id}", post(accept_product))
        .route("/products/reject/{id}", post(reject_product))
        .route("/products/feature/{id}", post(feature_product))
        .route("/products/report/{id}", patch(report_product))
        .route(
            "/product/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/product/{id}/vote", post(vote_by_id))
        .with_state(shared_service)
}

/// List products, newest first
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ProductQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products(query.into()).await?;
    Ok(Json(products))
}

/// List the products submitted by one owner
#[utoipa::path(
    get,
    path = "/products/{key}",
    tag = "Products",
    params(
        ("key" = String, Path, description = "Owner email")
    ),
    responses(
        (status = 200, description = "Products of this owner", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_owner<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(owner_email): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_by_owner(&owner_email).await?;
    Ok(Json(products))
}

/// Submit a new product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = ProductMutation),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductMutation::new("Product created successfully", product)),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/product/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Edit the presentation fields of a product
#[utoipa::path(
    put,
    path = "/product/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductMutation),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<ProductMutation>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(ProductMutation::new(
        "Product updated successfully",
        product,
    )))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/product/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<MessageResponse>> {
    service.delete_product(id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// Delete a product (plural path kept for existing clients)
#[utoipa::path(
    delete,
    path = "/products/{key}",
    tag = "Products",
    params(
        ("key" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product_legacy<R: ProductRepository>(
    state: State<Arc<ProductService<R>>>,
    id: UuidPath,
) -> ProductResult<Json<MessageResponse>> {
    delete_product(state, id).await
}

/// Vote for a product identified by its name
#[utoipa::path(
    post,
    path = "/products/vote/{product_name}",
    tag = "Products",
    params(
        ("product_name" = String, Path, description = "Exact product name")
    ),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote added successfully", body = ProductMutation),
        (status = 400, response = ConflictResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn vote_by_name<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(product_name): Path<String>,
    ValidatedJson(vote): ValidatedJson<VoteRequest>,
) -> ProductResult<Json<ProductMutation>> {
    let product = service
        .cast_vote_by_name(&product_name, &vote.user_email)
        .await?;
    Ok(Json(ProductMutation::new("Vote added successfully", product)))
}

/// Vote for a product identified by its id
#[utoipa::path(
    post,
    path = "/product/{id}/vote",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote added successfully", body = ProductMutation),
        (status = 400, response = ConflictResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn vote_by_id<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(vote): ValidatedJson<VoteRequest>,
) -> ProductResult<Json<ProductMutation>> {
    let product = service.cast_vote(id, &vote.user_email).await?;
    Ok(Json(ProductMutation::new("Vote added successfully", product)))
}

/// Accept a product into the public catalogue
#[utoipa::path(
    post,
    path = "/products/accept/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product accepted successfully", body = ProductMutation),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn accept_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductMutation>> {
    let product = service.accept(id).await?;
    Ok(Json(ProductMutation::new(
        "Product accepted successfully",
        product,
    )))
}

/// Reject a product
#[utoipa::path(
    post,
    path = "/products/reject/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product rejected successfully", body = ProductMutation),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn reject_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductMutation>> {
    let product = service.reject(id).await?;
    Ok(Json(ProductMutation::new(
        "Product rejected successfully",
        product,
    )))
}

/// Mark a product as featured
#[utoipa::path(
    post,
    path = "/products/feature/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product marked as featured successfully", body = ProductMutation),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn feature_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductMutation>> {
    let product = service.feature(id).await?;
    Ok(Json(ProductMutation::new(
        "Product marked as featured successfully",
        product,
    )))
}

/// Report a product for moderator review
#[utoipa::path(
    patch,
    path = "/products/report/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product reported successfully", body = ProductMutation),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn report_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductMutation>> {
    let product = service.report(id).await?;
    Ok(Json(ProductMutation::new(
        "Product reported successfully",
        product,
    )))
}
