//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Huntify API",
        version = "0.1.0",
        description = "Product discovery backend: submissions, votes, moderation and community features",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    )
)]
struct HuntifyDoc;

/// Combined OpenAPI documentation for all APIs
///
/// Every domain serves its routes from the root, so the documents are merged
/// rather than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = HuntifyDoc::openapi();
        doc.merge(domain_products::ApiDoc::openapi());
        doc.merge(domain_users::ApiDoc::openapi());
        doc.merge(domain_community::ApiDoc::openapi());
        doc.merge(crate::api::auth::ApiDoc::openapi());
        doc
    }
}
