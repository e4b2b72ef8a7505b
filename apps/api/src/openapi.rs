use utoipa::OpenApi;

/// Top-level OpenAPI document served by Swagger UI at /docs.
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Products REST API",
        version = "0.1.0",
        description = "API documentation for the product catalog"
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc)
    )
)]
pub struct ApiDoc;
