//! HTTP handlers for the Products API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedBody,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, DeleteProductResponse, Product, ProductListResponse, ProductResponse,
    UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        toggle_availability,
        delete_product,
    ),
    components(
        schemas(
            Product,
            CreateProduct,
            UpdateProduct,
            ProductResponse,
            ProductListResponse,
            DeleteProductResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(toggle_availability)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "List of products", body = ProductListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<ProductListResponse>> {
    let products = service.list_products().await?;
    Ok(Json(ProductListResponse { data: products }))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedBody(input): ValidatedBody<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse { data: product })))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(ProductResponse { data: product }))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedBody(input): ValidatedBody<UpdateProduct>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(ProductResponse { data: product }))
}

/// Toggle a product's availability
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Availability toggled", body = ProductResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn toggle_availability<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.toggle_availability(id).await?;
    Ok(Json(ProductResponse { data: product }))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeleteProductResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<DeleteProductResponse>> {
    service.delete_product(id).await?;
    Ok(Json(DeleteProductResponse {
        data: "Product deleted".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use chrono::Utc;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn sample_product(id: i32) -> Product {
        Product {
            id,
            name: "Curved Monitor".to_string(),
            price: 300.0,
            availability: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_app(repo: MockProductRepository) -> Router {
        let service = ProductService::new(repo);
        Router::new().nest("/products", router(service))
    }

    async fn send(
        app: Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_list_products_returns_data_array() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .returning(|| Ok(vec![sample_product(1), sample_product(2)]));

        let (status, body) = send(test_app(repo), Method::GET, "/products", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_list_products_responds_with_json_content_type() {
        let mut repo = MockProductRepository::new();
        repo.expect_list().returning(|| Ok(vec![sample_product(1)]));

        let request = Request::builder()
            .method(Method::GET)
            .uri("/products")
            .body(Body::empty())
            .unwrap();
        let response = test_app(repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.contains("application/json"));
    }

    #[tokio::test]
    async fn test_get_product_returns_the_record() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(sample_product(id))));

        let (status, body) = send(test_app(repo), Method::GET, "/products/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["data"]["name"], "Curved Monitor");
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let (status, body) = send(test_app(repo), Method::GET, "/products/2000", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NotFound");
        assert_eq!(body["message"], "Product not found");
    }

    #[tokio::test]
    async fn test_get_with_invalid_id_returns_400() {
        let repo = MockProductRepository::new();

        let (status, body) =
            send(test_app(repo), Method::GET, "/products/not-valid-url", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["msg"], "Invalid ID");
        assert_eq!(errors[0]["location"], "params");
    }

    #[tokio::test]
    async fn test_create_with_empty_body_reports_four_errors() {
        let repo = MockProductRepository::new();

        let (status, body) =
            send(test_app(repo), Method::POST, "/products", Some(json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_create_without_body_reports_four_errors() {
        // No body and no content type behaves like an empty object
        let repo = MockProductRepository::new();

        let (status, body) = send(test_app(repo), Method::POST, "/products", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_create_with_zero_price_reports_one_error() {
        let repo = MockProductRepository::new();

        let (status, body) = send(
            test_app(repo),
            Method::POST,
            "/products",
            Some(json!({"name": "Curved Monitor", "price": 0})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_with_text_price_reports_two_errors() {
        let repo = MockProductRepository::new();

        let (status, body) = send(
            test_app(repo),
            Method::POST,
            "/products",
            Some(json!({"name": "Curved Monitor", "price": "Hola"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_valid_product_returns_201() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().returning(|input| {
            let mut product = sample_product(1);
            product.name = input.name;
            product.price = input.price;
            Ok(product)
        });

        let (status, body) = send(
            test_app(repo),
            Method::POST,
            "/products",
            Some(json!({"name": "Mouse - Testing", "price": 50})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["name"], "Mouse - Testing");
        assert_eq!(body["data"]["price"], 50.0);
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_update_with_invalid_id_returns_400() {
        let repo = MockProductRepository::new();

        let (status, body) = send(
            test_app(repo),
            Method::PUT,
            "/products/not-valid-url",
            Some(json!({"name": "Monitor", "price": 300, "availability": true})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert_eq!(body["errors"][0]["msg"], "Invalid ID");
    }

    #[tokio::test]
    async fn test_update_with_empty_body_reports_all_errors() {
        let repo = MockProductRepository::new();

        let (status, body) =
            send(test_app(repo), Method::PUT, "/products/1", Some(json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_update_with_negative_price_reports_one_error() {
        let repo = MockProductRepository::new();

        let (status, body) = send(
            test_app(repo),
            Method::PUT,
            "/products/1",
            Some(json!({"name": "Monitor", "price": -300, "availability": true})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert_eq!(body["errors"][0]["msg"], "Price must be greater than zero");
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let (status, body) = send(
            test_app(repo),
            Method::PUT,
            "/products/2000",
            Some(json!({"name": "Monitor", "price": 300, "availability": true})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product not found");
    }

    #[tokio::test]
    async fn test_update_valid_product_returns_200() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(sample_product(id))));
        repo.expect_update().returning(|id, input| {
            Ok(Product {
                id,
                name: input.name,
                price: input.price,
                availability: input.availability,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

        let (status, body) = send(
            test_app(repo),
            Method::PUT,
            "/products/1",
            Some(json!({"name": "Updated Monitor", "price": 350, "availability": false})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Updated Monitor");
        assert_eq!(body["data"]["availability"], false);
    }

    #[tokio::test]
    async fn test_patch_missing_product_returns_404() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let (status, body) = send(test_app(repo), Method::PATCH, "/products/2000", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NotFound");
    }

    #[tokio::test]
    async fn test_patch_flips_availability() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(sample_product(id))));
        repo.expect_update()
            .withf(|_, input| !input.availability)
            .returning(|id, input| {
                let mut product = sample_product(id);
                product.availability = input.availability;
                Ok(product)
            });

        let (status, body) = send(test_app(repo), Method::PATCH, "/products/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["availability"], false);
    }

    #[tokio::test]
    async fn test_delete_with_invalid_id_returns_400() {
        let repo = MockProductRepository::new();

        let (status, body) = send(
            test_app(repo),
            Method::DELETE,
            "/products/not-valid-url",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["msg"], "Invalid ID");
    }

    #[tokio::test]
    async fn test_delete_missing_product_returns_404() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let (status, body) = send(test_app(repo), Method::DELETE, "/products/2000", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product not found");
    }

    #[tokio::test]
    async fn test_delete_returns_confirmation() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(sample_product(id))));
        repo.expect_delete().returning(|_| Ok(true));

        let (status, body) = send(test_app(repo), Method::DELETE, "/products/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "Product deleted");
    }
}
