//! Integer ID path parameter extractor with automatic validation.

use axum::{
    Json,
    extract::{FromRequestParts, Path},
    http::StatusCode,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::rules::{FieldError, ValidationErrorBody};

/// Extractor for positive integer `id` path parameters.
///
/// Parses the `id` path segment, rejecting anything that is not a
/// positive integer with `400` and an `errors` array in the same shape
/// as body validation failures (with `"location": "params"`).
///
/// # Example
/// ```ignore
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product ID: {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match raw.parse::<i32>() {
            Ok(id) if id > 0 => Ok(IdPath(id)),
            _ => {
                tracing::info!(id = %raw, "Rejected invalid ID path parameter");
                let body = ValidationErrorBody {
                    errors: vec![FieldError::params("id", Value::String(raw), "Invalid ID")],
                };
                Err((StatusCode::BAD_REQUEST, Json(body)).into_response())
            }
        }
    }
}
