//! JSON extractor that runs declarative field rules before deserializing.

use axum::{
    extract::{FromRequest, Json, Request},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::rules::{RuleSet, ValidationErrorBody, evaluate};
use crate::errors::AppError;

/// JSON extractor with rule-based validation.
///
/// The raw body is checked against the target type's [`RuleSet`] first.
/// When any rule fails the request is rejected with `400` and an
/// `errors` array listing every failing rule; only a clean body is
/// deserialized into `T`.
///
/// A request with an empty body, or without a JSON content type, is
/// treated as an empty object so every declared rule still runs and
/// reports its failure. Clients sending nothing get the full `errors`
/// list, not a content-type rejection.
///
/// # Example
/// ```ignore
/// async fn create_product(
///     ValidatedBody(payload): ValidatedBody<CreateProduct>,
/// ) -> impl IntoResponse {
///     // payload already passed every declared rule
/// }
/// ```
pub struct ValidatedBody<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedBody<T>
where
    T: DeserializeOwned + RuleSet,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());

        let bytes = axum::body::Bytes::from_request(req, state)
            .await
            .map_err(|e| {
                AppError::BadRequest(format!("Failed to read request body: {}", e)).into_response()
            })?;

        let body = if !is_json || bytes.is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_slice::<Value>(&bytes).map_err(|e| {
                AppError::BadRequest(format!("Invalid JSON body: {}", e)).into_response()
            })?
        };

        let errors = evaluate::<T>(&body);
        if !errors.is_empty() {
            tracing::info!(error_count = errors.len(), "Request body validation failed");
            let response = ValidationErrorBody { errors };
            return Err((StatusCode::BAD_REQUEST, Json(response)).into_response());
        }

        let data = serde_json::from_value::<T>(body).map_err(|e| {
            AppError::BadRequest(format!("Invalid request body: {}", e)).into_response()
        })?;

        Ok(ValidatedBody(data))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or("").trim())
        .is_some_and(|mime| mime == "application/json" || mime.ends_with("+json"))
}
