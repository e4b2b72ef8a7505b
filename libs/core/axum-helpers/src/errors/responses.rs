//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
use crate::extractors::rules::ValidationErrorBody;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "error": "InternalServerError",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "type": "field",
            "value": "",
            "msg": "Product name cannot be empty",
            "path": "name",
            "location": "body"
        }]
    })
)]
pub struct BadRequestValidationResponse(pub ValidationErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid ID",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "type": "field",
            "value": "not-valid-id",
            "msg": "Invalid ID",
            "path": "id",
            "location": "params"
        }]
    })
)]
pub struct BadRequestIdResponse(pub ValidationErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "error": "NotFound",
        "message": "Product not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
