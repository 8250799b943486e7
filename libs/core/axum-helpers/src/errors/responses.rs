//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed JSON body",
    content_type = "application/json",
    example = json!({
        "code": 1010,
        "error": "INVALID_JSON",
        "message": "Failed to parse the request body as JSON: expected value at line 1 column 1"
    })
)]
pub struct BadRequestJsonResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error - a dependency failed",
    content_type = "application/json",
    example = json!({
        "code": 2001,
        "error": "VECTOR_STORE_ERROR",
        "message": "collection not found[database=default][collection=docs]"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
