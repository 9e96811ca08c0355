//! OpenAPI schemas for domain types.
//!
//! The domain does not derive `ToSchema`; these mirrors register the error
//! envelope under the domain type's name.

use utoipa::ToSchema;

/// Schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed body or failed field validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Missing, invalid or expired token; also bad login credentials.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The caller does not own the record. Served with status 401.
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    /// Username already taken.
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "only read by utoipa")]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "Title is required")]
    message: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Validation failures as `{"errors": [{"field", "code", "message"}]}`.
    #[schema(example = json!({"errors": [{
        "field": "title",
        "code": "required",
        "message": "Title is required"
    }]}))]
    details: Option<serde_json::Value>,
}
