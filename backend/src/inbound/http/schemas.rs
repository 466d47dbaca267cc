//! OpenAPI stand-ins for domain error types.
//!
//! The domain does not derive `ToSchema`; these wrappers describe the same
//! wire shape and are registered under the domain type names.

use utoipa::ToSchema;

/// Error code carried in every error payload.
#[derive(ToSchema, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Duplicate email, duplicate or absent participation, or a field that
    /// failed validation. HTTP 400.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Unparseable input such as a non-numeric id or a broken JSON body.
    /// HTTP 400.
    #[schema(rename = "malformed_request")]
    MalformedRequest,
    /// An authenticated caller acting on someone else's account. HTTP 401.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Bad credentials, or a missing or unusable bearer token. HTTP 401.
    #[schema(rename = "authentication_failed")]
    AuthenticationFailed,
    /// Session, teacher or user absent. HTTP 404.
    #[schema(rename = "not_found")]
    NotFound,
    /// The database cannot be reached. HTTP 503.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Redacted server failure. HTTP 500.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error payload returned by every failing endpoint.
#[derive(ToSchema, serde::Serialize)]
#[serde(rename_all = "camelCase")]
#[schema(as = crate::domain::Error)]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "Error: Email is already taken!")]
    message: String,
    /// Same value as the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Extra context, such as `{"field": "email", "code": "invalid_field"}`.
    details: Option<serde_json::Value>,
}
