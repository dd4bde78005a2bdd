//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of framework derives, so the documented shapes of
//! `Error`, `User`, `Schedule` and `Candidate` are registered here with
//! utoipa's `as = ...` aliasing. Each wrapper mirrors the serde output of the
//! type it names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No logged-in user.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Logged in but not allowed to touch the resource.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "schedule name must not be empty")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{field, code, value}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// External identity number, stable across logins.
    #[schema(example = 0)]
    user_id: i64,
    /// Display name from the identity provider.
    #[schema(example = "testuser")]
    username: String,
}

/// OpenAPI schema for [`crate::domain::Schedule`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Schedule)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ScheduleSchema {
    #[schema(example = 1)]
    schedule_id: i64,
    #[schema(example = "テスト予定1")]
    schedule_name: String,
    #[schema(example = "テストメモ1\r\nテストメモ2")]
    memo: String,
    /// Identifier of the creating user.
    #[schema(example = 0)]
    created_by: i64,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::Candidate`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Candidate)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CandidateSchema {
    #[schema(example = 1)]
    candidate_id: i64,
    #[schema(example = "テスト候補1")]
    candidate_name: String,
    #[schema(example = 1)]
    schedule_id: i64,
}
