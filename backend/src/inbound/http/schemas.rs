//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these wrappers describe their wire
//! shape from the adapter layer instead.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "source developer handle must not be empty")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, such as the offending path segment.
    details: Option<serde_json::Value>,
}

/// Successful connectivity check body.
#[derive(ToSchema)]
#[schema(as = crate::domain::ConnectivityOutcome)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ConnectedSchema {
    /// Whether the developers share an organisation and follow each other.
    connected: bool,
}

/// Aggregated platform or storage errors.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorMessages)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorMessagesSchema {
    /// Distinct messages; plain strings or upstream JSON error bodies.
    #[schema(value_type = Vec<Object>, example = json!(["dev2 is not a valid user in twitter"]))]
    errors: Vec<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ConnectionHistoryEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ConnectionHistoryEntry)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ConnectionHistoryEntrySchema {
    /// Time the check was stored.
    #[schema(value_type = String, format = DateTime, example = "2024-03-01T12:00:00Z")]
    registered_at: String,
    /// Outcome of the check.
    connected: bool,
    /// Organisations shared at check time; omitted when none.
    #[schema(example = json!(["acme"]))]
    organizations: Option<Vec<String>>,
}
