//! Connectivity HTTP handlers.
//!
//! ```text
//! GET /connected/realtime/{source}/{target}
//! GET /connected/register/{source}/{target}
//! ```
//!
//! Both bodies carry their own status: the resolved platform status for a
//! check, 200 or 500 for a history read.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use utoipa::IntoParams;

use crate::domain::{DeveloperHandle, DeveloperPair, Error, OutcomeStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ConnectedSchema, ConnectionHistoryEntrySchema, ErrorMessagesSchema, ErrorSchema,
};
use crate::inbound::http::state::HttpState;

/// Developer handles taken from the request path.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct DeveloperPairPath {
    /// Developer whose point of view the follow check takes.
    pub source: String,
    /// Developer being compared against.
    pub target: String,
}

fn parse_handle(raw: String, field: &str) -> Result<DeveloperHandle, Error> {
    DeveloperHandle::new(raw).map_err(|err| {
        Error::invalid_request(format!("{field} {err}")).with_details(json!({ "field": field }))
    })
}

impl TryFrom<DeveloperPairPath> for DeveloperPair {
    type Error = Error;

    fn try_from(path: DeveloperPairPath) -> Result<Self, Self::Error> {
        let source = parse_handle(path.source, "source")?;
        let target = parse_handle(path.target, "target")?;
        Ok(Self::new(source, target))
    }
}

fn status_of(status: OutcomeStatus) -> StatusCode {
    StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Check whether two developers are connected right now.
///
/// Connected means they share at least one organisation and follow each
/// other. Every successful check is appended to the pair's history.
#[utoipa::path(
    get,
    path = "/connected/realtime/{source}/{target}",
    params(DeveloperPairPath),
    responses(
        (status = 200, description = "Connectivity decided", body = ConnectedSchema),
        (status = 400, description = "Blank developer handle", body = ErrorSchema),
        (status = 404, description = "Unknown developer on a platform", body = ErrorMessagesSchema),
        (status = 429, description = "Platform rate limit", body = ErrorMessagesSchema),
        (status = 500, description = "History could not be stored", body = ErrorMessagesSchema)
    ),
    tags = ["connectivity"],
    operation_id = "checkConnectivity"
)]
#[get("/connected/realtime/{source}/{target}")]
pub async fn realtime_connectivity(
    state: web::Data<HttpState>,
    path: web::Path<DeveloperPairPath>,
) -> ApiResult<HttpResponse> {
    let pair = DeveloperPair::try_from(path.into_inner())?;
    let report = state.connectivity.check(&pair).await;
    debug!(%pair, status = %report.status, "connectivity check answered");
    Ok(HttpResponse::build(status_of(report.status)).json(report.outcome))
}

/// Stored connectivity checks for the ordered pair, oldest first.
#[utoipa::path(
    get,
    path = "/connected/register/{source}/{target}",
    params(DeveloperPairPath),
    responses(
        (status = 200, description = "History for the pair", body = [ConnectionHistoryEntrySchema]),
        (status = 400, description = "Blank developer handle", body = ErrorSchema),
        (status = 500, description = "History could not be read", body = ErrorMessagesSchema)
    ),
    tags = ["connectivity"],
    operation_id = "connectionHistory"
)]
#[get("/connected/register/{source}/{target}")]
pub async fn connection_register(
    state: web::Data<HttpState>,
    path: web::Path<DeveloperPairPath>,
) -> ApiResult<HttpResponse> {
    let pair = DeveloperPair::try_from(path.into_inner())?;
    let report = state.history.history(&pair).await;
    Ok(HttpResponse::build(status_of(report.status)).json(report.outcome))
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
