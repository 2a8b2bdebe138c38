//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the connectivity and health endpoints together with
//! the schema wrappers from the inbound layer, keeping domain types free of
//! utoipa derives. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it.

use crate::inbound::http::schemas::{
    ConnectedSchema, ConnectionHistoryEntrySchema, ErrorCodeSchema, ErrorMessagesSchema,
    ErrorSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social connectivity API",
        description = "Checks whether two developers share an organisation and follow each other."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::connectivity::realtime_connectivity,
        crate::inbound::http::connectivity::connection_register,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ConnectedSchema,
        ConnectionHistoryEntrySchema,
        ErrorCodeSchema,
        ErrorMessagesSchema,
        ErrorSchema
    )),
    tags(
        (name = "connectivity", description = "Developer connectivity checks and history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
