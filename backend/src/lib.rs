//! Social connectivity service library.
//!
//! Decides whether two developers are connected across an organisation
//! platform and a follow platform, and keeps the history of those checks.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
