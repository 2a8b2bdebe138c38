//! Domain primitives, services, and ports.
//!
//! Purpose: decide whether two developers are connected across an
//! organisation platform and a follow platform, and keep an append-only
//! history of those decisions. Nothing here depends on HTTP clients,
//! databases, or web frameworks; adapters plug in through [`ports`].
//!
//! Public surface:
//! - `DeveloperHandle` / `DeveloperPair`: validated identities under test.
//! - `ConnectivityReport` / `HistoryReport`: serialisable outcomes plus status.
//! - `SocialConnectivityService` / `ConnectionHistoryService`: driving port
//!   implementations.
//! - `Error` / `ErrorCode`: request-level failures for inbound adapters.

pub mod connectivity;
pub mod connectivity_service;
pub mod developer;
pub mod error;
pub mod follows;
pub mod history;
pub mod history_service;
pub mod organizations;
pub mod ports;
pub mod trace_id;

pub use self::connectivity::{
    ConnectivityOutcome, ConnectivityReport, ErrorMessage, ErrorMessages, FollowReport,
    OrganizationOverlap, OrganizationReport, OutcomeStatus, PlatformReport, resolve_error_status,
};
pub use self::connectivity_service::SocialConnectivityService;
pub use self::developer::{
    DEVELOPER_HANDLE_MAX, DeveloperHandle, DeveloperPair, DeveloperValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::follows::FollowConnectivity;
pub use self::history::{ConnectionHistoryEntry, HistoryOutcome, HistoryReport, TransactionId};
pub use self::history_service::ConnectionHistoryService;
pub use self::organizations::OrganizationConnectivity;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
