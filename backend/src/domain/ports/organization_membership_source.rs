//! Driven port for reading a developer's organisation memberships.
//!
//! The adapter answers with what the platform said: a membership list, an
//! unknown developer, or a refusal carrying the raw payload. Only failures
//! that prevented an answer (transport, undecodable body, invalid request)
//! are errors.

use async_trait::async_trait;

use crate::domain::{DeveloperHandle, OutcomeStatus};

use super::define_port_error;

/// Answer from the organisation platform for one developer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipLookup {
    /// Organisation logins in the order the platform listed them.
    Organizations(Vec<String>),
    /// The platform does not know the developer.
    UnknownDeveloper,
    /// The platform refused the lookup; `payload` is the raw body.
    Rejected {
        status: OutcomeStatus,
        payload: Vec<u8>,
    },
}

define_port_error! {
    /// Errors raised by organisation membership adapters.
    pub enum MembershipSourceError {
        /// The request could not be built, for example from a blank login.
        InvalidRequest { message: String } =>
            "membership request invalid: {message}",
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "membership transport failed: {message}",
        /// A success response could not be decoded.
        Decode { message: String } =>
            "membership response decode failed: {message}",
    }
}

impl MembershipSourceError {
    /// Status reported for this failure.
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::InvalidRequest { .. } => OutcomeStatus::BAD_REQUEST,
            Self::Transport { .. } => OutcomeStatus::SERVICE_UNAVAILABLE,
            Self::Decode { .. } => OutcomeStatus::BAD_GATEWAY,
        }
    }
}

/// Port for fetching organisation memberships.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationMembershipSource: Send + Sync {
    /// Fetch the organisations `developer` belongs to.
    async fn fetch_memberships(
        &self,
        developer: &DeveloperHandle,
    ) -> Result<MembershipLookup, MembershipSourceError>;
}

/// Fixture where every developer belongs to no organisation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureOrganizationMembershipSource;

#[async_trait]
impl OrganizationMembershipSource for FixtureOrganizationMembershipSource {
    async fn fetch_memberships(
        &self,
        _developer: &DeveloperHandle,
    ) -> Result<MembershipLookup, MembershipSourceError> {
        Ok(MembershipLookup::Organizations(Vec::new()))
    }
}
