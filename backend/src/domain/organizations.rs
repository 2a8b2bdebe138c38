//! Organisation-membership connectivity check.
//!
//! Both developers are looked up concurrently and joined before the overlap
//! is evaluated; neither lookup's failure cancels the other.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{MembershipLookup, MembershipSourceError, OrganizationMembershipSource};
use crate::domain::{
    DeveloperHandle, DeveloperPair, ErrorMessage, ErrorMessages, OrganizationOverlap,
    OrganizationReport, OutcomeStatus,
};

/// Platform name used in not-found messages.
const PLATFORM: &str = "github";

/// Result of one membership lookup once platform answers are normalised.
type MembershipOutcome = Result<Vec<String>, (ErrorMessage, OutcomeStatus)>;

fn normalise(
    developer: &DeveloperHandle,
    lookup: Result<MembershipLookup, MembershipSourceError>,
) -> MembershipOutcome {
    match lookup {
        Ok(MembershipLookup::Organizations(organizations)) => Ok(organizations),
        Ok(MembershipLookup::UnknownDeveloper) => Err((
            ErrorMessage::text(format!("{developer} is not a valid user in {PLATFORM}")),
            OutcomeStatus::NOT_FOUND,
        )),
        Ok(MembershipLookup::Rejected { status, payload }) => {
            Err((ErrorMessage::payload(&payload), status))
        }
        Err(error) => {
            warn!(developer = %developer, %error, "membership lookup failed");
            Err((ErrorMessage::text(error.to_string()), error.status()))
        }
    }
}

/// Checks whether two developers share an organisation.
#[derive(Clone)]
pub struct OrganizationConnectivity<S> {
    source: Arc<S>,
}

impl<S> OrganizationConnectivity<S> {
    /// Create a checker over a membership source.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

impl<S> OrganizationConnectivity<S>
where
    S: OrganizationMembershipSource,
{
    /// Look up both developers and compare their memberships.
    ///
    /// Errors are collected target first, each distinct message once. The
    /// status is the one of the first failing lookup in that order.
    pub async fn check(&self, pair: &DeveloperPair) -> OrganizationReport {
        let (target_lookup, source_lookup) = tokio::join!(
            self.source.fetch_memberships(pair.target()),
            self.source.fetch_memberships(pair.source()),
        );
        let target = normalise(pair.target(), target_lookup);
        let source = normalise(pair.source(), source_lookup);

        match (target, source) {
            (Ok(target_orgs), Ok(source_orgs)) => {
                let overlap = OrganizationOverlap::between(&target_orgs, &source_orgs);
                debug!(
                    source = %pair.source(),
                    target = %pair.target(),
                    connected = overlap.connected,
                    shared = overlap.organizations.len(),
                    "organisation overlap evaluated"
                );
                OrganizationReport::success(overlap, OutcomeStatus::OK)
            }
            (target, source) => {
                let mut errors = ErrorMessages::new();
                let mut status = None;
                for (message, lookup_status) in [target.err(), source.err()].into_iter().flatten() {
                    errors.push(message);
                    status.get_or_insert(lookup_status);
                }
                OrganizationReport::failure(errors, status.unwrap_or(OutcomeStatus::BAD_REQUEST))
            }
        }
    }
}
