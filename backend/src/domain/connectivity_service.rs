//! Connectivity aggregation service.
//!
//! Runs the organisation and follow checks, merges their outcomes into one
//! report, and appends successful checks to the connection history.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::follows::FollowConnectivity;
use crate::domain::organizations::OrganizationConnectivity;
use crate::domain::ports::{
    ConnectionHistoryRepository, ConnectivityQuery, FollowGraphSource,
    OrganizationMembershipSource,
};
use crate::domain::{
    ConnectivityReport, DeveloperPair, ErrorMessage, ErrorMessages, OutcomeStatus,
    resolve_error_status,
};

/// Aggregating service implementing [`ConnectivityQuery`].
#[derive(Clone)]
pub struct SocialConnectivityService<O, F, H> {
    organizations: OrganizationConnectivity<O>,
    follows: FollowConnectivity<F>,
    history: Arc<H>,
}

impl<O, F, H> SocialConnectivityService<O, F, H> {
    /// Create the service from its three driven ports.
    pub fn new(memberships: Arc<O>, follow_graph: Arc<F>, history: Arc<H>) -> Self {
        Self {
            organizations: OrganizationConnectivity::new(memberships),
            follows: FollowConnectivity::new(follow_graph),
            history,
        }
    }
}

#[async_trait]
impl<O, F, H> ConnectivityQuery for SocialConnectivityService<O, F, H>
where
    O: OrganizationMembershipSource,
    F: FollowGraphSource,
    H: ConnectionHistoryRepository,
{
    async fn check(&self, pair: &DeveloperPair) -> ConnectivityReport {
        let organization_report = self.organizations.check(pair).await;
        let follow_report = self.follows.check(pair).await;

        let (overlap, mutual) = match (organization_report.result, follow_report.result) {
            (Ok(overlap), Ok(mutual)) => (overlap, mutual),
            (organization_result, follow_result) => {
                let mut errors = organization_result.err().unwrap_or_default();
                errors.append(follow_result.err().unwrap_or_default());
                let status =
                    resolve_error_status(organization_report.status, follow_report.status);
                info!(%pair, %status, errors = errors.len(), "connectivity check failed");
                return ConnectivityReport::errors(errors, status);
            }
        };

        let connected = overlap.connected && mutual;
        let organizations: &[String] = if connected {
            &overlap.organizations
        } else {
            &[]
        };

        match self.history.record(pair, connected, organizations).await {
            Ok(transaction_id) => {
                info!(%pair, connected, %transaction_id, "connectivity check recorded");
                ConnectivityReport::connected(connected)
            }
            Err(err) => {
                error!(%pair, error = %err, "failed to record connectivity check");
                ConnectivityReport::errors(
                    ErrorMessages::single(ErrorMessage::text(err.to_string())),
                    OutcomeStatus::INTERNAL_ERROR,
                )
            }
        }
    }
}

#[cfg(test)]
#[path = "connectivity_service_tests.rs"]
mod tests;
