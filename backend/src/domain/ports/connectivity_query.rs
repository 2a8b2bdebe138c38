//! Driving port for real-time connectivity checks.
//!
//! The check never fails as a call: platform and persistence failures are
//! part of the returned [`ConnectivityReport`].

use async_trait::async_trait;

use crate::domain::{ConnectivityReport, DeveloperPair};

/// Driving port checking whether two developers are connected.
///
/// # Examples
///
/// ```rust,no_run
/// use social_connected::domain::DeveloperPair;
/// use social_connected::domain::ports::{ConnectivityQuery, FixtureConnectivityQuery};
///
/// # async fn example() {
/// let pair = DeveloperPair::parse("dev1", "dev2").expect("valid pair");
/// let report = FixtureConnectivityQuery.check(&pair).await;
/// assert!(report.status.is_success());
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectivityQuery: Send + Sync {
    /// Check both platforms and record the outcome.
    async fn check(&self, pair: &DeveloperPair) -> ConnectivityReport;
}

/// Fixture reporting every pair as connected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureConnectivityQuery;

#[async_trait]
impl ConnectivityQuery for FixtureConnectivityQuery {
    async fn check(&self, _pair: &DeveloperPair) -> ConnectivityReport {
        ConnectivityReport::connected(true)
    }
}
