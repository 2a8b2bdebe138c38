//! Driving port for reading the connection history of a pair.

use async_trait::async_trait;

use crate::domain::{DeveloperPair, HistoryReport};

/// Driving port returning stored checks for a pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionHistoryQuery: Send + Sync {
    /// Stored checks for the ordered pair, oldest first.
    async fn history(&self, pair: &DeveloperPair) -> HistoryReport;
}

/// Fixture with an empty history.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureConnectionHistoryQuery;

#[async_trait]
impl ConnectionHistoryQuery for FixtureConnectionHistoryQuery {
    async fn history(&self, _pair: &DeveloperPair) -> HistoryReport {
        HistoryReport::entries(Vec::new())
    }
}
