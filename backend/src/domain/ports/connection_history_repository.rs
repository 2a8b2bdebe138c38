//! Port for appending and reading connection history.

use async_trait::async_trait;

use crate::domain::{ConnectionHistoryEntry, DeveloperPair, TransactionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by connection history adapters.
    pub enum ConnectionHistoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "connection history repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "connection history repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } =>
            "connection history conflict: {message}",
    }
}

/// Port for the append-only connection history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionHistoryRepository: Send + Sync {
    /// Append one record, plus one organisation match per entry of
    /// `organizations`, atomically.
    ///
    /// Matches reference the pair's earliest record (or the new record when
    /// it is the first) and the fresh transaction id.
    async fn record(
        &self,
        pair: &DeveloperPair,
        connected: bool,
        organizations: &[String],
    ) -> Result<TransactionId, ConnectionHistoryRepositoryError>;

    /// Every record for the exact ordered pair, oldest first.
    async fn list_for_pair(
        &self,
        pair: &DeveloperPair,
    ) -> Result<Vec<ConnectionHistoryEntry>, ConnectionHistoryRepositoryError>;
}

/// Fixture that accepts writes and remembers nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureConnectionHistoryRepository;

#[async_trait]
impl ConnectionHistoryRepository for FixtureConnectionHistoryRepository {
    async fn record(
        &self,
        _pair: &DeveloperPair,
        _connected: bool,
        _organizations: &[String],
    ) -> Result<TransactionId, ConnectionHistoryRepositoryError> {
        Ok(TransactionId::random())
    }

    async fn list_for_pair(
        &self,
        _pair: &DeveloperPair,
    ) -> Result<Vec<ConnectionHistoryEntry>, ConnectionHistoryRepositoryError> {
        Ok(Vec::new())
    }
}
