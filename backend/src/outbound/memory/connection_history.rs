//! Process-local `ConnectionHistoryRepository`.
//!
//! Mirrors the PostgreSQL adapter's semantics, anchor reuse included, so the
//! service behaves the same with or without a database. State is lost on
//! restart.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::ports::{ConnectionHistoryRepository, ConnectionHistoryRepositoryError};
use crate::domain::{ConnectionHistoryEntry, DeveloperPair, TransactionId};

#[derive(Debug, Clone)]
struct StoredRecord {
    id: u64,
    transaction_id: TransactionId,
    pair: DeveloperPair,
    connected: bool,
    registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredMatch {
    record_id: u64,
    transaction_id: TransactionId,
    organization: String,
}

#[derive(Debug, Default)]
struct HistoryState {
    next_id: u64,
    records: Vec<StoredRecord>,
    matches: Vec<StoredMatch>,
}

impl HistoryState {
    fn anchor_for(&self, pair: &DeveloperPair) -> Option<u64> {
        self.records
            .iter()
            .find(|record| &record.pair == pair)
            .map(|record| record.id)
    }

    fn insert_record(&mut self, pair: &DeveloperPair, connected: bool) -> StoredRecord {
        self.next_id += 1;
        let record = StoredRecord {
            id: self.next_id,
            transaction_id: TransactionId::random(),
            pair: pair.clone(),
            connected,
            registered_at: Utc::now(),
        };
        self.records.push(record.clone());
        record
    }

    fn insert_match(&mut self, candidate: StoredMatch) {
        let duplicate = self.matches.iter().any(|existing| {
            existing.transaction_id == candidate.transaction_id
                && existing.organization == candidate.organization
        });
        if !duplicate {
            self.matches.push(candidate);
        }
    }

    fn organizations_for(&self, transaction_id: TransactionId) -> Vec<String> {
        self.matches
            .iter()
            .filter(|stored| stored.transaction_id == transaction_id)
            .map(|stored| stored.organization.clone())
            .collect()
    }
}

/// In-memory connection history guarded by a mutex.
#[derive(Debug, Default)]
pub struct InMemoryConnectionHistoryRepository {
    state: Mutex<HistoryState>,
}

impl InMemoryConnectionHistoryRepository {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> ConnectionHistoryRepositoryError {
    ConnectionHistoryRepositoryError::query("connection history state poisoned")
}

#[async_trait]
impl ConnectionHistoryRepository for InMemoryConnectionHistoryRepository {
    async fn record(
        &self,
        pair: &DeveloperPair,
        connected: bool,
        organizations: &[String],
    ) -> Result<TransactionId, ConnectionHistoryRepositoryError> {
        let mut state = self.state.lock().map_err(|_| poisoned())?;
        let anchor = state.anchor_for(pair);
        let record = state.insert_record(pair, connected);
        if connected {
            let record_id = anchor.unwrap_or(record.id);
            for organization in organizations {
                state.insert_match(StoredMatch {
                    record_id,
                    transaction_id: record.transaction_id,
                    organization: organization.clone(),
                });
            }
        }
        debug!(
            %pair,
            transaction_id = %record.transaction_id,
            connected,
            "connection record stored"
        );
        Ok(record.transaction_id)
    }

    async fn list_for_pair(
        &self,
        pair: &DeveloperPair,
    ) -> Result<Vec<ConnectionHistoryEntry>, ConnectionHistoryRepositoryError> {
        let state = self.state.lock().map_err(|_| poisoned())?;
        Ok(state
            .records
            .iter()
            .filter(|record| &record.pair == pair)
            .map(|record| ConnectionHistoryEntry {
                registered_at: record.registered_at,
                connected: record.connected,
                organizations: state.organizations_for(record.transaction_id),
            })
            .collect())
    }
}
