//! PostgreSQL-backed `ConnectionHistoryRepository` using Diesel.
//!
//! A save writes the record and its organisation matches in one
//! transaction. Matches point at the pair's earliest record (the anchor)
//! and carry the fresh transaction id; reads regroup them by that id.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ConnectionHistoryRepository, ConnectionHistoryRepositoryError};
use crate::domain::{ConnectionHistoryEntry, DeveloperPair, TransactionId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    ConnectionRecordRow, NewConnectionRecordRow, NewOrganizationMatchRow, OrganizationMatchRow,
};
use super::pool::DbPool;
use super::schema::{connection_records, organization_matches};

/// Diesel-backed connection history.
#[derive(Clone)]
pub struct DieselConnectionHistoryRepository {
    pool: DbPool,
}

impl DieselConnectionHistoryRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn group_matches(rows: Vec<OrganizationMatchRow>) -> HashMap<Uuid, Vec<String>> {
    let mut grouped: HashMap<Uuid, Vec<String>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.transaction_id)
            .or_default()
            .push(row.organization);
    }
    grouped
}

fn into_entries(
    records: Vec<ConnectionRecordRow>,
    mut matches: HashMap<Uuid, Vec<String>>,
) -> Vec<ConnectionHistoryEntry> {
    records
        .into_iter()
        .map(|record| ConnectionHistoryEntry {
            registered_at: record.registered_at,
            connected: record.connected,
            organizations: matches.remove(&record.transaction_id).unwrap_or_default(),
        })
        .collect()
}

#[async_trait]
impl ConnectionHistoryRepository for DieselConnectionHistoryRepository {
    async fn record(
        &self,
        pair: &DeveloperPair,
        connected: bool,
        organizations: &[String],
    ) -> Result<TransactionId, ConnectionHistoryRepositoryError> {
        let transaction_id = TransactionId::random();
        let record = NewConnectionRecordRow {
            transaction_id: *transaction_id.as_uuid(),
            source_developer: pair.source().as_str(),
            target_developer: pair.target().as_str(),
            connected,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let anchor: Option<i64> = connection_records::table
                    .filter(connection_records::source_developer.eq(record.source_developer))
                    .filter(connection_records::target_developer.eq(record.target_developer))
                    .order(connection_records::id.asc())
                    .select(connection_records::id)
                    .first(conn)
                    .await
                    .optional()?;

                let record_id: i64 = diesel::insert_into(connection_records::table)
                    .values(&record)
                    .returning(connection_records::id)
                    .get_result(conn)
                    .await?;

                if !connected || organizations.is_empty() {
                    return Ok(());
                }

                let anchor = anchor.unwrap_or(record_id);
                let matches: Vec<NewOrganizationMatchRow<'_>> = organizations
                    .iter()
                    .map(|organization| NewOrganizationMatchRow {
                        record_id: anchor,
                        transaction_id: record.transaction_id,
                        organization: organization.as_str(),
                    })
                    .collect();
                diesel::insert_into(organization_matches::table)
                    .values(&matches)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)?;

        debug!(%pair, %transaction_id, connected, "connection record stored");
        Ok(transaction_id)
    }

    async fn list_for_pair(
        &self,
        pair: &DeveloperPair,
    ) -> Result<Vec<ConnectionHistoryEntry>, ConnectionHistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let records: Vec<ConnectionRecordRow> = connection_records::table
            .filter(connection_records::source_developer.eq(pair.source().as_str()))
            .filter(connection_records::target_developer.eq(pair.target().as_str()))
            .order(connection_records::id.asc())
            .select(ConnectionRecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if records.is_empty() {
            return Ok(Vec::new());
        }

        let transaction_ids: Vec<Uuid> = records.iter().map(|row| row.transaction_id).collect();
        let matches: Vec<OrganizationMatchRow> = organization_matches::table
            .filter(organization_matches::transaction_id.eq_any(&transaction_ids))
            .order(organization_matches::id.asc())
            .select(OrganizationMatchRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(into_entries(records, group_matches(matches)))
    }
}

#[cfg(test)]
mod tests {
    //! Row regrouping coverage; database behaviour lives in the integration
    //! suite.

    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn record(transaction_id: Uuid, connected: bool, minute: u32) -> ConnectionRecordRow {
        ConnectionRecordRow {
            transaction_id,
            connected,
            registered_at: Utc
                .with_ymd_and_hms(2024, 3, 1, 12, minute, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    fn matched(transaction_id: Uuid, organization: &str) -> OrganizationMatchRow {
        OrganizationMatchRow {
            transaction_id,
            organization: organization.to_owned(),
        }
    }

    #[rstest]
    fn matches_attach_to_their_own_record() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let third = Uuid::new_v4();
        let entries = into_entries(
            vec![
                record(first, true, 0),
                record(second, false, 1),
                record(third, true, 2),
            ],
            group_matches(vec![
                matched(first, "org1"),
                matched(third, "org1"),
                matched(third, "org2"),
            ]),
        );

        let organizations: Vec<Vec<String>> =
            entries.iter().map(|entry| entry.organizations.clone()).collect();
        assert_eq!(
            organizations,
            vec![
                vec!["org1".to_owned()],
                Vec::new(),
                vec!["org1".to_owned(), "org2".to_owned()],
            ]
        );
        assert_eq!(
            entries.iter().map(|entry| entry.connected).collect::<Vec<_>>(),
            vec![true, false, true]
        );
    }

    #[rstest]
    fn orphan_matches_are_ignored() {
        let entries = into_entries(
            vec![record(Uuid::new_v4(), false, 0)],
            group_matches(vec![matched(Uuid::new_v4(), "org1")]),
        );
        assert_eq!(entries.len(), 1);
        assert!(entries.iter().all(|entry| entry.organizations.is_empty()));
    }
}
