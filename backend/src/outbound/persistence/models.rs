//! Diesel row structs. Never exposed outside the persistence adapter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{connection_records, organization_matches};

/// Row read from `connection_records`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = connection_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ConnectionRecordRow {
    pub transaction_id: Uuid,
    pub connected: bool,
    pub registered_at: DateTime<Utc>,
}

/// Insertable record; `id` and `registered_at` come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = connection_records)]
pub(crate) struct NewConnectionRecordRow<'a> {
    pub transaction_id: Uuid,
    pub source_developer: &'a str,
    pub target_developer: &'a str,
    pub connected: bool,
}

/// Row read from `organization_matches`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = organization_matches)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrganizationMatchRow {
    pub transaction_id: Uuid,
    pub organization: String,
}

/// Insertable organisation match.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = organization_matches)]
pub(crate) struct NewOrganizationMatchRow<'a> {
    pub record_id: i64,
    pub transaction_id: Uuid,
    pub organization: &'a str,
}
