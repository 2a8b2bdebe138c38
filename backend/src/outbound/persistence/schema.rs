//! Diesel table definitions.
//!
//! Kept in step with `backend/migrations` by hand; `diesel print-schema`
//! against a migrated database produces the same tables.

diesel::table! {
    /// One row per stored connectivity check. Append-only.
    connection_records (id) {
        /// Insertion order; history is read back by this key.
        id -> Int8,
        /// Unique per record; ties the record to its organisation matches.
        transaction_id -> Uuid,
        source_developer -> Varchar,
        target_developer -> Varchar,
        connected -> Bool,
        /// Defaults to the write time.
        registered_at -> Timestamptz,
    }
}

diesel::table! {
    /// Organisations shared by a connected pair at check time.
    organization_matches (id) {
        id -> Int8,
        /// Earliest record of the pair when the match was written.
        record_id -> Int8,
        /// Record that produced this match.
        transaction_id -> Uuid,
        organization -> Varchar,
    }
}

diesel::joinable!(organization_matches -> connection_records (record_id));

diesel::allow_tables_to_appear_in_same_query!(connection_records, organization_matches);
