//! Embedded PostgreSQL helpers for integration tests.
//!
//! Each test gets its own temporary database on the shared cluster, with the
//! service migrations applied through a synchronous Diesel connection.

use diesel::pg::PgConnection;
use diesel::{Connection, RunQueryDsl};
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::{BootstrapResult, ClusterHandle, TemporaryDatabase};
use social_connected::outbound::persistence::MIGRATIONS;

const SHARED_CLUSTER_RETRIES: usize = 3;
const SHARED_CLUSTER_RETRY_DELAY: std::time::Duration = std::time::Duration::from_millis(500);

/// Returns the process-wide embedded cluster, retrying transient start-up
/// failures.
pub fn shared_cluster_handle() -> BootstrapResult<&'static ClusterHandle> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) => {
                if attempt >= SHARED_CLUSTER_RETRIES {
                    return Err(error);
                }
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Creates a fresh database and applies every migration to it.
pub fn provision_migrated_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let database = cluster
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4().simple()).as_str())
        .map_err(|err| format!("create temporary database: {err:?}"))?;
    let url = database.url().to_string();
    migrate_schema(url.as_str())?;
    Ok(database)
}

/// Runs all pending Diesel migrations against `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

/// Drops `table` (and its dependants) to simulate schema loss.
pub fn drop_table(url: &str, table: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    diesel::sql_query(format!("DROP TABLE IF EXISTS {table} CASCADE"))
        .execute(&mut conn)
        .map_err(|err| format!("drop {table}: {err}"))?;
    Ok(())
}
