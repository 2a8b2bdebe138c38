//! Diesel and pool error mapping for the connection history adapter.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ConnectionHistoryRepositoryError;

use super::pool::PoolError;

/// Pool failures are connection failures.
pub(super) fn map_pool_error(error: PoolError) -> ConnectionHistoryRepositoryError {
    ConnectionHistoryRepositoryError::connection(error.into_message())
}

/// Map Diesel failures onto repository errors.
///
/// Unique violations become conflicts; a closed connection is a connection
/// failure; everything else is a query failure. Driver messages are logged
/// at debug and not propagated.
pub(super) fn map_diesel_error(error: DieselError) -> ConnectionHistoryRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            ConnectionHistoryRepositoryError::conflict(
                info.constraint_name()
                    .map_or_else(|| "unique constraint violated".to_owned(), |name| {
                        format!("unique constraint {name} violated")
                    }),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ConnectionHistoryRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => ConnectionHistoryRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            ConnectionHistoryRepositoryError::query("database query error")
        }
        _ => ConnectionHistoryRepositoryError::query("database error"),
    }
}
