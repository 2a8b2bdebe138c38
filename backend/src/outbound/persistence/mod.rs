//! PostgreSQL persistence adapter.
//!
//! Diesel with `diesel-async` and a bb8 pool back the
//! `ConnectionHistoryRepository` port. Row structs and table definitions
//! stay private to this module.

mod diesel_connection_history_repository;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_connection_history_repository::DieselConnectionHistoryRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
