//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates, so common set-up lives here
//! and each suite pulls it in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{drop_table, provision_migrated_database, shared_cluster_handle};
