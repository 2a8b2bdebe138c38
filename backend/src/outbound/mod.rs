//! Outbound adapters implementing the domain's driven ports.
//!
//! - **github**: organisation memberships over the GitHub REST API
//! - **twitter**: user existence and follow relationships over Twitter v1.1
//! - **persistence**: PostgreSQL connection history using Diesel
//! - **memory**: process-local connection history for database-less runs
//!
//! Adapters translate between domain types and wire or storage formats and
//! hold no business rules.

pub mod github;
pub mod memory;
pub mod persistence;
pub mod twitter;
