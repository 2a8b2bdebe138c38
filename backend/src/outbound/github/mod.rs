//! Organisation platform outbound adapter.
//!
//! Provides a thin HTTP implementation of the
//! `OrganizationMembershipSource` port against a GitHub-compatible API.

mod dto;
mod http_source;

pub use http_source::GithubHttpSource;
