//! DTOs for decoding organisation listings.

use serde::Deserialize;

/// One entry of `GET /users/{login}/orgs`.
///
/// The platform sends many more fields; only the login identifies an
/// organisation for overlap purposes.
#[derive(Debug, Deserialize)]
pub(super) struct OrganizationDto {
    pub(super) login: String,
}

pub(super) fn into_logins(organizations: Vec<OrganizationDto>) -> Vec<String> {
    organizations.into_iter().map(|org| org.login).collect()
}
