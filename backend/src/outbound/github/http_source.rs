//! Reqwest-backed organisation membership adapter.
//!
//! This adapter owns transport details only: URL construction, request
//! headers, status classification, and JSON decoding into organisation
//! logins. Each call sends its own request through the shared client pool,
//! so concurrent lookups never share connection state.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::{OrganizationDto, into_logins};
use crate::domain::ports::{MembershipLookup, MembershipSourceError, OrganizationMembershipSource};
use crate::domain::{DeveloperHandle, OutcomeStatus};

const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("social-connected/", env!("CARGO_PKG_VERSION"));

/// Organisation source performing `GET {base}/users/{login}/orgs`.
pub struct GithubHttpSource {
    client: Client,
    base_url: Url,
}

impl GithubHttpSource {
    /// Build an adapter; `timeout` bounds each request when set.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }
}

#[async_trait]
impl OrganizationMembershipSource for GithubHttpSource {
    async fn fetch_memberships(
        &self,
        developer: &DeveloperHandle,
    ) -> Result<MembershipLookup, MembershipSourceError> {
        let url = organizations_endpoint(&self.base_url, developer.as_str())?;
        debug!(%developer, %url, "fetching organisation memberships");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_GITHUB_V3)
            .send()
            .await
            .map_err(|error| MembershipSourceError::transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| MembershipSourceError::transport(error.to_string()))?;
        classify_response(developer, status, body.as_ref())
    }
}

/// Build `{base}/users/{login}/orgs`, rejecting blank logins.
fn organizations_endpoint(base_url: &Url, login: &str) -> Result<Url, MembershipSourceError> {
    if login.trim().is_empty() {
        return Err(MembershipSourceError::invalid_request(
            "developer login must not be empty",
        ));
    }
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            MembershipSourceError::invalid_request(format!("{base_url} cannot be a base URL"))
        })?
        .pop_if_empty()
        .extend(["users", login, "orgs"]);
    Ok(url)
}

fn classify_response(
    developer: &DeveloperHandle,
    status: StatusCode,
    body: &[u8],
) -> Result<MembershipLookup, MembershipSourceError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(MembershipLookup::UnknownDeveloper);
    }
    if !status.is_success() {
        warn!(%developer, status = status.as_u16(), "organisation lookup rejected");
        return Ok(MembershipLookup::Rejected {
            status: OutcomeStatus::from_u16(status.as_u16()),
            payload: body.to_vec(),
        });
    }
    let organizations: Vec<OrganizationDto> = serde_json::from_slice(body).map_err(|error| {
        MembershipSourceError::decode(format!("invalid organisation listing: {error}"))
    })?;
    Ok(MembershipLookup::Organizations(into_logins(organizations)))
}
