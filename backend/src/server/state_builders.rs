//! Builders wiring adapters into the HTTP state.

use std::io;
use std::sync::Arc;

use social_connected::domain::ports::{
    ConnectionHistoryRepository, FollowGraphSource, OrganizationMembershipSource,
};
use social_connected::domain::{ConnectionHistoryService, SocialConnectivityService};
use social_connected::inbound::http::state::HttpState;
use social_connected::outbound::github::GithubHttpSource;
use social_connected::outbound::memory::InMemoryConnectionHistoryRepository;
use social_connected::outbound::persistence::DieselConnectionHistoryRepository;
use social_connected::outbound::twitter::TwitterHttpSource;
use tracing::info;

use super::config::{PlatformEndpoints, ServerConfig};

fn compose<O, F, H>(memberships: Arc<O>, follow_graph: Arc<F>, history: Arc<H>) -> HttpState
where
    O: OrganizationMembershipSource + 'static,
    F: FollowGraphSource + 'static,
    H: ConnectionHistoryRepository + 'static,
{
    HttpState::new(
        Arc::new(SocialConnectivityService::new(
            memberships,
            follow_graph,
            Arc::clone(&history),
        )),
        Arc::new(ConnectionHistoryService::new(history)),
    )
}

fn build_platform_sources(
    endpoints: &PlatformEndpoints,
) -> io::Result<(Arc<GithubHttpSource>, Arc<TwitterHttpSource>)> {
    let github = GithubHttpSource::new(endpoints.github_base_url.clone(), endpoints.timeout)
        .map_err(|err| io::Error::other(format!("GitHub client: {err}")))?;
    let twitter = TwitterHttpSource::new(
        endpoints.twitter_base_url.clone(),
        endpoints.twitter_token.as_str(),
        endpoints.timeout,
    )
    .map_err(|err| io::Error::other(format!("Twitter client: {err}")))?;
    Ok((Arc::new(github), Arc::new(twitter)))
}

/// Build handler state: HTTP platform clients plus the PostgreSQL history
/// when a pool is configured, the in-memory history otherwise.
///
/// # Errors
///
/// Returns an error when an HTTP client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> io::Result<HttpState> {
    let (github, twitter) = build_platform_sources(&config.platforms)?;
    let state = match &config.db_pool {
        Some(pool) => {
            info!("connection history stored in PostgreSQL");
            compose(
                github,
                twitter,
                Arc::new(DieselConnectionHistoryRepository::new(pool.clone())),
            )
        }
        None => {
            info!("no database configured; connection history kept in memory");
            compose(
                github,
                twitter,
                Arc::new(InMemoryConnectionHistoryRepository::new()),
            )
        }
    };
    Ok(state)
}
