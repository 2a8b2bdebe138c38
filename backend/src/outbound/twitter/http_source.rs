//! Reqwest-backed follow graph adapter.
//!
//! Every request carries the configured `Authorization` header. Existence
//! answers are normalised into a list of recognised screen names; a
//! non-success relationship answer is passed back raw with its status.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::{RelationshipEnvelopeDto, UserLookupDto};
use crate::domain::ports::{
    FollowGraphSource, FollowGraphSourceError, FollowRelationship, RelationshipLookup, UserLookup,
};
use crate::domain::{DeveloperPair, OutcomeStatus};

const USER_AGENT: &str = concat!("social-connected/", env!("CARGO_PKG_VERSION"));

/// Errors raised while building [`TwitterHttpSource`].
#[derive(Debug, thiserror::Error)]
pub enum TwitterSourceBuildError {
    /// The token cannot be sent as a header value.
    #[error("invalid authorization token: {0}")]
    InvalidToken(#[from] InvalidHeaderValue),
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Follow graph source speaking the Twitter v1.1 REST API.
pub struct TwitterHttpSource {
    client: Client,
    base_url: Url,
}

impl TwitterHttpSource {
    /// Build an adapter.
    ///
    /// An empty `token` sends no `Authorization` header. `timeout` bounds
    /// each request when set.
    ///
    /// # Errors
    ///
    /// Returns an error when the token is not a valid header value or the
    /// reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        token: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, TwitterSourceBuildError> {
        let mut headers = HeaderMap::new();
        if !token.is_empty() {
            let mut value = HeaderValue::from_str(token)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    async fn get(&self, url: Url) -> Result<(StatusCode, Vec<u8>), FollowGraphSourceError> {
        debug!(%url, "querying follow graph");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|error| FollowGraphSourceError::transport(error.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| FollowGraphSourceError::transport(error.to_string()))?;
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl FollowGraphSource for TwitterHttpSource {
    async fn lookup_users(
        &self,
        pair: &DeveloperPair,
    ) -> Result<UserLookup, FollowGraphSourceError> {
        let url = lookup_endpoint(&self.base_url, pair.source().as_str(), pair.target().as_str())?;
        let (status, body) = self.get(url).await?;
        classify_lookup(status, &body)
    }

    async fn show_relationship(
        &self,
        pair: &DeveloperPair,
    ) -> Result<RelationshipLookup, FollowGraphSourceError> {
        let url =
            relationship_endpoint(&self.base_url, pair.source().as_str(), pair.target().as_str())?;
        let (status, body) = self.get(url).await?;
        classify_relationship(status, body)
    }
}

fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url, FollowGraphSourceError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            FollowGraphSourceError::invalid_request(format!("{base_url} cannot be a base URL"))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn require_name<'a>(name: &'a str, role: &str) -> Result<&'a str, FollowGraphSourceError> {
    if name.trim().is_empty() {
        return Err(FollowGraphSourceError::invalid_request(format!(
            "{role} screen name must not be empty"
        )));
    }
    Ok(name)
}

/// Build `{base}/users/lookup.json?screen_name=source,target`.
fn lookup_endpoint(
    base_url: &Url,
    source: &str,
    target: &str,
) -> Result<Url, FollowGraphSourceError> {
    let source = require_name(source, "source")?;
    let target = require_name(target, "target")?;
    let mut url = endpoint(base_url, &["users", "lookup.json"])?;
    url.query_pairs_mut()
        .append_pair("screen_name", &format!("{source},{target}"));
    Ok(url)
}

/// Build `{base}/friendships/show.json?source_screen_name=..&target_screen_name=..`.
fn relationship_endpoint(
    base_url: &Url,
    source: &str,
    target: &str,
) -> Result<Url, FollowGraphSourceError> {
    let source = require_name(source, "source")?;
    let target = require_name(target, "target")?;
    let mut url = endpoint(base_url, &["friendships", "show.json"])?;
    url.query_pairs_mut()
        .append_pair("source_screen_name", source)
        .append_pair("target_screen_name", target);
    Ok(url)
}

fn classify_lookup(status: StatusCode, body: &[u8]) -> Result<UserLookup, FollowGraphSourceError> {
    let outcome_status = OutcomeStatus::from_u16(status.as_u16());
    if !status.is_success() {
        warn!(status = status.as_u16(), "follow graph user lookup rejected");
        return Ok(UserLookup {
            status: outcome_status,
            screen_names: Vec::new(),
        });
    }
    let decoded: UserLookupDto = serde_json::from_slice(body).map_err(|error| {
        FollowGraphSourceError::decode(format!("invalid user lookup payload: {error}"))
    })?;
    Ok(UserLookup {
        status: outcome_status,
        screen_names: decoded.into_screen_names(),
    })
}

fn classify_relationship(
    status: StatusCode,
    body: Vec<u8>,
) -> Result<RelationshipLookup, FollowGraphSourceError> {
    if !status.is_success() {
        warn!(status = status.as_u16(), "follow relationship lookup rejected");
        return Ok(RelationshipLookup::Rejected {
            status: OutcomeStatus::from_u16(status.as_u16()),
            payload: body,
        });
    }
    let decoded: RelationshipEnvelopeDto = serde_json::from_slice(&body).map_err(|error| {
        FollowGraphSourceError::decode(format!("invalid relationship payload: {error}"))
    })?;
    Ok(RelationshipLookup::Relationship(FollowRelationship::from(
        decoded,
    )))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn base() -> Url {
        Url::parse("https://api.twitter.com/1.1/").expect("valid base")
    }

    #[rstest]
    fn builds_lookup_endpoint(base: Url) {
        let url = lookup_endpoint(&base, "dev1", "dev2").expect("endpoint builds");
        assert_eq!(
            url.as_str(),
            "https://api.twitter.com/1.1/users/lookup.json?screen_name=dev1%2Cdev2"
        );
    }

    #[rstest]
    fn builds_relationship_endpoint(base: Url) {
        let url = relationship_endpoint(&base, "dev1", "dev2").expect("endpoint builds");
        assert_eq!(url.path(), "/1.1/friendships/show.json");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("source_screen_name".to_owned(), "dev1".to_owned()),
                ("target_screen_name".to_owned(), "dev2".to_owned()),
            ]
        );
    }

    #[rstest]
    #[case::blank_source("", "dev2")]
    #[case::blank_target("dev1", " ")]
    fn rejects_blank_names_before_any_request(
        base: Url,
        #[case] source: &str,
        #[case] target: &str,
    ) {
        let lookup = lookup_endpoint(&base, source, target).expect_err("blank name");
        assert!(matches!(lookup, FollowGraphSourceError::InvalidRequest { .. }));
        let relationship = relationship_endpoint(&base, source, target).expect_err("blank name");
        assert!(matches!(
            relationship,
            FollowGraphSourceError::InvalidRequest { .. }
        ));
    }

    #[rstest]
    fn lookup_lists_recognised_names() {
        let body = br#"[{"id": 1, "screen_name": "dev1"}, {"id": 2, "screen_name": "dev2"}]"#;
        let lookup = classify_lookup(StatusCode::OK, body).expect("decodes");
        assert_eq!(lookup.screen_names, vec!["dev1".to_owned(), "dev2".to_owned()]);
        assert_eq!(lookup.status, OutcomeStatus::OK);
    }

    #[rstest]
    fn lookup_error_object_means_nobody_matched() {
        let body = br#"{"errors": [{"code": 17, "message": "No user matches for specified terms."}]}"#;
        let lookup = classify_lookup(StatusCode::OK, body).expect("decodes");
        assert!(lookup.screen_names.is_empty());
    }

    #[rstest]
    fn lookup_failure_keeps_status() {
        let body = br#"{"errors": [{"code": 17}]}"#;
        let lookup = classify_lookup(StatusCode::NOT_FOUND, body).expect("404 is an answer");
        assert!(lookup.screen_names.is_empty());
        assert_eq!(lookup.status, OutcomeStatus::NOT_FOUND);
    }

    #[rstest]
    fn relationship_reads_source_flags() {
        let body = br#"{"relationship": {
            "source": {"screen_name": "dev1", "following": true, "followed_by": false},
            "target": {"screen_name": "dev2", "following": false, "followed_by": true}
        }}"#;
        let lookup = classify_relationship(StatusCode::OK, body.to_vec()).expect("decodes");
        assert_eq!(
            lookup,
            RelationshipLookup::Relationship(FollowRelationship {
                following: true,
                followed_by: false,
            })
        );
    }

    #[rstest]
    fn rate_limited_relationship_is_passed_through() {
        let body = br#"{"errors":[{"code":88,"message":"Rate limit exceeded"}]}"#.to_vec();
        let lookup =
            classify_relationship(StatusCode::TOO_MANY_REQUESTS, body.clone()).expect("answer");
        assert_eq!(
            lookup,
            RelationshipLookup::Rejected {
                status: OutcomeStatus::TOO_MANY_REQUESTS,
                payload: body,
            }
        );
    }

    #[rstest]
    fn rejects_tokens_with_control_characters(base: Url) {
        let result = TwitterHttpSource::new(base, "Bearer abc\n", None);
        assert!(matches!(
            result,
            Err(TwitterSourceBuildError::InvalidToken(_))
        ));
    }
}
