//! Mutual-follow connectivity check.
//!
//! Existence is verified first with one combined lookup; missing developers
//! short-circuit the check so the relationship call is never issued for
//! them.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{FollowGraphSource, RelationshipLookup, UserLookup};
use crate::domain::{
    DeveloperHandle, DeveloperPair, ErrorMessage, ErrorMessages, FollowReport, OutcomeStatus,
};

/// Platform name used in not-found messages.
const PLATFORM: &str = "twitter";

/// Developers absent from the lookup, source first, each once.
///
/// Screen names are compared case-insensitively because the platform
/// treats them that way.
fn missing_developers(pair: &DeveloperPair, lookup: &UserLookup) -> ErrorMessages {
    let found = |developer: &DeveloperHandle| {
        lookup
            .screen_names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(developer.as_str()))
    };
    [pair.source(), pair.target()]
        .into_iter()
        .filter(|developer| !found(*developer))
        .map(|developer| {
            ErrorMessage::text(format!("{developer} is not a valid user in {PLATFORM}"))
        })
        .collect()
}

/// Checks whether two developers follow each other.
#[derive(Clone)]
pub struct FollowConnectivity<S> {
    source: Arc<S>,
}

impl<S> FollowConnectivity<S> {
    /// Create a checker over a follow graph source.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

impl<S> FollowConnectivity<S>
where
    S: FollowGraphSource,
{
    /// Verify both developers exist, then read their relationship.
    pub async fn check(&self, pair: &DeveloperPair) -> FollowReport {
        let lookup = match self.source.lookup_users(pair).await {
            Ok(lookup) => lookup,
            Err(error) => {
                warn!(%pair, %error, "follow graph user lookup failed");
                return FollowReport::failure(
                    ErrorMessages::single(ErrorMessage::text(error.to_string())),
                    error.status(),
                );
            }
        };

        let missing = missing_developers(pair, &lookup);
        if !missing.is_empty() {
            debug!(%pair, missing = missing.len(), "developers missing from follow graph");
            return FollowReport::failure(missing, lookup.status);
        }

        match self.source.show_relationship(pair).await {
            Ok(RelationshipLookup::Relationship(relationship)) => {
                debug!(
                    %pair,
                    following = relationship.following,
                    followed_by = relationship.followed_by,
                    "follow relationship read"
                );
                FollowReport::success(relationship.is_mutual(), OutcomeStatus::OK)
            }
            Ok(RelationshipLookup::Rejected { status, payload }) => FollowReport::failure(
                ErrorMessages::single(ErrorMessage::payload(&payload)),
                status,
            ),
            Err(error) => {
                warn!(%pair, %error, "follow relationship lookup failed");
                FollowReport::failure(
                    ErrorMessages::single(ErrorMessage::text(error.to_string())),
                    error.status(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FollowGraphSourceError, FollowRelationship, MockFollowGraphSource};
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn pair() -> DeveloperPair {
        DeveloperPair::parse("dev1", "dev2").expect("valid pair")
    }

    fn found(names: &[&str]) -> UserLookup {
        UserLookup {
            status: OutcomeStatus::OK,
            screen_names: names.iter().map(|n| (*n).to_owned()).collect(),
        }
    }

    fn checker(source: MockFollowGraphSource) -> FollowConnectivity<MockFollowGraphSource> {
        FollowConnectivity::new(Arc::new(source))
    }

    fn messages(report: &FollowReport) -> Vec<String> {
        report
            .result
            .as_ref()
            .expect_err("report failed")
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[rstest]
    #[case::mutual(true, true, true)]
    #[case::one_way(true, false, false)]
    #[case::neither(false, false, false)]
    #[tokio::test]
    async fn connected_only_when_mutual(
        pair: DeveloperPair,
        #[case] following: bool,
        #[case] followed_by: bool,
        #[case] expected: bool,
    ) {
        let mut source = MockFollowGraphSource::new();
        source
            .expect_lookup_users()
            .times(1)
            .return_once(|_| Ok(found(&["dev1", "dev2"])));
        source.expect_show_relationship().times(1).return_once(move |_| {
            Ok(RelationshipLookup::Relationship(FollowRelationship {
                following,
                followed_by,
            }))
        });

        let report = checker(source).check(&pair).await;

        assert_eq!(report.status, OutcomeStatus::OK);
        assert_eq!(report.result, Ok(expected));
    }

    #[rstest]
    #[tokio::test]
    async fn one_missing_developer_short_circuits(pair: DeveloperPair) {
        let mut source = MockFollowGraphSource::new();
        source
            .expect_lookup_users()
            .times(1)
            .return_once(|_| Ok(found(&["dev1"])));
        source.expect_show_relationship().never();

        let report = checker(source).check(&pair).await;

        assert_eq!(report.status, OutcomeStatus::OK);
        assert_eq!(
            messages(&report),
            vec!["dev2 is not a valid user in twitter".to_owned()]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn empty_lookup_reports_both_source_first(pair: DeveloperPair) {
        let mut source = MockFollowGraphSource::new();
        source.expect_lookup_users().times(1).return_once(|_| {
            Ok(UserLookup {
                status: OutcomeStatus::NOT_FOUND,
                screen_names: Vec::new(),
            })
        });
        source.expect_show_relationship().never();

        let report = checker(source).check(&pair).await;

        assert_eq!(report.status, OutcomeStatus::NOT_FOUND);
        assert_eq!(
            messages(&report),
            vec![
                "dev1 is not a valid user in twitter".to_owned(),
                "dev2 is not a valid user in twitter".to_owned(),
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn same_developer_twice_is_reported_once() {
        let pair = DeveloperPair::parse("ghost", "ghost").expect("valid pair");
        let mut source = MockFollowGraphSource::new();
        source
            .expect_lookup_users()
            .times(1)
            .return_once(|_| Ok(found(&[])));
        source.expect_show_relationship().never();

        let report = checker(source).check(&pair).await;

        assert_eq!(messages(&report).len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn screen_names_match_case_insensitively(pair: DeveloperPair) {
        let mut source = MockFollowGraphSource::new();
        source
            .expect_lookup_users()
            .times(1)
            .return_once(|_| Ok(found(&["DEV1", "Dev2"])));
        source.expect_show_relationship().times(1).return_once(|_| {
            Ok(RelationshipLookup::Relationship(FollowRelationship {
                following: true,
                followed_by: true,
            }))
        });

        let report = checker(source).check(&pair).await;

        assert_eq!(report.result, Ok(true));
    }

    #[rstest]
    #[tokio::test]
    async fn rate_limited_relationship_propagates_payload(pair: DeveloperPair) {
        let mut source = MockFollowGraphSource::new();
        source
            .expect_lookup_users()
            .times(1)
            .return_once(|_| Ok(found(&["dev1", "dev2"])));
        source.expect_show_relationship().times(1).return_once(|_| {
            Ok(RelationshipLookup::Rejected {
                status: OutcomeStatus::TOO_MANY_REQUESTS,
                payload: br#"{"errors":[{"code":88,"message":"Rate limit exceeded"}]}"#.to_vec(),
            })
        });

        let report = checker(source).check(&pair).await;

        assert_eq!(report.status, OutcomeStatus::TOO_MANY_REQUESTS);
        let errors = report.result.expect_err("rate limit is an error");
        let first = errors.iter().next().expect("one message");
        assert_eq!(
            first.as_value(),
            &json!({"errors": [{"code": 88, "message": "Rate limit exceeded"}]})
        );
    }

    #[rstest]
    #[tokio::test]
    async fn transport_failure_reports_unavailable(pair: DeveloperPair) {
        let mut source = MockFollowGraphSource::new();
        source
            .expect_lookup_users()
            .times(1)
            .return_once(|_| Err(FollowGraphSourceError::transport("dns failure")));
        source.expect_show_relationship().never();

        let report = checker(source).check(&pair).await;

        assert_eq!(report.status, OutcomeStatus::SERVICE_UNAVAILABLE);
    }
}
