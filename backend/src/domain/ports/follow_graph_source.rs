//! Driven port for the mutual-follow platform.
//!
//! Two calls are exposed: a combined existence lookup for both developers
//! and a directional relationship lookup from source to target.

use async_trait::async_trait;

use crate::domain::{DeveloperPair, OutcomeStatus};

use super::define_port_error;

/// Screen names the platform recognised, plus the lookup status.
///
/// An error payload from the platform is reported as an empty name list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLookup {
    /// Status of the existence call.
    pub status: OutcomeStatus,
    /// Recognised screen names as returned by the platform.
    pub screen_names: Vec<String>,
}

/// Follow flags from the source developer's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowRelationship {
    /// Source follows target.
    pub following: bool,
    /// Target follows source.
    pub followed_by: bool,
}

impl FollowRelationship {
    /// Whether both developers follow each other.
    pub fn is_mutual(self) -> bool {
        self.following && self.followed_by
    }
}

/// Answer from the relationship call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipLookup {
    /// The platform returned the relationship.
    Relationship(FollowRelationship),
    /// The platform refused the call (rate limit, ...); `payload` is the
    /// raw body.
    Rejected {
        status: OutcomeStatus,
        payload: Vec<u8>,
    },
}

define_port_error! {
    /// Errors raised by follow graph adapters.
    pub enum FollowGraphSourceError {
        /// The request could not be built, for example from a blank name.
        InvalidRequest { message: String } =>
            "follow graph request invalid: {message}",
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "follow graph transport failed: {message}",
        /// A response could not be decoded.
        Decode { message: String } =>
            "follow graph response decode failed: {message}",
    }
}

impl FollowGraphSourceError {
    /// Status reported for this failure.
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::InvalidRequest { .. } => OutcomeStatus::BAD_REQUEST,
            Self::Transport { .. } => OutcomeStatus::SERVICE_UNAVAILABLE,
            Self::Decode { .. } => OutcomeStatus::BAD_GATEWAY,
        }
    }
}

/// Port for querying the follow platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowGraphSource: Send + Sync {
    /// Look up both developers in one call.
    async fn lookup_users(&self, pair: &DeveloperPair)
    -> Result<UserLookup, FollowGraphSourceError>;

    /// Read the relationship from `pair.source()` to `pair.target()`.
    async fn show_relationship(
        &self,
        pair: &DeveloperPair,
    ) -> Result<RelationshipLookup, FollowGraphSourceError>;
}

/// Fixture where both developers exist and follow each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureFollowGraphSource;

#[async_trait]
impl FollowGraphSource for FixtureFollowGraphSource {
    async fn lookup_users(
        &self,
        pair: &DeveloperPair,
    ) -> Result<UserLookup, FollowGraphSourceError> {
        Ok(UserLookup {
            status: OutcomeStatus::OK,
            screen_names: vec![
                pair.source().as_str().to_owned(),
                pair.target().as_str().to_owned(),
            ],
        })
    }

    async fn show_relationship(
        &self,
        _pair: &DeveloperPair,
    ) -> Result<RelationshipLookup, FollowGraphSourceError> {
        Ok(RelationshipLookup::Relationship(FollowRelationship {
            following: true,
            followed_by: true,
        }))
    }
}
