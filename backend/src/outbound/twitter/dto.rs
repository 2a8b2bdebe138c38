//! DTOs for decoding follow platform responses.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::FollowRelationship;

/// Body of `GET users/lookup.json`: the matched users, or an error object
/// when none matched.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum UserLookupDto {
    Users(Vec<UserDto>),
    Errors {
        #[expect(dead_code, reason = "error entries are only matched, not read")]
        errors: Vec<Value>,
    },
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) screen_name: String,
}

impl UserLookupDto {
    pub(super) fn into_screen_names(self) -> Vec<String> {
        match self {
            Self::Users(users) => users.into_iter().map(|user| user.screen_name).collect(),
            Self::Errors { .. } => Vec::new(),
        }
    }
}

/// Body of `GET friendships/show.json`.
#[derive(Debug, Deserialize)]
pub(super) struct RelationshipEnvelopeDto {
    relationship: RelationshipDto,
}

#[derive(Debug, Deserialize)]
struct RelationshipDto {
    source: RelationshipSourceDto,
}

#[derive(Debug, Deserialize)]
struct RelationshipSourceDto {
    following: bool,
    followed_by: bool,
}

impl From<RelationshipEnvelopeDto> for FollowRelationship {
    fn from(value: RelationshipEnvelopeDto) -> Self {
        let RelationshipSourceDto {
            following,
            followed_by,
        } = value.relationship.source;
        Self {
            following,
            followed_by,
        }
    }
}
