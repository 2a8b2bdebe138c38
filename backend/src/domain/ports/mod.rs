//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod connection_history_query;
mod connection_history_repository;
mod connectivity_query;
mod follow_graph_source;
mod organization_membership_source;

#[cfg(test)]
pub use connection_history_query::MockConnectionHistoryQuery;
pub use connection_history_query::{ConnectionHistoryQuery, FixtureConnectionHistoryQuery};
#[cfg(test)]
pub use connection_history_repository::MockConnectionHistoryRepository;
pub use connection_history_repository::{
    ConnectionHistoryRepository, ConnectionHistoryRepositoryError,
    FixtureConnectionHistoryRepository,
};
#[cfg(test)]
pub use connectivity_query::MockConnectivityQuery;
pub use connectivity_query::{ConnectivityQuery, FixtureConnectivityQuery};
#[cfg(test)]
pub use follow_graph_source::MockFollowGraphSource;
pub use follow_graph_source::{
    FixtureFollowGraphSource, FollowGraphSource, FollowGraphSourceError, FollowRelationship,
    RelationshipLookup, UserLookup,
};
#[cfg(test)]
pub use organization_membership_source::MockOrganizationMembershipSource;
pub use organization_membership_source::{
    FixtureOrganizationMembershipSource, MembershipLookup, MembershipSourceError,
    OrganizationMembershipSource,
};
