//! Follow platform outbound adapter.
//!
//! Provides a thin HTTP implementation of the `FollowGraphSource` port
//! against a Twitter v1.1-compatible API.

mod dto;
mod http_source;

pub use http_source::{TwitterHttpSource, TwitterSourceBuildError};
