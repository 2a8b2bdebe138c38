//! HTTP inbound adapter exposing the connectivity endpoints.

pub mod connectivity;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
