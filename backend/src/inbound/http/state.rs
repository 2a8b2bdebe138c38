//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see the
//! driving ports, so they stay testable without network or database access.

use std::sync::Arc;

use crate::domain::ports::{
    ConnectionHistoryQuery, ConnectivityQuery, FixtureConnectionHistoryQuery,
    FixtureConnectivityQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub connectivity: Arc<dyn ConnectivityQuery>,
    pub history: Arc<dyn ConnectionHistoryQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use social_connected::domain::ports::{
    ///     FixtureConnectionHistoryQuery, FixtureConnectivityQuery,
    /// };
    /// use social_connected::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureConnectivityQuery),
    ///     Arc::new(FixtureConnectionHistoryQuery),
    /// );
    /// let _connectivity = state.connectivity.clone();
    /// ```
    pub fn new(
        connectivity: Arc<dyn ConnectivityQuery>,
        history: Arc<dyn ConnectionHistoryQuery>,
    ) -> Self {
        Self {
            connectivity,
            history,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureConnectivityQuery),
            Arc::new(FixtureConnectionHistoryQuery),
        )
    }
}
