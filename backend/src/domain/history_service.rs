//! Connection history query service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::domain::ports::{ConnectionHistoryQuery, ConnectionHistoryRepository};
use crate::domain::{DeveloperPair, ErrorMessage, ErrorMessages, HistoryReport};

/// History service implementing [`ConnectionHistoryQuery`].
#[derive(Clone)]
pub struct ConnectionHistoryService<H> {
    history: Arc<H>,
}

impl<H> ConnectionHistoryService<H> {
    /// Create the service over a history repository.
    pub fn new(history: Arc<H>) -> Self {
        Self { history }
    }
}

#[async_trait]
impl<H> ConnectionHistoryQuery for ConnectionHistoryService<H>
where
    H: ConnectionHistoryRepository,
{
    async fn history(&self, pair: &DeveloperPair) -> HistoryReport {
        match self.history.list_for_pair(pair).await {
            Ok(entries) => HistoryReport::entries(entries),
            Err(err) => {
                error!(%pair, error = %err, "failed to read connection history");
                HistoryReport::errors(ErrorMessages::single(ErrorMessage::text(err.to_string())))
            }
        }
    }
}
