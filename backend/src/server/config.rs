//! HTTP server configuration object and helpers.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use social_connected::outbound::persistence::DbPool;
use social_connected::settings::ServiceSettings;
use url::Url;

/// Where and how the platform clients connect.
#[derive(Debug, Clone)]
pub struct PlatformEndpoints {
    pub(crate) github_base_url: Url,
    pub(crate) twitter_base_url: Url,
    pub(crate) twitter_token: String,
    pub(crate) timeout: Option<Duration>,
}

/// Everything needed to build the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) platforms: PlatformEndpoints,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Validate settings into a configuration without a database pool.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] for malformed addresses or
    /// URLs.
    pub fn from_settings(settings: &ServiceSettings) -> io::Result<Self> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            platforms: PlatformEndpoints {
                github_base_url: settings.github_api_base_url()?,
                twitter_base_url: settings.twitter_api_base_url()?,
                twitter_token: settings.twitter_api_token().to_owned(),
                timeout: settings.http_timeout(),
            },
            db_pool: None,
        })
    }

    /// Store connection history in PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
