//! Service entry-point: loads settings, prepares the history store, and
//! serves the connectivity endpoints.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use social_connected::inbound::http::health::HealthState;
use social_connected::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use social_connected::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load()
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))?;
    let mut config = ServerConfig::from_settings(&settings)?;

    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .map_err(io::Error::other)?;
        let pool_config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %config.bind_addr(), "starting social connectivity service");
    create_server(health_state, config)?.await
}
