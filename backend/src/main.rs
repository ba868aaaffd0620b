//! Student records service entry-point: loads configuration, selects the
//! store and serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use students_backend::inbound::http::health::HealthState;
use students_backend::outbound::persistence::{DbPool, PoolConfig};
use students_backend::settings::ServiceSettings;

use server::{ServerConfig, create_server, shutdown_on, shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config =
        ServerConfig::new(bind_addr).with_update_validation(settings.update_validation());
    if let Some(database_url) = settings.database_url() {
        let pool_config = PoolConfig::new(database_url)
            .with_max_size(settings.pool_max_size().map_err(std::io::Error::other)?)
            .with_checkout_timeout(settings.pool_timeout().map_err(std::io::Error::other)?);
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "student records service listening");

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        shutdown_on(shutdown_signal(), &health_state, &handle).await;
    });
    server.await
}
