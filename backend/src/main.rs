//! Blog API entry-point: loads settings, prepares the database and the auth
//! client, then serves the REST endpoints.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog_api::domain::PostServiceImpl;
use blog_api::inbound::http::access::AccessPolicy;
use blog_api::inbound::http::health::HealthState;
use blog_api::outbound::auth::HttpAuthGateway;
use blog_api::outbound::persistence::{
    DbPool, DieselPostRepository, PoolConfig, run_pending_migrations,
};
use blog_api::server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .context("failed to load server settings")?
        .resolve()
        .context("invalid server settings")?;

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url.as_str())
            .with_max_size(settings.db_max_connections)
            .with_connection_timeout(settings.db_connect_timeout),
    )
    .await
    .context("failed to connect to the database")?;
    run_pending_migrations(&settings.database_url)
        .await
        .context("failed to apply database migrations")?;

    let auth = HttpAuthGateway::new(settings.auth_url.clone(), settings.auth_timeout)
        .context("failed to build the auth service client")?;
    info!(auth_url = %settings.auth_url, "auth service client ready");

    let posts = PostServiceImpl::new(Arc::new(DieselPostRepository::new(pool)));
    let config = ServerConfig::new(settings.bind_addr, Arc::new(posts), Arc::new(auth))
        .with_access_policy(AccessPolicy::for_blog(settings.guard_mutations))
        .with_shutdown_timeout(settings.shutdown_timeout);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .context("failed to bind the HTTP server")?;
    server.await.context("HTTP server failed")?;
    health_state.mark_unhealthy();
    info!("server stopped");
    Ok(())
}
