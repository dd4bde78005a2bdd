//! Backend entry-point: loads settings, prepares the database and serves the
//! REST API, health probes and (in debug builds) OpenAPI docs.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use schedule_backend::inbound::http::health::HealthState;
use schedule_backend::inbound::http::session_config::{BuildMode, session_settings};
use schedule_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

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

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let database_url = settings.database_url()?;
    let login_token = settings.login_token()?;
    info!(fingerprint = %login_token.fingerprint(), "login token loaded");

    let session = session_settings(
        &settings.session_toggles(),
        BuildMode::from_debug_assertions(),
    )?;

    if settings.run_migrations {
        run_pending_migrations(database_url).await?;
    }
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .wrap_err("failed to create database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(session, login_token, bind_addr).with_db_pool(pool);
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;

    info!(%bind_addr, "schedule backend listening");
    server.await.wrap_err("server terminated with an error")
}
