//! Backend entry-point: loads settings, prepares storage and serves the REST
//! API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, ServerConfig, create_server};
use yoga_backend::inbound::http::health::HealthState;
use yoga_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn connect(settings: &AppSettings, database_url: &str) -> Result<DbPool> {
    run_migrations(database_url)
        .await
        .wrap_err("apply database migrations")?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .wrap_err("create database pool")?;
    info!("connected to PostgreSQL");
    Ok(pool)
}

async fn build_config(settings: &AppSettings) -> Result<ServerConfig> {
    let secret = settings.resolve_jwt_secret(cfg!(debug_assertions))?;
    if secret.ephemeral {
        warn!("using a random per-process JWT secret; tokens will not survive a restart");
    }

    let config = ServerConfig::new(settings.bind_addr()?, secret.bytes)
        .with_jwt_expiration_ms(settings.jwt_expiration_ms()?);

    let config = match settings.database_url.as_deref() {
        Some(url) => config.with_db_pool(connect(settings, url).await?),
        None => config,
    };

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::default_metrics());

    Ok(config)
}

fn load_settings(args: impl IntoIterator<Item = OsString>) -> Result<AppSettings> {
    AppSettings::load_from_iter(args).map_err(|err| eyre!("load configuration: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = load_settings(std::env::args_os())?;
    let config = build_config(&settings).await?;
    let bind_addr = config.bind_addr;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("bind HTTP listener on {bind_addr}"))?;
    info!(%bind_addr, "yoga backend listening");
    server.await.wrap_err("HTTP server failed")
}

#[cfg(test)]
mod tests;
