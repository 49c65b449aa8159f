//! Backend entry-point: reads configuration, prepares the database and serves
//! the REST API.

mod server;

use std::net::SocketAddr;

use actix_web::web;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use reelmark::config::app_settings_from_env;
use reelmark::inbound::http::health::HealthState;
use reelmark::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, create_server};

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "reelmark", about = "Reelmark backend HTTP server")]
struct Cli {
    /// Socket address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings =
        app_settings_from_env(&mockable::DefaultEnv::new()).map_err(std::io::Error::other)?;

    if settings.run_migrations {
        let database_url = settings.database_url.clone();
        let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
            .await
            .map_err(std::io::Error::other)?
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations complete");
    }

    let db_pool = DbPool::new(PoolConfig::new(settings.database_url.as_str()))
        .await
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(cli.bind, settings, db_pool),
    )?;
    info!(bind = %cli.bind, "listening");
    server.await
}
