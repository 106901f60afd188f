//! Quill entry-point: reads configuration, migrates in the background and
//! serves the blog.

mod server;

use std::process::ExitCode;

use actix_web::web;
use mockable::{DefaultEnv, Env};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use quill::inbound::http::health::HealthState;
use quill::inbound::http::session_config::{
    BuildMode, SessionConfigError, session_settings_from_env,
};
use quill::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use quill::settings::{AppSettings, SettingsError};
use server::{ServerConfig, create_server, drain, wait_for_shutdown_signal};

/// Reasons the process stops with a failure status.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    /// Process settings are missing or malformed.
    #[error("invalid configuration: {0}")]
    Settings(#[from] SettingsError),
    /// Session cookie settings are missing or malformed.
    #[error("invalid session configuration: {0}")]
    Session(#[from] SessionConfigError),
    /// The listener could not be bound.
    #[error("failed to start listener: {0}")]
    Bind(#[source] std::io::Error),
    /// The server stopped with an I/O error.
    #[error("server terminated: {0}")]
    Serve(#[source] std::io::Error),
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    // A missing `.env` is normal; the process environment still applies.
    match dotenvy::dotenv() {
        Err(error) if !error.not_found() => warn!(%error, "failed to load .env"),
        _ => {}
    }

    match run(&DefaultEnv::new()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "quill stopped");
            ExitCode::FAILURE
        }
    }
}

/// Validate configuration, bind, then serve until a shutdown signal.
///
/// Configuration is checked before any socket is bound, so a bad environment
/// never leaves a listener behind.
async fn run<E: Env>(env: &E) -> Result<(), StartupError> {
    let settings = AppSettings::from_env(env)?;
    let session = session_settings_from_env(env, BuildMode::from_debug_assertions())?;

    let health_state = web::Data::new(HealthState::new());
    let pool = DbPool::connect_lazy(&PoolConfig::new(settings.database_url.clone()));
    let config = ServerConfig::new(session, settings.bind_addr, pool);
    let server = create_server(health_state.clone(), config).map_err(StartupError::Bind)?;
    info!(addr = %settings.bind_addr, "listening");

    actix_web::rt::spawn(prepare_database(
        settings.database_url,
        health_state.clone(),
    ));
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        wait_for_shutdown_signal().await;
        drain(health_state, handle).await;
    });

    server.await.map_err(StartupError::Serve)
}

/// Connect and migrate; readiness flips only on success. Requests keep being
/// served either way and report storage errors until the database is up.
async fn prepare_database(database_url: String, health_state: web::Data<HealthState>) {
    match run_pending_migrations(database_url).await {
        Ok(applied) => {
            info!(applied, "connected to database");
            health_state.mark_ready();
        }
        Err(err) => error!(error = %err, "database unavailable"),
    }
}
