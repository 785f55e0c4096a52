use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use lamp_control::store::PostgresLampStore;
use lamp_control::{http, init_tracing, LampBackend, LampService, OperationMode, ServiceConfig};

#[derive(Debug, Parser)]
#[command(name = "lamp-control", version, about = "Lamp control REST service")]
struct Cli {
    /// migrate: run migrations and exit. serve: migrate, then serve. serve-only: serve.
    #[arg(long, value_enum, default_value_t = OperationMode::ServeOnly)]
    mode: OperationMode,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ServiceConfig::from_env().context("loading configuration")?;
    init_tracing(&config.log_level, config.log_format)?;

    let database = config.database()?;
    info!(mode = %cli.mode, "starting lamp-control");

    if !cli.mode.serves() {
        let Some(database) = database else {
            warn!("migrate mode requested but no database is configured; nothing to do");
            return Ok(());
        };
        let store = PostgresLampStore::connect(&database)
            .await
            .with_context(|| format!("connecting to {}", database.describe()))?;
        store.migrate().await.context("running migrations")?;
        info!("migrations complete");
        return Ok(());
    }

    let backend = LampBackend::select(database.as_ref(), cli.mode.runs_migrations())
        .await
        .context("initialising lamp store")?;
    info!(backend = backend.name(), "lamp store ready");

    let service = Arc::new(LampService::new(backend));
    http::serve(service, &config.bind_addr(), shutdown_signal())
        .await
        .context("serving http")?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
