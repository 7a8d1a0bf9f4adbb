//! Mimic CLI and webhook server entry point.
//!
//! Binary name: `mimic`

mod cli;
mod http;
mod state;

use clap::Parser;

use mimic_infra::config::{load_config, resolve_port};
use mimic_infra::filesystem::resolve_data_dir;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    mimic_observe::tracing_setup::init_tracing(cli.default_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir();
    let config = load_config(&data_dir).await?;

    let result = match cli.command {
        Commands::Serve { port, host } => serve(&data_dir, &config, &host, port).await,
        Commands::History { identity } => {
            cli::history::show_history(&data_dir, &config, &identity).await
        }
        Commands::Config => cli::history::show_config(&config),
    };

    mimic_observe::tracing_setup::shutdown_tracing();
    result
}

async fn serve(
    data_dir: &std::path::Path,
    config: &mimic_types::config::BotConfig,
    host: &str,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let port = resolve_port(port)?;
    let state = AppState::init(data_dir, config)?;

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, data_dir = %data_dir.display(), "server listening");

    let tasks = state.tasks.clone();
    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tasks.close();
    if !tasks.is_empty() {
        tracing::info!(pending = tasks.len(), "waiting for in-flight exchanges");
    }
    tasks.wait().await;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
}
