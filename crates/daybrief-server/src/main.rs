use clap::Parser;
use daybrief_server::cli::{self, Cli, Commands};
use daybrief_server::config::ServeConfig;
use daybrief_server::http;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(config) => serve(config).await,
        Commands::Briefing(args) => cli::generate::briefing(args, &cli.server).await,
        Commands::Insight(args) => cli::generate::insight(args, &cli.server).await,
    }
}

async fn serve(config: ServeConfig) -> anyhow::Result<()> {
    info!("Starting daybrief v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP: {}", config.http_addr);
    info!("Model: {}", config.model);

    // Fail fast on a missing credential, before binding anything.
    let proxy = config.proxy()?;

    let state = http::AppState {
        proxy: Arc::new(proxy),
        model: config.model.clone(),
        start_time: std::time::Instant::now(),
    };

    let app = http::create_router(state);
    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;

    info!("daybrief ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown signal received, terminating...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
