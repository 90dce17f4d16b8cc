use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdf_excerpt_core::config_file;
use pdf_excerpt_core::{Fetcher, Pipeline, Settings};
use pdf_excerpt_mupdf::MupdfParser;
use pdf_excerpt_server::{AppState, build_router};

/// PDF Extraction Service - return a text excerpt of a PDF at a given URL
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Port to listen on (overrides PORT and config files)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (overrides HOST and config files)
    #[arg(long)]
    host: Option<String>,

    /// Read configuration from this TOML file instead of the default cascade
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let file = match cli.config {
        Some(ref path) => config_file::load_from_path(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => config_file::load_config(),
    };

    let mut settings = Settings::from_env(&file);
    if let Some(port) = cli.port {
        settings.port = port;
    }
    if let Some(host) = cli.host {
        settings.host = host;
    }

    let fetcher =
        Fetcher::new(&settings.fetcher_options()).context("Failed to build HTTP client")?;
    let state = Arc::new(AppState {
        pipeline: Pipeline::with_parser(fetcher, Arc::new(MupdfParser::new())),
        expose_pipeline_errors: settings.expose_pipeline_errors,
    });

    let app = build_router(state);

    tracing::info!(
        host = %settings.host,
        port = settings.port,
        "starting PDF extraction server"
    );
    let listener = tokio::net::TcpListener::bind((settings.host.as_str(), settings.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", settings.host, settings.port))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
