//! Repo Gateway - an HTTP bridge between tool-using agents and GitHub
//!
//! # Usage
//! ```bash
//! GITHUB_TOKEN=... repo-gateway                 # Serve on 127.0.0.1:3001
//! GITHUB_TOKEN=... repo-gateway --port 8080     # Custom port
//! GITHUB_TOKEN=... repo-gateway --host 0.0.0.0  # Listen on all interfaces
//! ```
//!
//! Endpoints: /list-files, /read-file, /scan-repo, /write-file

mod config;
mod error;
mod github;
mod models;
mod routes;

use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::GatewayConfig;
use github::GitHubClient;
use routes::AppState;

/// Repo Gateway - expose GitHub repository contents to agents over HTTP
#[derive(Parser)]
#[command(name = "repo-gateway")]
#[command(about = "HTTP gateway for listing, reading, scanning and writing GitHub repository files", long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Upstream API base URL (overrides GITHUB_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("✗ {}", e);
            eprintln!("  Set GITHUB_TOKEN in the environment or a .env file.");
            std::process::exit(1);
        }
    };
    if let Some(url) = &cli.api_url {
        config = config.with_api_base_url(url);
    }
    tracing::debug!(?config, "configuration loaded");

    let client = GitHubClient::new(&config)?;
    let state = Arc::new(AppState {
        source: Arc::new(client),
        default_committer: config.default_committer.clone(),
    });

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, upstream = %config.api_base_url, "repo-gateway listening");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            return;
        }
        tracing::info!("shutting down");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
