//! thumbread server
//!
//! Serves a reader view of any web page.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use thumbread::handlers::{router, AppState};
use thumbread::{Reader, ServerConfig};
use tracing_subscriber::EnvFilter;

/// thumbread reader server
#[derive(Parser, Debug)]
#[command(name = "thumbread")]
#[command(version)]
#[command(about = "Reduce web pages to paragraphs and images")]
struct Args {
    /// Port to listen on (overrides THUMBREAD_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides THUMBREAD_HOST)
    #[arg(short = 'H', long)]
    host: Option<IpAddr>,

    /// Page fetch timeout in seconds (overrides THUMBREAD_TIMEOUT_SECS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = ServerConfig::from_env().context("invalid THUMBREAD_* environment")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout = Some(Duration::from_secs(secs));
    }
    config.log_summary();

    let reader = Reader::from_config(&config).context("failed to build page reader")?;
    let app = router(Arc::new(AppState::new(reader)));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("thumbread listening on http://{}", addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
