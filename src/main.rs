//! forwarded-url service.
//!
//! Answers every request with the URLs it resolves to from the client's
//! point of view. Useful for checking what a proxy in front of an
//! application actually forwards.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use forwarded_url::config::load_config_with;
use forwarded_url::observability::init_logging;
use forwarded_url::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "forwarded-url")]
#[command(about = "Report reverse-proxy aware URLs for incoming requests", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Apply X-Forwarded-Path-Prefix regardless of the config file.
    #[arg(long)]
    path_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config_with(cli.config.as_deref(), |config| {
        if let Some(bind) = cli.bind.clone() {
            config.listener.bind_address = bind;
        }
        if cli.path_prefix {
            config.forwarding.path_prefix_enabled = true;
        }
    })?;

    init_logging(&config.observability);

    tracing::info!("forwarded-url v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        path_prefix_enabled = config.forwarding.path_prefix_enabled,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
