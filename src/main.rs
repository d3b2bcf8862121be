//! tagbridge - same-origin forwarding shim for server-side tag delivery.
//!
//! Serves a configured upstream under a first-party path: strips a
//! configured prefix from the inbound path, rewrites the Host header, and
//! forwards the request, returning the upstream response unmodified.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tagbridge::config;
use tagbridge::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "tagbridge", version, about = "Same-origin forwarding shim")]
struct Args {
    /// Path to a TOML configuration file. Environment variables
    /// (UPSTREAM_DOMAIN, PATH_PREFIX, ...) override file values.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tagbridge=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("tagbridge starting");

    let args = Args::parse();
    let config = config::load_config(args.config.as_deref())?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_domain = %config.upstream.domain,
        upstream_scheme = %config.upstream.scheme,
        path_prefix = %config.upstream.path_prefix,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
