//! Police API tool service - main entry point.
//!
//! Builds the static tool catalog and the HTTP gateway, then serves the IPC
//! transport until interrupted. SIGINT logs a shutdown notice and exits
//! cleanly; a startup fault is logged and the process exits after a fixed
//! delay instead of crashing immediately.

use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

use police_api_tools::gateway::HttpGateway;
use police_api_tools::ipc::{IpcServer, Router};
use police_api_tools::tools::builtin_catalog;
use police_api_tools::types::SERVICE_NAME;
use police_api_tools::Config;

/// Delay before exiting on a startup fault, so the fault stays visible in a
/// supervisor's restart loop.
const STARTUP_FAULT_DELAY: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "police-api-server")]
#[command(about = "UK Police data API exposed as a named tool catalog")]
struct Args {
    /// IPC listen address.
    #[arg(long, env = "POLICE_LISTEN_ADDR")]
    listen: Option<String>,

    /// Upstream API root.
    #[arg(long, env = "POLICE_BASE_URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() {
    police_api_tools::observability::init_tracing();

    if let Err(e) = run().await {
        tracing::error!("Startup error: {}", e);
        tokio::time::sleep(STARTUP_FAULT_DELAY).await;
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = Config::default();
    if let Some(listen) = args.listen {
        config.server.listen_addr = listen;
    }
    if let Some(base_url) = args.base_url {
        config.upstream.base_url = base_url;
    }

    let gateway = Arc::new(HttpGateway::new(&config.upstream)?);
    let catalog = Arc::new(builtin_catalog()?);
    let addr = config.server.listen_addr.parse()?;

    tracing::info!(
        "Starting {} on {} ({} tools, upstream {})",
        SERVICE_NAME,
        addr,
        catalog.len(),
        config.upstream.base_url,
    );

    let server = Arc::new(IpcServer::new(
        Router::new(catalog, gateway),
        addr,
        config.ipc.clone(),
    ));

    let signal_server = server.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutting down server gracefully...");
            signal_server.shutdown();
        }
    });

    server.serve().await?;
    Ok(())
}
