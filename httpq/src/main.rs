//! httpq - bounded FIFO work queues over HTTP
//!
//! Producers POST a payload to a configured path, consumers GET from the same
//! path and wait until an entry is available.

mod config;
mod logging;

use anyhow::Context;
use clap::Parser;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "httpq")]
#[command(about = "Bounded FIFO work queues over HTTP", long_about = None)]
struct Args {
    /// JSON configuration file; built-in defaults are used when omitted
    config: Option<PathBuf>,

    /// Host to bind to, overrides the configuration file
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides the configuration file
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "HTTPQ_LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    logging::init(&config.log_target(), &args.log_level)?;

    let addr = config.listen_addr();
    info!(listen = %addr, "Start");

    let app = httpq_core::create_router(&config.queues, config.max_body_bytes)?;

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to listen on {addr}"))?;
    let server =
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .into_future();

    // Suspended requests never drain; Ctrl-C drops them.
    tokio::select! {
        result = server => result?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted"),
    }

    info!("Finish");
    Ok(())
}
