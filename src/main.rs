//! Mocky (v1)
//!
//! A simple OpenAPI mock server built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                        MOCKY                          │
//!   openapi.yaml      │  ┌─────────┐    ┌──────────┐    ┌────────────────┐    │
//!   ──────────────────┼─▶│  spec   │───▶│ routing  │───▶│   RouteTable   │    │
//!                     │  │ loader  │    │ compiler │    │  (immutable)   │    │
//!                     │  └─────────┘    └──────────┘    └───────┬────────┘    │
//!                     │                                         │             │
//!   Client Request    │  ┌─────────┐    ┌──────────┐    ┌───────▼────────┐    │
//!   ──────────────────┼─▶│  http   │───▶│  admin   │ or │   dispatch     │    │
//!                     │  │ server  │    │ /mocky/* │    │ match → select │    │
//!                     │  └─────────┘    └──────────┘    │  → render      │    │
//!   Client Response   │                                 └───────┬────────┘    │
//!   ◀─────────────────┼─────────────────────────────────────────┘             │
//!                     │                                                       │
//!                     │  Cross-cutting: config, observability, lifecycle      │
//!                     └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use mocky::config::ObservabilityConfig;
use mocky::lifecycle::{signals, startup, Overrides, Shutdown, Startup};
use mocky::observability::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "mocky",
    about = "Mocky - A simple OpenAPI Mock Server to simulate API responses based on OpenAPI specifications",
    version
)]
struct Args {
    /// Path to the OpenAPI specification file (YAML or JSON format)
    #[arg(long, default_value = "openapi.yaml")]
    file: PathBuf,

    /// Port number on which the server will listen
    #[arg(long)]
    port: Option<u16>,

    /// Hostname or IP address to bind the server to
    #[arg(long)]
    host: Option<String>,

    /// Enable debug mode for more detailed logging
    #[arg(long)]
    debug: bool,

    /// Enable request metrics, served at /mocky/metrics
    #[arg(long)]
    otel: bool,

    /// Optional TOML settings file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let overrides = Overrides {
        host: args.host,
        port: args.port,
        debug: args.debug,
        otel: args.otel,
    };

    let config = match startup::resolve_config(args.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default(), args.debug);
            fail(e)
        }
    };
    init_logging(&config.observability, args.debug);

    tracing::info!("mocky v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        spec = %args.file.display(),
        bind_address = %config.bind_address(),
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    let prepared = match Startup::new(args.file.clone(), config).prepare().await {
        Ok(prepared) => prepared,
        Err(e) => fail(e),
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move { signals::forward_signals(&shutdown).await }
    });

    prepared.server.run(prepared.listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Report a startup failure once and exit non-zero.
fn fail(error: startup::StartupError) -> ! {
    tracing::error!(error = %error, "Startup failed");
    eprintln!("mocky: {error}");
    std::process::exit(1);
}
