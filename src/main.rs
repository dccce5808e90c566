//! # cdp-dispatch-tail
//!
//! Reads CDP frames from stdin, one JSON object per line, and prints every
//! `Network.requestWillBeSent` whose URL passes the configured include and
//! exclude patterns as `METHOD URL`.
//!
//! ## Usage
//! ```text
//! cdp-dispatch-tail [config.toml] < frames.ndjson
//! ```
//!
//! ## Environment variables
//! - `RUST_LOG`: tracing filter (falls back to `log_level`)
//! - `CDP_DISPATCH_LOG_LEVEL`: default log level (default: info)
//! - `CDP_DISPATCH_INCLUDE`: comma-separated include patterns (default: `.*`)
//! - `CDP_DISPATCH_EXCLUDE`: comma-separated exclude patterns
//! - `CDP_DISPATCH_DECODE_FAILURE`: `skip` or `fail` (default: skip)
//! - `CDP_DISPATCH_STOP_AFTER`: exit after this many printed requests

use anyhow::Context;
use cdp_dispatch::{config::Config, tail::Tail};
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1);
    let config = Config::load(config_path.as_deref()).context("failed to load configuration")?;

    // Initialize tracing - RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("cdp-dispatch-tail v{}", cdp_dispatch::VERSION);
    debug!("Configuration: {:?}", config);

    let runtime = tokio::runtime::Runtime::new().context("failed to start the runtime")?;
    let result = runtime.block_on(run(config));

    // A stdin read blocks its thread until input arrives and cannot be aborted
    runtime.shutdown_background();
    result
}

async fn run(config: Config) -> anyhow::Result<()> {
    let tail = Tail::from_config(&config).context("invalid configuration")?;

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    let summary = tail
        .run(input, &mut out, shutdown)
        .await
        .context("event dispatch failed")?;

    info!("Done ({:?}), {} requests printed", summary.exit, summary.printed);
    Ok(())
}

/// Cancel `shutdown` on SIGINT/SIGTERM (Ctrl+C elsewhere)
async fn wait_for_signal(shutdown: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut sigterm, mut sigint) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to install signal handlers: {}", e);
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM signal");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT signal");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C signal");
        }
    }

    shutdown.cancel();
}
