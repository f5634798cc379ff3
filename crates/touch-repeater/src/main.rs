//! TouchBridge repeater — entry point.
//!
//! Accepts WebSocket connections from touch-input clients and forwards
//! their events to the sink each connection's path selects: `/console`,
//! `/mouse`, `/tuio`, `/win7`, or `/win8`.
//!
//! # Usage
//!
//! ```text
//! touch-repeater [OPTIONS]
//!
//! Options:
//!   --listen <ADDR>   Listen endpoint, e.g. 0.0.0.0:8282
//!   --config <FILE>   TOML file holding the persisted default endpoint
//! ```
//!
//! The endpoint is resolved in order of precedence: `--listen`, then the
//! config file's `listen` key, then the built-in default `0.0.0.0:8282`.
//! Log output is controlled by `RUST_LOG` (default `info`); Ctrl+C shuts
//! the server down gracefully.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use touch_repeater::application::{native_context, standard_routes, ForwarderRegistry};
use touch_repeater::domain::config::{FileConfig, RepeaterConfig};
use touch_repeater::infrastructure::{run_server, ServerState};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// TouchBridge repeater.
///
/// Forwards touch events from WebSocket clients to console, pointer, TUIO,
/// or touch-injection sinks.
#[derive(Debug, Parser)]
#[command(
    name = "touch-repeater",
    about = "WebSocket touch-event repeater",
    version
)]
struct Cli {
    /// Listen endpoint (address:port) for the WebSocket server.
    ///
    /// Overrides the persisted default from --config when both are given.
    #[arg(long, env = "TOUCH_LISTEN")]
    listen: Option<String>,

    /// TOML file holding the persisted default endpoint.
    #[arg(long, env = "TOUCH_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Resolves the runtime configuration: CLI argument, then config file,
    /// then built-in default.
    ///
    /// # Errors
    ///
    /// Returns an error when `--listen` is not a valid socket address or
    /// the config file cannot be read or parsed.
    fn into_repeater_config(self) -> anyhow::Result<RepeaterConfig> {
        if let Some(listen) = self.listen {
            let listen_addr: SocketAddr = listen
                .parse()
                .with_context(|| format!("invalid listen endpoint: '{listen}'"))?;
            return Ok(RepeaterConfig { listen_addr });
        }

        if let Some(path) = self.config {
            let file = FileConfig::load(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            return Ok(file.into_repeater_config()?);
        }

        Ok(RepeaterConfig::default())
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.into_repeater_config()?;

    info!("TouchBridge repeater starting on {}", config.listen_addr);

    // Route table over the platform's real devices plus the shared
    // connection registry.
    let state = Arc::new(ServerState {
        dispatcher: standard_routes(native_context()),
        registry: ForwarderRegistry::new(),
    });

    // Graceful shutdown: Ctrl+C clears the flag the accept loop checks.
    let running = Arc::new(AtomicBool::new(true));
    let running_signal = Arc::clone(&running);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C — shutting down");
                running_signal.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C: {e}");
            }
        }
    });

    run_server(config, state, running).await?;

    info!("TouchBridge repeater stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
