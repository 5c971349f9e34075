//! # Vitrine Admin CLI
//!
//! Runs one product operation against the shop backend and prints the
//! resulting store state as JSON.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()           RUST_LOG or "info,vitrine=debug", stderr  │
//! │  2. ClientConfig::load()     defaults → vitrine.toml → environment     │
//! │  3. HttpTransport            reqwest client on api.base_url            │
//! │  4. ProductStore             TracingNotifier for toasts                │
//! │  5. command.run(&store)      one store operation                       │
//! │  6. store.settle()           wait for refetches after create/delete    │
//! │  7. print snapshot           stdout, pretty JSON                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitrine_client::{ClientConfig, HttpTransport, ProductStore, TracingNotifier, UploadWidgetConfig};

use crate::commands::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    // An explicit --config must load; the platform default falls back.
    let mut config = match cli.config.clone() {
        Some(path) => ClientConfig::load(Some(path)).context("loading configuration")?,
        None => ClientConfig::load_or_default(None),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
        config.validate().context("validating --api-url")?;
    }

    if let Command::UploadConfig = cli.command {
        let options = UploadWidgetConfig::from_settings(&config.upload)
            .context("upload widget is not configured")?;
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    let transport = HttpTransport::new(config.base_url()?)?;
    info!(base_url = %transport.base_url(), "Using product API");

    let store = ProductStore::new(Arc::new(transport), Arc::new(TracingNotifier));
    let outcome = cli.command.run(&store).await;
    store.settle().await;

    println!("{}", serde_json::to_string_pretty(&store.snapshot())?);

    outcome.map_err(anyhow::Error::msg)
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug`: every dispatched action and HTTP request
/// - `RUST_LOG=info`: settled operations and toasts (default for dependencies)
/// - `RUST_LOG=warn`: failures only
///
/// Logs go to stderr so stdout stays valid JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vitrine=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
