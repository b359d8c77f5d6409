//! idctl - CLI for kindid identifiers
//!
//! Mints identifiers of the built-in kinds (`acct`, `ses`, `meet`), parses
//! identifiers back into their parts, and exposes the raw base-36 codec.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;
mod config;
mod kinds;
mod output;

use commands::Cli;
use config::Config;

fn main() {
    if let Err(e) = run() {
        output::print_error(&e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config(Config::from_env()?)?;

    // Initialize tracing (prefer RUST_LOG, fallback to IDCTL_LOG_LEVEL)
    let fmt_layer = if config.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(fmt_layer)
        .init();

    kinds::declare().context("Failed to declare built-in identifier kinds")?;
    debug!(
        format = ?config.format,
        source = ?config.source,
        "Configuration loaded"
    );

    cli.run(config)
}
