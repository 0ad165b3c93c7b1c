//! Tailrisk CLI - historical Value-at-Risk and Expected Shortfall.
//!
//! # Usage
//!
//! ```bash
//! # Report VaR/ES for the portfolio in a config file
//! tailrisk report --config portfolio.toml --prices prices.csv
//!
//! # Same, with the window ending on a given date, as JSON
//! tailrisk --format json report --config portfolio.toml --prices prices.csv --as-of 2024-06-28
//!
//! # Estimate directly from a column of losses
//! tailrisk estimate --losses losses.csv --alpha 0.95 --alpha 0.99
//! ```
//!
//! Diagnostics go to stderr and follow `RUST_LOG` (default `warn`).

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match cli.command {
        Commands::Report(args) => commands::report::execute(args, format, cli.quiet).await?,
        Commands::Estimate(args) => commands::estimate::execute(args, format, cli.quiet)?,
    }

    Ok(())
}
