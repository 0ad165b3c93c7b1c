//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{EstimateArgs, ReportArgs};

/// Tailrisk - historical VaR and Expected Shortfall for equity portfolios
#[derive(Parser)]
#[command(name = "tailrisk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Report VaR/ES for a configured portfolio over its price history
    Report(ReportArgs),

    /// Estimate VaR/ES from a column of losses (or returns)
    Estimate(EstimateArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (one line per confidence level)
    Minimal,
}
