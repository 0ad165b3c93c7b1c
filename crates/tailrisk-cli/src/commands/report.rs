//! Report command implementation.
//!
//! Loads a portfolio configuration and a price file, builds the daily loss
//! series over the lookback window and reports VaR/ES per confidence level.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use tailrisk_config::{ReferenceValue, RiskReportConfig, Validate};
use tailrisk_core::{Date, Holding, PriceSeries};
use tailrisk_ext_file::CsvPriceSource;
use tailrisk_risk::calculator::{HistoricalRiskCalculator, RiskReport};
use tailrisk_risk::returns::{log_returns, portfolio_values};
use tailrisk_traits::PriceHistorySource;

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::error::{CliError, CliResult};
use crate::output::{format_level, print_header, print_levels, print_table, KeyValue};

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Report configuration (.toml or .json)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Adjusted-close prices (CSV, long or wide layout)
    #[arg(short, long)]
    pub prices: PathBuf,

    /// Last date of the window (YYYY-MM-DD). Defaults to the last date on
    /// which every holding has a price.
    #[arg(long)]
    pub as_of: Option<String>,

    /// Lookback window in calendar days, overriding the configuration
    #[arg(long)]
    pub lookback_days: Option<u32>,
}

/// A risk report with the portfolio and window it was computed for.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioReport {
    /// Configuration name.
    pub name: String,
    /// Holdings, in symbol order.
    pub holdings: Vec<Holding>,
    /// First calendar day of the window.
    pub start: Date,
    /// Last calendar day of the window.
    pub as_of: Date,
    /// Window length in calendar days.
    pub lookback_days: u32,
    /// Loss statistics and per-level estimates.
    #[serde(flatten)]
    pub report: RiskReport,
}

impl PortfolioReport {
    /// Number of confidence levels without an estimate.
    pub fn failed_levels(&self) -> usize {
        self.report
            .levels
            .iter()
            .filter(|l| l.estimate.is_err())
            .count()
    }
}

/// Execute the report command.
pub async fn execute(args: ReportArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let mut config = RiskReportConfig::from_file(&args.config).map_err(CliError::from)?;
    if let Some(days) = args.lookback_days {
        config = config.with_lookback_days(days);
    }
    let source = CsvPriceSource::new(&args.prices).map_err(CliError::from)?;
    let as_of = args.as_of.as_deref().map(parse_date).transpose()?;

    let outcome = build_report(&config, &source, as_of).await?;

    match format {
        OutputFormat::Table => {
            if !quiet {
                print_header(&format!("Historical VaR / ES: {}", outcome.name));
                print_table(&summary_rows(&outcome))?;
            }
            print_levels(&outcome.report, format)?;
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Csv | OutputFormat::Minimal => print_levels(&outcome.report, format)?,
    }

    let failed = outcome.failed_levels();
    if failed > 0 {
        return Err(CliError::LevelsFailed {
            failed,
            total: outcome.report.levels.len(),
        }
        .into());
    }

    Ok(())
}

/// Builds the report for `config` from prices served by `source`.
///
/// The window covers the configured lookback in calendar days up to and
/// including `as_of`. Without `as_of`, the window ends on the last date on
/// which every holding has a price.
///
/// # Errors
///
/// Fails if the configuration is invalid, the window start is not a
/// representable date, prices cannot be served, or the window holds fewer
/// than two common observations.
pub async fn build_report(
    config: &RiskReportConfig,
    source: &dyn PriceHistorySource,
    as_of: Option<Date>,
) -> CliResult<PortfolioReport> {
    config.validate_or_error()?;
    let lookback_days = config.lookback_days;
    let holdings = config.holdings();
    let symbols = config.symbols();

    let as_of = match as_of {
        Some(date) => date,
        None => {
            let histories = source.get_histories(&symbols, Date::MIN, Date::MAX).await?;
            portfolio_values(&positions(&holdings, &histories))?
                .latest()
                .map(|(date, _)| date)
                .ok_or_else(|| {
                    let names: Vec<String> = symbols.iter().map(ToString::to_string).collect();
                    CliError::NoCommonHistory(names.join(", "))
                })?
        }
    };
    let start = as_of.checked_add_days(-i64::from(lookback_days))?;

    let histories = source.get_histories(&symbols, start, as_of).await?;
    let values = portfolio_values(&positions(&holdings, &histories))?;
    let losses = log_returns(&values)?.losses();

    tracing::info!(
        "{}: {} losses from {} to {}",
        config.name,
        losses.len(),
        start,
        as_of
    );

    let mut calculator = HistoricalRiskCalculator::from_loss_series(&losses)?
        .with_confidence_levels(config.confidence_levels.clone());
    match config.reference_value {
        ReferenceValue::Latest => {
            if let Some((_, value)) = values.latest() {
                calculator = calculator.with_reference_value(value);
            }
        }
        ReferenceValue::Fixed(value) => calculator = calculator.with_reference_value(value),
        ReferenceValue::None => {}
    }

    Ok(PortfolioReport {
        name: config.name.clone(),
        holdings,
        start,
        as_of,
        lookback_days,
        report: calculator.report()?,
    })
}

fn positions<'a>(holdings: &[Holding], histories: &'a [PriceSeries]) -> Vec<(Holding, &'a PriceSeries)> {
    holdings.iter().cloned().zip(histories).collect()
}

fn summary_rows(outcome: &PortfolioReport) -> Vec<KeyValue> {
    let summary = &outcome.report.summary;
    let holdings: Vec<String> = outcome
        .holdings
        .iter()
        .map(|h| format!("{} x{}", h.symbol, h.shares))
        .collect();

    let mut rows = vec![
        KeyValue::new("Holdings", holdings.join(", ")),
        KeyValue::new("Window", format!("{} to {}", outcome.start, outcome.as_of)),
        KeyValue::new("Observations", summary.observations.to_string()),
        KeyValue::new("Mean Loss", format!("{:.4}%", summary.mean * 100.0)),
        KeyValue::new(
            "Std Dev",
            summary
                .std_dev
                .map_or_else(|| "-".to_string(), |s| format!("{:.4}%", s * 100.0)),
        ),
        KeyValue::new("Worst Loss", format!("{:.4}%", summary.worst * 100.0)),
    ];
    if let Some(reference) = outcome.report.reference_value {
        rows.push(KeyValue::new("Reference Value", format!("{reference:.2}")));
    }
    let levels: Vec<String> = outcome
        .report
        .levels
        .iter()
        .map(|l| format_level(l.alpha))
        .collect();
    rows.push(KeyValue::new("Levels", levels.join(", ")));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailrisk_config::ConfigError;
    use tailrisk_core::{CoreError, PricePoint, Symbol};
    use tailrisk_ext_file::InMemoryPriceSource;
    use tailrisk_risk::RiskError;

    fn series(symbol: &str, prices: &[f64]) -> PriceSeries {
        let first = Date::from_ymd(2024, 1, 1).unwrap();
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, p)| PricePoint::new(first.add_days(i as i64), *p))
            .collect();
        PriceSeries::new(Symbol::new(symbol).unwrap(), points).unwrap()
    }

    fn config() -> RiskReportConfig {
        RiskReportConfig::new("test")
            .with_holding(Symbol::new("AAA").unwrap(), 2)
            .with_holding(Symbol::new("BBB").unwrap(), 1)
            .with_confidence_levels(vec![0.5])
    }

    fn source() -> InMemoryPriceSource {
        InMemoryPriceSource::from_series([
            series("AAA", &[10.0, 11.0, 10.5, 9.0, 9.5]),
            series("BBB", &[20.0, 19.0, 21.0, 22.0]),
        ])
    }

    #[tokio::test]
    async fn test_default_as_of_is_last_common_date() {
        let outcome = build_report(&config(), &source(), None).await.unwrap();

        assert_eq!(outcome.as_of, Date::from_ymd(2024, 1, 4).unwrap());
        assert_eq!(outcome.report.summary.observations, 3);
        // latest common value: 2 * 9.0 + 22.0
        assert_eq!(outcome.report.reference_value, Some(rust_decimal::Decimal::from(40)));
        assert_eq!(outcome.failed_levels(), 0);
    }

    #[tokio::test]
    async fn test_lookback_window_trims_history() {
        let as_of = Date::from_ymd(2024, 1, 4).unwrap();
        let config = config().with_lookback_days(2);
        let outcome = build_report(&config, &source(), Some(as_of)).await.unwrap();

        assert_eq!(outcome.start, Date::from_ymd(2024, 1, 2).unwrap());
        assert_eq!(outcome.report.summary.observations, 2);
    }

    #[tokio::test]
    async fn test_lookback_beyond_calendar_is_an_error() {
        let config = config().with_lookback_days(200_000_000);
        let result = build_report(&config, &source(), None).await;
        assert!(matches!(
            result,
            Err(CliError::Date(CoreError::InvalidDate { .. }))
        ));
    }

    #[tokio::test]
    async fn test_lookback_below_two_days_rejected() {
        for days in [0, 1] {
            let config = config().with_lookback_days(days);
            let result = build_report(&config, &source(), None).await;
            assert!(matches!(
                result,
                Err(CliError::Config(ConfigError::Validation { ref field, .. })) if field == "lookback_days"
            ));
        }
    }

    #[tokio::test]
    async fn test_fixed_and_absent_reference_value() {
        let fixed = config().with_reference_value(ReferenceValue::Fixed(1_000.0));
        let outcome = build_report(&fixed, &source(), None).await.unwrap();
        assert_eq!(outcome.report.reference_value, Some(rust_decimal::Decimal::from(1000)));

        let none = config().with_reference_value(ReferenceValue::None);
        let outcome = build_report(&none, &source(), None).await.unwrap();
        assert!(outcome.report.reference_value.is_none());
        assert!(outcome.report.levels[0].currency.is_none());
    }

    #[tokio::test]
    async fn test_window_with_one_price_is_insufficient() {
        let as_of = Date::from_ymd(2024, 1, 1).unwrap();
        let result = build_report(&config(), &source(), Some(as_of)).await;
        assert!(matches!(
            result,
            Err(CliError::Calculation(RiskError::InsufficientData { .. }))
        ));
    }

    #[tokio::test]
    async fn test_unknown_symbol_and_disjoint_histories() {
        let missing = config().with_holding(Symbol::new("ZZZ").unwrap(), 1);
        assert!(matches!(
            build_report(&missing, &source(), None).await,
            Err(CliError::Source(_))
        ));

        let disjoint = InMemoryPriceSource::from_series([
            series("AAA", &[10.0, 11.0]),
            PriceSeries::new(
                Symbol::new("BBB").unwrap(),
                vec![PricePoint::new(Date::from_ymd(2025, 1, 1).unwrap(), 5.0)],
            )
            .unwrap(),
        ]);
        assert!(matches!(
            build_report(&config(), &disjoint, None).await,
            Err(CliError::NoCommonHistory(_))
        ));
    }
}
