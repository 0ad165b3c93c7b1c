//! Estimate command implementation.
//!
//! Runs the estimator over a single column of losses read from a file or
//! stdin.

use std::io::Read;

use anyhow::Result;
use clap::Args;

use tailrisk_risk::calculator::{HistoricalRiskCalculator, RiskReport, STANDARD_CONFIDENCE_LEVELS};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_levels, print_table, KeyValue};

/// Arguments for the estimate command.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// CSV file with one loss per row in its first column, or `-` for stdin.
    /// A non-numeric first row is taken as a header.
    #[arg(short, long)]
    pub losses: String,

    /// Confidence level, strictly between 0 and 1 (repeatable)
    #[arg(short, long = "alpha", num_args = 1.., default_values_t = STANDARD_CONFIDENCE_LEVELS)]
    pub alphas: Vec<f64>,

    /// Treat the column as returns (losses are their negation)
    #[arg(long)]
    pub returns: bool,

    /// Portfolio value for currency amounts
    #[arg(long)]
    pub reference_value: Option<f64>,
}

/// Execute the estimate command.
pub fn execute(args: EstimateArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let input: Box<dyn Read> = if args.losses == "-" {
        Box::new(std::io::stdin())
    } else {
        Box::new(std::fs::File::open(&args.losses).map_err(CliError::from)?)
    };

    let mut values = read_column(input)?;
    if args.returns {
        values.iter_mut().for_each(|v| *v = -*v);
    }
    tracing::info!("read {} observations from {}", values.len(), args.losses);

    let report = estimate(values, args.alphas, args.reference_value)?;

    if format == OutputFormat::Table && !quiet {
        print_header("Historical VaR / ES");
        print_table(&[
            KeyValue::new("Observations", report.summary.observations.to_string()),
            KeyValue::new("Worst Loss", format!("{:.4}%", report.summary.worst * 100.0)),
        ])?;
    }
    print_levels(&report, format)?;

    let failed = report.levels.iter().filter(|l| l.estimate.is_err()).count();
    if failed > 0 {
        return Err(CliError::LevelsFailed {
            failed,
            total: report.levels.len(),
        }
        .into());
    }

    Ok(())
}

/// Builds a report over `losses` at each of `alphas`.
pub fn estimate(
    losses: Vec<f64>,
    alphas: Vec<f64>,
    reference_value: Option<f64>,
) -> CliResult<RiskReport> {
    let mut calculator = HistoricalRiskCalculator::new(losses)?.with_confidence_levels(alphas);
    if let Some(value) = reference_value {
        calculator = calculator.with_reference_value(value);
    }
    Ok(calculator.report()?)
}

/// Reads the first column of a headerless or single-header CSV as numbers.
pub fn read_column<R: Read>(reader: R) -> CliResult<Vec<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| CliError::InvalidLosses(e.to_string()))?;
        let Some(cell) = record.get(0).filter(|c| !c.is_empty()) else {
            continue;
        };
        match cell.parse::<f64>() {
            Ok(value) if value.is_finite() => values.push(value),
            Ok(value) => {
                return Err(CliError::InvalidLosses(format!(
                    "row {}: {value} is not finite",
                    row + 1
                )))
            }
            Err(_) if row == 0 => {}
            Err(_) => {
                return Err(CliError::InvalidLosses(format!(
                    "row {}: cannot parse {cell:?}",
                    row + 1
                )))
            }
        }
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailrisk_risk::RiskError;

    #[test]
    fn test_read_column_with_header_and_blank_lines() {
        let input = "loss,note\n0.01,a\n\n-0.02,b\n0.03\n";
        assert_eq!(read_column(input.as_bytes()).unwrap(), vec![0.01, -0.02, 0.03]);
    }

    #[test]
    fn test_read_column_without_header() {
        assert_eq!(read_column("0.5\n0.25\n".as_bytes()).unwrap(), vec![0.5, 0.25]);
    }

    #[test]
    fn test_read_column_rejects_bad_rows() {
        assert!(matches!(
            read_column("loss\n0.01\nabc\n".as_bytes()),
            Err(CliError::InvalidLosses(_))
        ));
        assert!(matches!(
            read_column("0.01\nNaN\n".as_bytes()),
            Err(CliError::InvalidLosses(_))
        ));
    }

    #[test]
    fn test_estimate_empty_is_insufficient() {
        assert!(matches!(
            estimate(vec![], vec![0.95], None),
            Err(CliError::Calculation(RiskError::InsufficientData { .. }))
        ));
    }

    #[test]
    fn test_estimate_reference_scaling() {
        let losses = vec![-0.01, 0.02, -0.03, 0.01, -0.05, 0.04, -0.02, 0.03, -0.04, 0.05];
        let report = estimate(losses, vec![0.9], Some(1_000.0)).unwrap();
        let currency = report.levels[0].currency.as_ref().unwrap();
        assert_eq!(currency.var, rust_decimal::Decimal::new(4100, 2));
    }
}
