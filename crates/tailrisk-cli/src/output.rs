//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use tailrisk_risk::calculator::{LevelRisk, RiskReport};

use crate::cli::OutputFormat;

/// One confidence level as a table row.
#[derive(Debug, Clone, Tabled)]
pub struct LevelRow {
    #[tabled(rename = "Level")]
    pub level: String,
    #[tabled(rename = "VaR")]
    pub var: String,
    #[tabled(rename = "ES")]
    pub es: String,
    #[tabled(rename = "Tail")]
    pub tail: String,
    #[tabled(rename = "VaR ($)")]
    pub var_amount: String,
    #[tabled(rename = "ES ($)")]
    pub es_amount: String,
}

impl From<&LevelRisk> for LevelRow {
    fn from(level: &LevelRisk) -> Self {
        let amount = |f: fn(&tailrisk_risk::var::CurrencyRisk) -> Decimal| {
            level
                .currency
                .as_ref()
                .map_or_else(|| "-".to_string(), |c| format!("{:.2}", f(c)))
        };

        match &level.estimate {
            Ok(e) => Self {
                level: format_level(level.alpha),
                var: format!("{:.4}%", e.var * 100.0),
                es: format!("{:.4}%", e.es * 100.0),
                tail: format!("{} / {}", e.tail_count, e.observations),
                var_amount: amount(|c| c.var),
                es_amount: amount(|c| c.es),
            },
            Err(_) => Self {
                level: format_level(level.alpha),
                var: "n/a".to_string(),
                es: "n/a".to_string(),
                tail: "-".to_string(),
                var_amount: "-".to_string(),
                es_amount: "-".to_string(),
            },
        }
    }
}

/// One confidence level as a CSV record.
#[derive(Debug, Clone, Serialize)]
pub struct LevelRecord {
    pub alpha: f64,
    pub var: Option<f64>,
    pub es: Option<f64>,
    pub tail_count: Option<usize>,
    pub observations: Option<usize>,
    pub var_amount: Option<Decimal>,
    pub es_amount: Option<Decimal>,
    pub error: Option<String>,
}

impl From<&LevelRisk> for LevelRecord {
    fn from(level: &LevelRisk) -> Self {
        let estimate = level.estimate.as_ref().ok();
        Self {
            alpha: level.alpha,
            var: estimate.map(|e| e.var),
            es: estimate.map(|e| e.es),
            tail_count: estimate.map(|e| e.tail_count),
            observations: estimate.map(|e| e.observations),
            var_amount: level.currency.as_ref().map(|c| c.var),
            es_amount: level.currency.as_ref().map(|c| c.es),
            error: level.estimate.as_ref().err().map(ToString::to_string),
        }
    }
}

/// Prints the per-level results of a report.
///
/// JSON output is left to the caller, which knows the surrounding context.
pub fn print_levels(report: &RiskReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<LevelRow> = report.levels.iter().map(LevelRow::from).collect();
            print_table(&rows)?;
            for level in &report.levels {
                if let Err(err) = &level.estimate {
                    print_warning(&format!("{}: {err}", format_level(level.alpha)));
                }
            }
        }
        OutputFormat::Csv => {
            let records: Vec<LevelRecord> = report.levels.iter().map(LevelRecord::from).collect();
            print_csv(&records)?;
        }
        OutputFormat::Minimal => {
            for level in &report.levels {
                match &level.estimate {
                    Ok(e) => println!("{} {:.6} {:.6} {}", level.alpha, e.var, e.es, e.tail_count),
                    Err(err) => println!("{} error: {err}", level.alpha),
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a confidence level as a percentage label.
pub fn format_level(alpha: f64) -> String {
    let pct = alpha * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{:.0}%", pct)
    } else {
        format!("{}%", (pct * 1e6).round() / 1e6)
    }
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailrisk_risk::calculator::HistoricalRiskCalculator;

    fn report() -> RiskReport {
        HistoricalRiskCalculator::new(vec![
            -0.01, 0.02, -0.03, 0.01, -0.05, 0.04, -0.02, 0.03, -0.04, 0.05,
        ])
        .unwrap()
        .with_confidence_levels(vec![0.9, 1.5])
        .with_reference_value(1_000.0)
        .report()
        .unwrap()
    }

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(0.95), "95%");
        assert_eq!(format_level(0.99), "99%");
        assert_eq!(format_level(0.975), "97.5%");
    }

    #[test]
    fn test_level_row_success_and_failure() {
        let report = report();
        let ok = LevelRow::from(&report.levels[0]);
        assert_eq!(ok.level, "90%");
        assert_eq!(ok.var, "4.1000%");
        assert_eq!(ok.es, "5.0000%");
        assert_eq!(ok.tail, "1 / 10");
        assert_eq!(ok.var_amount, "41.00");

        let failed = LevelRow::from(&report.levels[1]);
        assert_eq!(failed.var, "n/a");
        assert_eq!(failed.var_amount, "-");
    }

    #[test]
    fn test_level_record_carries_error_text() {
        let report = report();
        let failed = LevelRecord::from(&report.levels[1]);
        assert!(failed.var.is_none());
        assert!(failed.error.unwrap().contains("1.5"));

        let ok = LevelRecord::from(&report.levels[0]);
        assert_eq!(ok.tail_count, Some(1));
        assert!(ok.error.is_none());
    }
}
