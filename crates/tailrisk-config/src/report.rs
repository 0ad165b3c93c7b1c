//! Risk report configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use tailrisk_core::{Holding, Symbol};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Two calendar years, the customary historical window.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 730;

// =============================================================================
// REFERENCE VALUE
// =============================================================================

/// Portfolio value that loss fractions are multiplied by for currency
/// amounts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceValue {
    /// Most recent portfolio value in the window.
    #[default]
    Latest,
    /// A fixed amount.
    Fixed(f64),
    /// Report loss fractions only.
    None,
}

// =============================================================================
// RISK REPORT CONFIGURATION
// =============================================================================

/// Configuration of one historical VaR/ES report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReportConfig {
    /// Configuration name/identifier.
    pub name: String,

    /// Description of this configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Shares held per symbol.
    #[serde(default)]
    pub shares: BTreeMap<Symbol, u64>,

    /// Confidence levels to report, each strictly between 0 and 1.
    #[serde(default = "default_confidence_levels")]
    pub confidence_levels: Vec<f64>,

    /// Calendar days of history, counted back from the as-of date.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Currency scaling.
    #[serde(default)]
    pub reference_value: ReferenceValue,
}

fn default_confidence_levels() -> Vec<f64> {
    vec![0.95, 0.99]
}

fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

impl RiskReportConfig {
    /// Creates a configuration with default levels, window and scaling and
    /// no holdings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            shares: BTreeMap::new(),
            confidence_levels: default_confidence_levels(),
            lookback_days: default_lookback_days(),
            reference_value: ReferenceValue::default(),
        }
    }

    /// Builder method to set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to add (or replace) a holding.
    #[must_use]
    pub fn with_holding(mut self, symbol: Symbol, shares: u64) -> Self {
        self.shares.insert(symbol, shares);
        self
    }

    /// Builder method to set confidence levels.
    #[must_use]
    pub fn with_confidence_levels(mut self, levels: Vec<f64>) -> Self {
        self.confidence_levels = levels;
        self
    }

    /// Builder method to set the lookback window.
    #[must_use]
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    /// Builder method to set currency scaling.
    #[must_use]
    pub fn with_reference_value(mut self, reference: ReferenceValue) -> Self {
        self.reference_value = reference;
        self
    }

    /// Holdings in symbol order.
    pub fn holdings(&self) -> Vec<Holding> {
        self.shares
            .iter()
            .map(|(symbol, shares)| Holding::new(symbol.clone(), *shares))
            .collect()
    }

    /// Symbols held, in order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.shares.keys().cloned().collect()
    }

    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads and validates a configuration file (`.toml` or `.json`).
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&std::fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Serializes to pretty TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Validate for RiskReportConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        if self.shares.is_empty() {
            errors.push(ValidationError::new("shares", "At least one holding is required"));
        } else if self.shares.values().all(|&s| s == 0) {
            errors.push(ValidationError::with_rule(
                "shares",
                "At least one holding must have shares",
                "non_zero_portfolio",
            ));
        }

        if self.confidence_levels.is_empty() {
            errors.push(ValidationError::new(
                "confidence_levels",
                "At least one confidence level is required",
            ));
        }
        for alpha in &self.confidence_levels {
            if !(*alpha > 0.0 && *alpha < 1.0) {
                errors.push(ValidationError::with_rule(
                    "confidence_levels",
                    format!("{alpha} must lie strictly between 0 and 1"),
                    "open_unit_interval",
                ));
            }
        }

        if self.lookback_days < 2 {
            errors.push(ValidationError::with_rule(
                "lookback_days",
                "Lookback must cover at least 2 days",
                "min_two_observations",
            ));
        }

        if let ReferenceValue::Fixed(value) = self.reference_value {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ValidationError::with_rule(
                    "reference_value",
                    format!("Fixed reference value must be positive, got {value}"),
                    "positive",
                ));
            }
        }

        errors
    }
}
