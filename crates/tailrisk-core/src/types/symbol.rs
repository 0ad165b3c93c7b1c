//! Instrument symbol.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Ticker symbol identifying an instrument (e.g. `AAPL`, `BRK.B`).
///
/// Symbols are trimmed and uppercased on construction so that price files
/// and holdings can be matched case-insensitively.
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSymbol` if the symbol is empty or contains
    /// whitespace.
    pub fn new(symbol: impl AsRef<str>) -> CoreResult<Self> {
        let trimmed = symbol.as_ref().trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidSymbol(symbol.as_ref().to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = CoreError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}
