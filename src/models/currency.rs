//! Currency model
//!
//! A currency is a code plus the number of base units one unit of it is worth.
//! `USD` is the anchor of the rate table: its rate is exactly 1 and every
//! conversion passes through it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CurrencyId;

/// Code of the anchor currency
pub const ANCHOR_CODE: &str = "USD";

/// Normalize a currency code for storage and lookup
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Validation errors for currencies
#[derive(Debug, Clone, PartialEq)]
pub enum CurrencyValidationError {
    EmptyCode,
    InvalidCode(String),
    EmptyName,
    InvalidRate(f64),
    AnchorRate(f64),
}

impl fmt::Display for CurrencyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "Currency code cannot be empty"),
            Self::InvalidCode(code) => {
                write!(f, "Currency code '{}' must be letters and digits only", code)
            }
            Self::EmptyName => write!(f, "Currency name cannot be empty"),
            Self::InvalidRate(rate) => {
                write!(f, "Conversion rate must be a positive number, got {}", rate)
            }
            Self::AnchorRate(rate) => write!(
                f,
                "{} is the anchor currency and its rate must be 1, got {}",
                ANCHOR_CODE, rate
            ),
        }
    }
}

impl std::error::Error for CurrencyValidationError {}

/// A currency in the rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub id: CurrencyId,
    pub code: String,
    pub name: String,
    /// Base units per one unit of this currency
    pub conversion_rate: f64,
}

impl Currency {
    /// Create a new currency with a fresh id
    pub fn new(code: &str, name: impl Into<String>, conversion_rate: f64) -> Self {
        Self {
            id: CurrencyId::new(),
            code: normalize_code(code),
            name: name.into().trim().to_string(),
            conversion_rate,
        }
    }

    /// Whether this is the anchor currency
    pub fn is_anchor(&self) -> bool {
        self.code == ANCHOR_CODE
    }

    /// Whether this currency answers to `code`
    pub fn has_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    /// Merge a partial update into this currency
    pub fn apply(&mut self, update: &CurrencyUpdate) {
        if let Some(code) = &update.code {
            self.code = normalize_code(code);
        }
        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(rate) = update.conversion_rate {
            self.conversion_rate = rate;
        }
    }

    /// Validate the currency
    pub fn validate(&self) -> Result<(), CurrencyValidationError> {
        if self.code.is_empty() {
            return Err(CurrencyValidationError::EmptyCode);
        }
        if !self.code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CurrencyValidationError::InvalidCode(self.code.clone()));
        }
        if self.name.is_empty() {
            return Err(CurrencyValidationError::EmptyName);
        }
        if !self.conversion_rate.is_finite() || self.conversion_rate <= 0.0 {
            return Err(CurrencyValidationError::InvalidRate(self.conversion_rate));
        }
        if self.is_anchor() && self.conversion_rate != 1.0 {
            return Err(CurrencyValidationError::AnchorRate(self.conversion_rate));
        }
        Ok(())
    }

    /// The anchor currency
    pub fn anchor() -> Self {
        Self::new(ANCHOR_CODE, "US Dollar", 1.0)
    }

    /// Built-in rate table used when nothing is persisted yet
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::anchor(),
            Self::new("ARS", "Argentine Peso", 0.001),
            Self::new("EUR", "Euro", 1.1),
            Self::new("BTC", "Bitcoin", 60000.0),
        ]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Input for creating a currency
#[derive(Debug, Clone, PartialEq)]
pub struct NewCurrency {
    pub code: String,
    pub name: String,
    pub conversion_rate: f64,
}

impl NewCurrency {
    pub fn new(code: impl Into<String>, name: impl Into<String>, conversion_rate: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            conversion_rate,
        }
    }
}

/// Partial update for a currency; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencyUpdate {
    pub code: Option<String>,
    pub name: Option<String>,
    pub conversion_rate: Option<f64>,
}

impl CurrencyUpdate {
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.name.is_none() && self.conversion_rate.is_none()
    }
}
