//! Income model
//!
//! Incomes live in a flat collection and carry their own currency code.

use serde::{Deserialize, Serialize};

use super::currency::normalize_code;
use super::entry::{validate_entry, EntryValidationError};
use super::ids::IncomeId;

/// A recorded income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    pub description: String,
    pub amount: f64,
    pub currency: String,
}

impl Income {
    pub fn from_new(new: NewIncome) -> Self {
        Self {
            id: IncomeId::new(),
            description: new.description.trim().to_string(),
            amount: new.amount,
            currency: normalize_code(&new.currency),
        }
    }

    /// Merge a partial update into this income
    pub fn apply(&mut self, update: &IncomeUpdate) {
        if let Some(description) = &update.description {
            self.description = description.trim().to_string();
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(currency) = &update.currency {
            self.currency = normalize_code(currency);
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_entry(&self.description, self.amount, &self.currency)
    }
}

/// Input for creating an income
#[derive(Debug, Clone, PartialEq)]
pub struct NewIncome {
    pub description: String,
    pub amount: f64,
    pub currency: String,
}

impl NewIncome {
    pub fn new(description: impl Into<String>, amount: f64, currency: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            amount,
            currency: currency.into(),
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_entry(&self.description, self.amount, &self.currency)
    }
}

/// Partial update for an income
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomeUpdate {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

impl IncomeUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none() && self.currency.is_none()
    }
}
