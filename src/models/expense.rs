//! Expense and expense list models
//!
//! Expenses are owned by exactly one list and are only reachable through it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::currency::normalize_code;
use super::entry::{validate_entry, EntryValidationError};
use super::ids::{ExpenseId, ExpenseListId};

/// A single expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: f64,
    /// Currency code, not id
    pub currency: String,
    pub date: NaiveDate,
}

impl Expense {
    /// Create an expense from validated input
    pub fn from_new(new: NewExpense) -> Self {
        Self {
            id: ExpenseId::new(),
            description: new.description.trim().to_string(),
            amount: new.amount,
            currency: normalize_code(&new.currency),
            date: new.date,
        }
    }

    /// Merge a partial update into this expense
    pub fn apply(&mut self, update: &ExpenseUpdate) {
        if let Some(description) = &update.description {
            self.description = description.trim().to_string();
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(currency) = &update.currency {
            self.currency = normalize_code(currency);
        }
        if let Some(date) = update.date {
            self.date = date;
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_entry(&self.description, self.amount, &self.currency)
    }
}

/// Input for creating an expense
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            currency: currency.into(),
            date,
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_entry(&self.description, self.amount, &self.currency)
    }
}

/// Partial update for an expense
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub date: Option<NaiveDate>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.currency.is_none()
            && self.date.is_none()
    }
}

/// A named, ordered group of expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseList {
    pub id: ExpenseListId,
    pub name: String,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl ExpenseList {
    /// Create a new, empty list
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ExpenseListId::new(),
            name: name.into().trim().to_string(),
            expenses: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
