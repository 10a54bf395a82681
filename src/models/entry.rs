//! Shared rules for amount-bearing ledger entries (expenses and incomes)

use std::fmt;

/// Validation errors for expenses and incomes
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    EmptyDescription,
    NonPositiveAmount(f64),
    MissingCurrency,
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be a positive number, got {}", amount)
            }
            Self::MissingCurrency => write!(f, "Currency code is required"),
        }
    }
}

impl std::error::Error for EntryValidationError {}

/// Check the fields every entry must carry
pub fn validate_entry(
    description: &str,
    amount: f64,
    currency: &str,
) -> Result<(), EntryValidationError> {
    if description.trim().is_empty() {
        return Err(EntryValidationError::EmptyDescription);
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(EntryValidationError::NonPositiveAmount(amount));
    }
    if currency.trim().is_empty() {
        return Err(EntryValidationError::MissingCurrency);
    }
    Ok(())
}
