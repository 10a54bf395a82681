//! Core data models for fintrack
//!
//! Currencies, expense lists with their expenses, and incomes.

pub mod currency;
pub mod entry;
pub mod expense;
pub mod ids;
pub mod income;

pub use currency::{normalize_code, Currency, CurrencyUpdate, NewCurrency, ANCHOR_CODE};
pub use entry::EntryValidationError;
pub use expense::{Expense, ExpenseList, ExpenseUpdate, NewExpense};
pub use ids::{CurrencyId, ExpenseId, ExpenseListId, IncomeId};
pub use income::{Income, IncomeUpdate, NewIncome};
