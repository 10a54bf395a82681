//! fintrack - multi-currency personal finance ledger
//!
//! Expenses are grouped into named lists, incomes sit in a flat collection,
//! and every amount carries its own currency code. A user-editable rate table
//! anchored at USD converts any amount into any other currency, so totals and
//! savings can be reported in whichever currency the user picks.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Currencies, expense lists, expenses and incomes
//! - `storage`: Key-value persistence backends
//! - `services`: The finance store, conversion and aggregation
//! - `cli` / `display`: The `fintrack` command line
//! - `log`: Tracing setup
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fintrack::models::NewIncome;
//! use fintrack::services::{FinanceStore, StorePolicy};
//! use fintrack::storage::JsonDirBackend;
//!
//! # fn main() -> fintrack::error::FinanceResult<()> {
//! let backend = Arc::new(JsonDirBackend::new("/tmp/fintrack"));
//! let store = FinanceStore::open(backend, StorePolicy::default())?;
//! store.add_income(NewIncome::new("Salary", 3000.0, "EUR"))?;
//! println!("Savings: {:.2} USD", store.savings(Some("USD"))?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod log;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
pub use services::FinanceStore;
