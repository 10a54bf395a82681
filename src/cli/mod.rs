//! CLI command handlers
//!
//! This module bridges clap argument parsing with the finance store. Lists
//! are addressed by name or id, currencies by code, expenses and incomes by
//! id or the short id shown in tables.

pub mod currency;
pub mod expense;
pub mod income;
pub mod list;
pub mod reset;
pub mod summary;

pub use currency::{handle_currency_command, CurrencyCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use list::{handle_list_command, ListCommands};
pub use reset::handle_reset_command;
pub use summary::handle_summary_command;

use chrono::NaiveDate;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Currency, Expense, ExpenseList, Income};
use crate::services::FinanceStore;

/// Parse a `YYYY-MM-DD` date
pub(crate) fn parse_date(input: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        FinanceError::Validation(format!(
            "Invalid date: '{}'. Use format YYYY-MM-DD",
            input
        ))
    })
}

/// Pick the single item matching `input`, rejecting ambiguous prefixes
fn unique_match<'a, T>(
    items: impl IntoIterator<Item = &'a T>,
    input: &str,
    entity_type: &'static str,
    matches: impl Fn(&T) -> bool,
) -> FinanceResult<Option<&'a T>>
where
    T: 'a,
{
    let mut found = items.into_iter().filter(|item| matches(*item));
    let first = found.next();
    if first.is_some() && found.next().is_some() {
        return Err(FinanceError::Validation(format!(
            "'{}' matches more than one {}, use a longer id",
            input,
            entity_type.to_lowercase()
        )));
    }
    Ok(first)
}

/// Find an expense list by exact name (case-insensitive) or id
pub(crate) fn find_list(store: &FinanceStore, input: &str) -> FinanceResult<ExpenseList> {
    let lists = store.expense_lists()?;
    let wanted = input.trim();

    if let Some(list) = lists.iter().find(|l| l.name.eq_ignore_ascii_case(wanted)) {
        return Ok(list.clone());
    }

    unique_match(&lists, input, "Expense list", |l| l.id.matches(wanted))?
        .cloned()
        .ok_or_else(|| FinanceError::expense_list_not_found(input))
}

/// Find a currency by code
pub(crate) fn find_currency(store: &FinanceStore, code: &str) -> FinanceResult<Currency> {
    store
        .currency_by_code(code)?
        .ok_or_else(|| FinanceError::currency_not_found(code))
}

/// Find an expense of `list` by id
pub(crate) fn find_expense(list: &ExpenseList, input: &str) -> FinanceResult<Expense> {
    unique_match(&list.expenses, input, "Expense", |e| e.id.matches(input))?
        .cloned()
        .ok_or_else(|| FinanceError::expense_not_found(input))
}

/// Find an income by id
pub(crate) fn find_income(store: &FinanceStore, input: &str) -> FinanceResult<Income> {
    let incomes = store.incomes()?;
    unique_match(&incomes, input, "Income", |i| i.id.matches(input))?
        .cloned()
        .ok_or_else(|| FinanceError::income_not_found(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewIncome;
    use crate::services::StorePolicy;
    use crate::storage::MemoryBackend;
    use std::sync::Arc;

    fn store() -> FinanceStore {
        FinanceStore::open(Arc::new(MemoryBackend::new()), StorePolicy::default()).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-31").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
        assert!(parse_date("31/01/2025").unwrap_err().is_validation());
    }

    #[test]
    fn test_find_list_by_name_or_id() {
        let store = store();
        let list = store.add_expense_list("Groceries").unwrap();

        assert_eq!(find_list(&store, "groceries").unwrap().id, list.id);
        assert_eq!(find_list(&store, &list.id.to_string()).unwrap().id, list.id);
        assert_eq!(
            find_list(&store, &list.id.as_uuid().to_string()).unwrap().id,
            list.id
        );
        assert!(find_list(&store, "Travel").unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_currency_by_code() {
        let store = store();
        assert_eq!(find_currency(&store, "eur").unwrap().code, "EUR");
        assert!(find_currency(&store, "GBP").unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_income_by_short_id() {
        let store = store();
        let income = store.add_income(NewIncome::new("Salary", 10.0, "USD")).unwrap();
        assert_eq!(find_income(&store, &income.id.to_string()).unwrap(), income);
        assert!(find_income(&store, "inc-zzzz").unwrap_err().is_not_found());
    }
}
