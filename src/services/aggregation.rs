//! Totals, savings and the dashboard summary
//!
//! `by_currency` keeps raw amounts per code as a breakdown; only `total` is
//! converted into the target currency.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::FinanceResult;
use crate::models::{Expense, ExpenseList, ExpenseListId, Income};

use super::conversion::Converter;

/// Anything carrying an amount in some currency
pub trait Amounted {
    fn amount(&self) -> f64;
    fn currency(&self) -> &str;
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn currency(&self) -> &str {
        &self.currency
    }
}

impl Amounted for Income {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn currency(&self) -> &str {
        &self.currency
    }
}

/// Aggregated amounts for a set of entries
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Currency `total` is expressed in
    pub target: String,
    pub total: f64,
    /// Raw, unconverted sums per currency code
    pub by_currency: BTreeMap<String, f64>,
}

impl Totals {
    pub fn empty(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            total: 0.0,
            by_currency: BTreeMap::new(),
        }
    }
}

/// Sum `entries`, converting each into `target`
pub fn totals<'a, T, I>(entries: I, converter: &Converter<'_>, target: &str) -> FinanceResult<Totals>
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut totals = Totals::empty(target);

    for entry in entries {
        *totals
            .by_currency
            .entry(entry.currency().to_string())
            .or_insert(0.0) += entry.amount();
        totals.total += converter.convert(entry.amount(), entry.currency(), target)?;
    }

    Ok(totals)
}

/// Every expense across all lists, in list then insertion order
pub fn flatten_expenses(lists: &[ExpenseList]) -> impl Iterator<Item = &Expense> {
    lists.iter().flat_map(|list| list.expenses.iter())
}

/// Income total minus expense total
pub fn savings(incomes: &Totals, expenses: &Totals) -> f64 {
    incomes.total - expenses.total
}

/// Totals for a single expense list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTotal {
    pub list_id: ExpenseListId,
    pub name: String,
    pub expense_count: usize,
    pub totals: Totals,
}

/// Per-list totals, in list order
pub fn list_totals(
    lists: &[ExpenseList],
    converter: &Converter<'_>,
    target: &str,
) -> FinanceResult<Vec<ListTotal>> {
    lists
        .iter()
        .map(|list| -> FinanceResult<ListTotal> {
            Ok(ListTotal {
                list_id: list.id,
                name: list.name.clone(),
                expense_count: list.expenses.len(),
                totals: totals(&list.expenses, converter, target)?,
            })
        })
        .collect()
}

/// Everything the dashboard shows, in one target currency
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub target: String,
    pub incomes: Totals,
    pub expenses: Totals,
    pub savings: f64,
    pub lists: Vec<ListTotal>,
}

impl FinanceSummary {
    pub fn build(
        lists: &[ExpenseList],
        incomes: &[Income],
        converter: &Converter<'_>,
        target: &str,
    ) -> FinanceResult<Self> {
        let income_totals = totals(incomes, converter, target)?;
        let expense_totals = totals(flatten_expenses(lists), converter, target)?;
        let savings = savings(&income_totals, &expense_totals);

        Ok(Self {
            target: target.to_string(),
            lists: list_totals(lists, converter, target)?,
            incomes: income_totals,
            expenses: expense_totals,
            savings,
        })
    }

    /// Whether income covers expenses
    pub fn is_saving(&self) -> bool {
        self.savings >= 0.0
    }
}
