//! Expense list display formatting
//!
//! Formats expense lists for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{format_amount, format_money};
use crate::models::ExpenseList;
use crate::services::{ListTotal, Totals};

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Expenses")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Converted")]
    converted: String,
}

/// Format every list with its converted total
pub fn format_expense_lists(lists: &[ListTotal]) -> String {
    if lists.is_empty() {
        return "No expense lists found.\n".to_string();
    }

    let rows = lists.iter().map(|l| ListRow {
        id: l.list_id.to_string(),
        name: l.name.clone(),
        count: l.expense_count,
        total: format_money(l.totals.total, &l.totals.target),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format a single list with its expenses
///
/// `converted` holds each expense's amount in `totals.target`, in list order.
pub fn format_expense_list_details(
    list: &ExpenseList,
    converted: &[f64],
    totals: &Totals,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense list: {}\n", list.name));
    output.push_str(&format!("  ID:       {}\n", list.id));
    output.push_str(&format!("  Expenses: {}\n", list.expenses.len()));
    output.push('\n');

    if list.is_empty() {
        output.push_str("  No expenses yet.\n");
    } else {
        let rows = list.expenses.iter().zip(converted).map(|(e, &amount)| ExpenseRow {
            id: e.id.to_string(),
            date: e.date.format("%Y-%m-%d").to_string(),
            description: e.description.clone(),
            amount: format_amount(e.amount),
            currency: e.currency.clone(),
            converted: format_money(amount, &totals.target),
        });
        let mut table = Table::new(rows);
        table.with(Style::psql());
        output.push_str(&format!("{}\n", table));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Total: {}\n",
        format_money(totals.total, &totals.target)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, NewExpense};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_expense_lists(&[]), "No expense lists found.\n");
    }

    #[test]
    fn test_details_show_expenses_and_total() {
        let mut list = ExpenseList::new("Trip");
        let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        list.expenses
            .push(Expense::from_new(NewExpense::new("Hotel", 120.0, "EUR", date)));
        list.expenses
            .push(Expense::from_new(NewExpense::new("Taxi", 1000.0, "ARS", date)));

        let mut totals = Totals::empty("USD");
        totals.total = 133.0;

        let output = format_expense_list_details(&list, &[132.0, 1.0], &totals);
        assert!(output.contains("Expense list: Trip"));
        assert!(output.contains("Converted"));
        assert!(output.contains("2025-07-04"));
        assert!(output.contains("120.00"));

        let hotel = output.lines().find(|l| l.contains("Hotel")).unwrap();
        assert!(hotel.contains("132.00 USD"));
        let taxi = output.lines().find(|l| l.contains("Taxi")).unwrap();
        assert!(taxi.contains("1000.00"));
        assert!(taxi.contains("1.00 USD"));
        assert!(output.contains("Total: 133.00 USD"));
    }

    #[test]
    fn test_details_of_empty_list() {
        let list = ExpenseList::new("Empty");
        let output = format_expense_list_details(&list, &[], &Totals::empty("EUR"));
        assert!(output.contains("No expenses yet."));
        assert!(output.contains("Total: 0.00 EUR"));
    }
}
