//! Dashboard summary formatting

use super::format_money;
use crate::services::{FinanceSummary, Totals};

fn push_breakdown(output: &mut String, totals: &Totals) {
    for (code, amount) in &totals.by_currency {
        output.push_str(&format!("    {:<6} {}\n", code, format_money(*amount, code)));
    }
}

/// Format incomes, expenses, savings and per-list totals
pub fn format_summary(summary: &FinanceSummary) -> String {
    let target = &summary.target;
    let mut output = String::new();

    output.push_str(&format!("Summary ({})\n", target));
    output.push_str(&format!("{:-<40}\n", ""));

    output.push_str(&format!(
        "  Income:   {:>20}\n",
        format_money(summary.incomes.total, target)
    ));
    push_breakdown(&mut output, &summary.incomes);

    output.push_str(&format!(
        "  Expenses: {:>20}\n",
        format_money(summary.expenses.total, target)
    ));
    push_breakdown(&mut output, &summary.expenses);

    output.push_str(&format!("{:-<40}\n", ""));
    output.push_str(&format!(
        "  Savings:  {:>20}\n",
        format_money(summary.savings, target)
    ));

    if !summary.lists.is_empty() {
        output.push('\n');
        output.push_str("By list:\n");
        let width = summary
            .lists
            .iter()
            .map(|l| l.name.len())
            .max()
            .unwrap_or(4)
            .max(4);
        for list in &summary.lists {
            output.push_str(&format!(
                "  {:<width$}  {:>20}  ({} expenses)\n",
                list.name,
                format_money(list.totals.total, target),
                list.expense_count,
                width = width,
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseList;
    use crate::services::ListTotal;

    #[test]
    fn test_summary_lines() {
        let mut incomes = Totals::empty("USD");
        incomes.total = 11.000000000000002;
        incomes.by_currency.insert("EUR".into(), 10.0);
        let mut expenses = Totals::empty("USD");
        expenses.total = 1.0;

        let list = ExpenseList::new("Test");
        let summary = FinanceSummary {
            target: "USD".into(),
            savings: incomes.total - expenses.total,
            incomes,
            lists: vec![ListTotal {
                list_id: list.id,
                name: list.name,
                expense_count: 1,
                totals: expenses.clone(),
            }],
            expenses,
        };

        let output = format_summary(&summary);
        assert!(output.contains("Summary (USD)"));
        assert!(output.contains("11.00 USD"));
        assert!(output.contains("10.00 EUR"));
        assert!(output.contains("Savings:"));
        assert!(output.contains("10.00 USD"));
        assert!(output.contains("(1 expenses)"));
    }
}
