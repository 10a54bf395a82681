//! Income display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{format_amount, format_money};
use crate::models::Income;
use crate::services::Totals;

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Currency")]
    currency: String,
}

pub fn format_income_list(incomes: &[Income], totals: &Totals) -> String {
    if incomes.is_empty() {
        return "No incomes recorded.\n".to_string();
    }

    let rows = incomes.iter().map(|i| IncomeRow {
        id: i.id.to_string(),
        description: i.description.clone(),
        amount: format_amount(i.amount),
        currency: i.currency.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!(
        "{}\n\nTotal: {}\n",
        table,
        format_money(totals.total, &totals.target)
    )
}
