//! Currency display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format_money;
use crate::models::Currency;

#[derive(Tabled)]
struct CurrencyRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Rate (USD)")]
    rate: String,
    #[tabled(rename = "Note")]
    marker: &'static str,
}

/// Format the currency table
pub fn format_currency_list(currencies: &[Currency]) -> String {
    if currencies.is_empty() {
        return "No currencies found.\n".to_string();
    }

    let rows = currencies.iter().map(|c| CurrencyRow {
        code: c.code.clone(),
        name: c.name.clone(),
        rate: c.conversion_rate.to_string(),
        marker: if c.is_anchor() { "anchor" } else { "" },
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format the result of a conversion
pub fn format_conversion(amount: f64, from: &str, converted: f64, to: &str) -> String {
    format!("{} = {}\n", format_money(amount, from), format_money(converted, to))
}
