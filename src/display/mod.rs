//! Display formatting for terminal output
//!
//! Collections render as tables; single records and summaries as aligned
//! text blocks.

pub mod currency;
pub mod expense;
pub mod income;
pub mod summary;

pub use currency::{format_conversion, format_currency_list};
pub use expense::{format_expense_list_details, format_expense_lists};
pub use income::format_income_list;
pub use summary::format_summary;

/// Format an amount with two decimals, or eight when it would otherwise round to zero
pub fn format_amount(amount: f64) -> String {
    if amount != 0.0 && amount.abs() < 0.01 {
        format!("{:.8}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

/// Format an amount followed by its currency code
pub fn format_money(amount: f64, code: &str) -> String {
    format!("{} {}", format_amount(amount), code)
}
