//! Expense CLI commands
//!
//! Expenses are always addressed through the list that owns them.

use chrono::Local;
use clap::Subcommand;

use super::{find_expense, find_list, parse_date};
use crate::display::format_money;
use crate::error::FinanceResult;
use crate::models::{ExpenseUpdate, NewExpense};
use crate::services::FinanceStore;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add an expense to a list
    Add {
        /// List name or ID
        list: String,
        /// What the money was spent on
        description: String,
        /// Amount (must be positive)
        amount: f64,
        /// Currency code
        currency: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Edit an expense
    Edit {
        /// List name or ID
        list: String,
        /// Expense ID
        expense: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<f64>,
        /// New currency code
        #[arg(short, long)]
        currency: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Remove an expense
    Remove {
        /// List name or ID
        list: String,
        /// Expense ID
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(store: &FinanceStore, cmd: ExpenseCommands) -> FinanceResult<()> {
    match cmd {
        ExpenseCommands::Add {
            list,
            description,
            amount,
            currency,
            date,
        } => {
            let found = find_list(store, &list)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let new = NewExpense::new(description, amount, currency, date);
            if let Some(expense) = store.add_expense(found.id, new)? {
                println!("Added expense to {}: {}", found.name, expense.description);
                println!("  Amount: {}", format_money(expense.amount, &expense.currency));
                println!("  Date:   {}", expense.date);
                println!("  ID:     {}", expense.id);
            }
        }

        ExpenseCommands::Edit {
            list,
            expense,
            description,
            amount,
            currency,
            date,
        } => {
            let found_list = find_list(store, &list)?;
            let found = find_expense(&found_list, &expense)?;
            let update = ExpenseUpdate {
                description,
                amount,
                currency,
                date: date.as_deref().map(parse_date).transpose()?,
            };

            if update.is_empty() {
                println!(
                    "No changes specified. Use --description, --amount, --currency or --date."
                );
                return Ok(());
            }

            if let Some(updated) = store.update_expense(found_list.id, found.id, update)? {
                println!("Updated expense: {}", updated.description);
                println!("  Amount: {}", format_money(updated.amount, &updated.currency));
                println!("  Date:   {}", updated.date);
            }
        }

        ExpenseCommands::Remove { list, expense } => {
            let found_list = find_list(store, &list)?;
            let found = find_expense(&found_list, &expense)?;
            if store.delete_expense(found_list.id, found.id)? {
                println!(
                    "Removed expense from {}: {}",
                    found_list.name, found.description
                );
            }
        }
    }

    Ok(())
}
