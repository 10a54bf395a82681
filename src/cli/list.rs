//! Expense list CLI commands

use clap::Subcommand;

use super::find_list;
use crate::display::{format_expense_list_details, format_expense_lists};
use crate::error::FinanceResult;
use crate::services::FinanceStore;

/// Expense list subcommands
#[derive(Subcommand)]
pub enum ListCommands {
    /// List all expense lists with their totals
    List {
        /// Currency to show totals in
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Create an expense list
    Create {
        /// List name
        name: String,
    },
    /// Rename an expense list
    Rename {
        /// List name or ID
        list: String,
        /// New name
        name: String,
    },
    /// Remove an expense list and all of its expenses
    Remove {
        /// List name or ID
        list: String,
    },
    /// Show a list's expenses
    Show {
        /// List name or ID
        list: String,
        /// Currency to show the total in
        #[arg(short, long)]
        currency: Option<String>,
    },
}

/// Handle an expense list command
pub fn handle_list_command(store: &FinanceStore, cmd: ListCommands) -> FinanceResult<()> {
    match cmd {
        ListCommands::List { currency } => {
            let totals = store.list_totals(currency.as_deref())?;
            print!("{}", format_expense_lists(&totals));
        }

        ListCommands::Create { name } => {
            let list = store.add_expense_list(&name)?;
            println!("Created expense list: {}", list.name);
            println!("  ID: {}", list.id);
        }

        ListCommands::Rename { list, name } => {
            let found = find_list(store, &list)?;
            if let Some(renamed) = store.update_expense_list(found.id, &name)? {
                println!("Renamed expense list: {} -> {}", found.name, renamed.name);
            }
        }

        ListCommands::Remove { list } => {
            let found = find_list(store, &list)?;
            if store.delete_expense_list(found.id)? {
                println!(
                    "Removed expense list: {} ({} expenses)",
                    found.name,
                    found.expenses.len()
                );
            }
        }

        ListCommands::Show { list, currency } => {
            let found = find_list(store, &list)?;
            let totals = store
                .list_totals(currency.as_deref())?
                .into_iter()
                .find(|t| t.list_id == found.id)
                .map(|t| t.totals);
            if let Some(totals) = totals {
                let converted = found
                    .expenses
                    .iter()
                    .map(|e| store.convert(e.amount, &e.currency, &totals.target))
                    .collect::<FinanceResult<Vec<_>>>()?;
                print!("{}", format_expense_list_details(&found, &converted, &totals));
            }
        }
    }

    Ok(())
}
