//! Income CLI commands

use clap::Subcommand;

use super::find_income;
use crate::display::{format_income_list, format_money};
use crate::error::FinanceResult;
use crate::models::{IncomeUpdate, NewIncome};
use crate::services::FinanceStore;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// List incomes
    List {
        /// Currency to show the total in
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Record an income
    Add {
        description: String,
        /// Amount (must be positive)
        amount: f64,
        /// Currency code
        currency: String,
    },
    /// Edit an income
    Edit {
        /// Income ID
        income: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<f64>,
        /// New currency code
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Remove an income
    Remove {
        /// Income ID
        income: String,
    },
}

/// Handle an income command
pub fn handle_income_command(store: &FinanceStore, cmd: IncomeCommands) -> FinanceResult<()> {
    match cmd {
        IncomeCommands::List { currency } => {
            let incomes = store.incomes()?;
            let totals = store.income_totals(currency.as_deref())?;
            print!("{}", format_income_list(&incomes, &totals));
        }

        IncomeCommands::Add {
            description,
            amount,
            currency,
        } => {
            let income = store.add_income(NewIncome::new(description, amount, currency))?;
            println!("Added income: {}", income.description);
            println!("  Amount: {}", format_money(income.amount, &income.currency));
            println!("  ID:     {}", income.id);
        }

        IncomeCommands::Edit {
            income,
            description,
            amount,
            currency,
        } => {
            let found = find_income(store, &income)?;
            let update = IncomeUpdate {
                description,
                amount,
                currency,
            };

            if update.is_empty() {
                println!("No changes specified. Use --description, --amount or --currency.");
                return Ok(());
            }

            if let Some(updated) = store.update_income(found.id, update)? {
                println!("Updated income: {}", updated.description);
                println!("  Amount: {}", format_money(updated.amount, &updated.currency));
            }
        }

        IncomeCommands::Remove { income } => {
            let found = find_income(store, &income)?;
            if store.delete_income(found.id)? {
                println!("Removed income: {}", found.description);
            }
        }
    }

    Ok(())
}
