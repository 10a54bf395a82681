//! Currency CLI commands

use clap::Subcommand;

use super::find_currency;
use crate::display::{format_conversion, format_currency_list};
use crate::error::FinanceResult;
use crate::models::{CurrencyUpdate, NewCurrency};
use crate::services::FinanceStore;

/// Currency subcommands
#[derive(Subcommand)]
pub enum CurrencyCommands {
    /// List the currency table
    List,
    /// Add a currency
    Add {
        /// Currency code (e.g., "GBP")
        code: String,
        /// Display name
        name: String,
        /// Value of one unit in USD
        rate: f64,
    },
    /// Edit a currency
    Edit {
        /// Currency code
        currency: String,
        /// New code
        #[arg(long)]
        code: Option<String>,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New rate
        #[arg(short, long)]
        rate: Option<f64>,
    },
    /// Remove a currency (entries using it are kept)
    Remove {
        /// Currency code
        currency: String,
    },
    /// Convert an amount between two currencies
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
}

/// Handle a currency command
pub fn handle_currency_command(store: &FinanceStore, cmd: CurrencyCommands) -> FinanceResult<()> {
    match cmd {
        CurrencyCommands::List => {
            print!("{}", format_currency_list(&store.currencies()?));
        }

        CurrencyCommands::Add { code, name, rate } => {
            let currency = store.add_currency(NewCurrency::new(code, name, rate))?;
            println!("Added currency: {}", currency);
            println!("  Rate: {}", currency.conversion_rate);
        }

        CurrencyCommands::Edit {
            currency,
            code,
            name,
            rate,
        } => {
            let found = find_currency(store, &currency)?;
            let update = CurrencyUpdate {
                code,
                name,
                conversion_rate: rate,
            };

            if update.is_empty() {
                println!("No changes specified. Use --code, --name or --rate.");
                return Ok(());
            }

            if let Some(updated) = store.update_currency(found.id, update)? {
                println!("Updated currency: {}", updated);
                println!("  Rate: {}", updated.conversion_rate);
            }
        }

        CurrencyCommands::Remove { currency } => {
            let found = find_currency(store, &currency)?;
            if store.delete_currency(found.id)? {
                println!("Removed currency: {}", found);
                let orphaned = store.orphaned_references(&found.code)?;
                if orphaned > 0 {
                    println!(
                        "  {} entries still use {} and can no longer be converted",
                        orphaned, found.code
                    );
                }
            }
        }

        CurrencyCommands::Convert { amount, from, to } => {
            let converted = store.convert(amount, &from, &to)?;
            print!(
                "{}",
                format_conversion(amount, &from.to_uppercase(), converted, &to.to_uppercase())
            );
        }
    }

    Ok(())
}
