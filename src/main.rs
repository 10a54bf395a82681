use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_currency_command, handle_expense_command, handle_income_command, handle_list_command,
    handle_reset_command, handle_summary_command, CurrencyCommands, ExpenseCommands,
    IncomeCommands, ListCommands,
};
use fintrack::config::{FinancePaths, Settings};
use fintrack::log::init_logging;
use fintrack::services::FinanceStore;
use fintrack::storage::JsonDirBackend;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Multi-currency personal finance ledger",
    long_about = "fintrack records expenses and incomes in any currency you define, \
                  converts them through a single USD-anchored rate table, and shows \
                  totals and savings in the currency of your choice."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Currency table commands
    #[command(subcommand, alias = "cur")]
    Currency(CurrencyCommands),

    /// Expense list commands
    #[command(subcommand)]
    List(ListCommands),

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Income commands
    #[command(subcommand, alias = "inc")]
    Income(IncomeCommands),

    /// Show income, expenses and savings in one currency
    Summary {
        /// Currency to show totals in
        #[arg(short, long)]
        currency: Option<String>,
    },

    /// Reset data to defaults (all, currencies, expenses, incomes)
    Reset {
        scope: String,
        /// Confirm the reset
        #[arg(short, long)]
        yes: bool,
    },

    /// Show current configuration and paths
    Config {
        /// Write the current settings to config.json
        #[arg(long)]
        save: bool,

        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Change a setting and save it (default-currency, conversion-policy,
    /// missing-id-policy, unique-codes)
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let backend = Arc::new(JsonDirBackend::new(paths.data_dir()));
    let store = FinanceStore::open(backend, settings.store_policy())?;

    match cli.command {
        Some(Commands::Currency(cmd)) => handle_currency_command(&store, cmd)?,
        Some(Commands::List(cmd)) => handle_list_command(&store, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&store, cmd)?,
        Some(Commands::Income(cmd)) => handle_income_command(&store, cmd)?,
        Some(Commands::Summary { currency }) => {
            handle_summary_command(&store, currency.as_deref())?
        }
        Some(Commands::Reset { scope, yes }) => handle_reset_command(&store, &scope, yes)?,
        Some(Commands::Config {
            action: Some(ConfigCommands::Set { key, value }),
            ..
        }) => {
            let mut settings = settings;
            settings.set(&key, &value)?;
            settings.save(&paths)?;
            println!("Set {} = {}", key, value);
        }
        Some(Commands::Config { save, action: None }) => {
            if save {
                settings.save(&paths)?;
                println!("Saved settings to {}", paths.settings_file().display());
            }
            println!("fintrack configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Default currency:     {}", settings.default_currency);
            println!("  Conversion policy:    {:?}", settings.conversion_policy);
            println!("  Missing id policy:    {:?}", settings.missing_id_policy);
            println!("  Unique codes:         {}", settings.enforce_unique_codes);
        }
        None => {
            println!("fintrack - multi-currency personal finance ledger");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack summary' to see where your money stands.");
        }
    }

    Ok(())
}
