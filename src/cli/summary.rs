//! Summary command

use crate::display::format_summary;
use crate::error::FinanceResult;
use crate::services::FinanceStore;

/// Print the dashboard summary in `currency`, or the configured default
pub fn handle_summary_command(store: &FinanceStore, currency: Option<&str>) -> FinanceResult<()> {
    let summary = store.summary(currency)?;
    print!("{}", format_summary(&summary));
    Ok(())
}
