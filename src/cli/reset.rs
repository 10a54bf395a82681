//! Reset command
//!
//! Clears persisted data back to its defaults. Nothing happens without `--yes`.

use crate::error::FinanceResult;
use crate::services::{FinanceStore, ResetScope};

/// Handle `reset <scope>`
pub fn handle_reset_command(store: &FinanceStore, scope: &str, confirmed: bool) -> FinanceResult<()> {
    let scope: ResetScope = scope.parse()?;

    if !confirmed {
        println!("This will permanently reset {}.", scope);
        println!("Run again with --yes to confirm.");
        return Ok(());
    }

    store.reset_to_defaults(scope)?;
    println!("Reset {} to defaults.", scope);
    Ok(())
}
