//! Currency table operations
//!
//! The anchor currency can be renamed but never deleted, re-coded, or given a
//! rate other than 1.

use tracing::{debug, info};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Currency, CurrencyId, CurrencyUpdate, NewCurrency, ANCHOR_CODE};
use crate::storage::CollectionKey;

use super::events::{ChangeKind, StoreEvent};
use super::store::{read_lock, FinanceStore};

fn second_anchor() -> FinanceError {
    FinanceError::ProtectedResource(format!(
        "{} is the anchor currency and the table already has it",
        ANCHOR_CODE
    ))
}

impl FinanceStore {
    /// All currencies in insertion order
    pub fn currencies(&self) -> FinanceResult<Vec<Currency>> {
        Ok(read_lock(&self.currencies)?.clone())
    }

    /// Get a currency by ID
    pub fn currency(&self, id: CurrencyId) -> FinanceResult<Option<Currency>> {
        Ok(read_lock(&self.currencies)?
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    /// First currency answering to `code`
    pub fn currency_by_code(&self, code: &str) -> FinanceResult<Option<Currency>> {
        Ok(read_lock(&self.currencies)?
            .iter()
            .find(|c| c.has_code(code))
            .cloned())
    }

    /// Add a currency to the table
    pub fn add_currency(&self, new: NewCurrency) -> FinanceResult<Currency> {
        let currency = Currency::new(&new.code, new.name, new.conversion_rate);
        currency
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let unique = self.policy().unique_codes;
        let created = currency.clone();
        self.mutate(CollectionKey::Currencies, &self.currencies, |currencies| {
            if currency.is_anchor() && currencies.iter().any(Currency::is_anchor) {
                return Err(second_anchor());
            }
            if unique && currencies.iter().any(|c| c.code == currency.code) {
                return Err(FinanceError::Duplicate {
                    entity_type: "Currency",
                    identifier: currency.code,
                });
            }
            currencies.push(currency);
            Ok(Some(()))
        })?;

        debug!(code = %created.code, rate = created.conversion_rate, "Currency added");
        self.notify(StoreEvent::new(
            CollectionKey::Currencies,
            ChangeKind::Created,
            created.id.as_uuid(),
        ));
        Ok(created)
    }

    /// Merge `update` into the currency with `id`
    pub fn update_currency(
        &self,
        id: CurrencyId,
        update: CurrencyUpdate,
    ) -> FinanceResult<Option<Currency>> {
        let unique = self.policy().unique_codes;
        let updated = self.mutate(CollectionKey::Currencies, &self.currencies, |currencies| {
            let Some(index) = currencies.iter().position(|c| c.id == id) else {
                self.on_missing(FinanceError::currency_not_found(id.to_string()))?;
                return Ok(None);
            };

            let mut updated = currencies[index].clone();
            updated.apply(&update);

            if currencies[index].is_anchor() && !updated.is_anchor() {
                return Err(FinanceError::ProtectedResource(format!(
                    "{} is the anchor currency and its code cannot change",
                    ANCHOR_CODE
                )));
            }
            if updated.is_anchor()
                && currencies.iter().any(|c| c.id != id && c.is_anchor())
            {
                return Err(second_anchor());
            }
            updated
                .validate()
                .map_err(|e| FinanceError::Validation(e.to_string()))?;
            if unique
                && currencies
                    .iter()
                    .any(|c| c.id != id && c.code == updated.code)
            {
                return Err(FinanceError::Duplicate {
                    entity_type: "Currency",
                    identifier: updated.code,
                });
            }

            currencies[index] = updated.clone();
            Ok(Some(updated))
        })?;

        if let Some(currency) = &updated {
            debug!(code = %currency.code, rate = currency.conversion_rate, "Currency updated");
            self.notify(StoreEvent::new(
                CollectionKey::Currencies,
                ChangeKind::Updated,
                currency.id.as_uuid(),
            ));
        }
        Ok(updated)
    }

    /// Delete the currency with `id`
    ///
    /// Expenses and incomes that reference its code are left as they are.
    pub fn delete_currency(&self, id: CurrencyId) -> FinanceResult<bool> {
        let removed = self.mutate(CollectionKey::Currencies, &self.currencies, |currencies| {
            let Some(index) = currencies.iter().position(|c| c.id == id) else {
                self.on_missing(FinanceError::currency_not_found(id.to_string()))?;
                return Ok(None);
            };
            if currencies[index].is_anchor() {
                return Err(FinanceError::ProtectedResource(format!(
                    "{} is the anchor currency and cannot be deleted",
                    ANCHOR_CODE
                )));
            }
            Ok(Some(currencies.remove(index)))
        })?;

        let Some(currency) = removed else {
            return Ok(false);
        };

        let orphaned = self.orphaned_references(&currency.code)?;
        if orphaned > 0 {
            info!(code = %currency.code, orphaned, "Deleted currency is still referenced");
        }
        self.notify(StoreEvent::new(
            CollectionKey::Currencies,
            ChangeKind::Deleted,
            currency.id.as_uuid(),
        ));
        Ok(true)
    }

    /// Number of expenses and incomes whose code no longer resolves
    pub fn orphaned_references(&self, code: &str) -> FinanceResult<usize> {
        if self.currency_by_code(code)?.is_some() {
            return Ok(0);
        }
        let expenses = read_lock(&self.expense_lists)?
            .iter()
            .flat_map(|list| list.expenses.iter())
            .filter(|e| e.currency.eq_ignore_ascii_case(code))
            .count();
        let incomes = read_lock(&self.incomes)?
            .iter()
            .filter(|i| i.currency.eq_ignore_ascii_case(code))
            .count();
        Ok(expenses + incomes)
    }
}
