//! Income operations

use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Income, IncomeId, IncomeUpdate, NewIncome};
use crate::storage::CollectionKey;

use super::events::{ChangeKind, StoreEvent};
use super::store::{read_lock, FinanceStore};

impl FinanceStore {
    /// All incomes in insertion order
    pub fn incomes(&self) -> FinanceResult<Vec<Income>> {
        Ok(read_lock(&self.incomes)?.clone())
    }

    pub fn income(&self, id: IncomeId) -> FinanceResult<Option<Income>> {
        Ok(read_lock(&self.incomes)?.iter().find(|i| i.id == id).cloned())
    }

    /// Record an income; the currency code is not checked against the table
    pub fn add_income(&self, new: NewIncome) -> FinanceResult<Income> {
        new.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;
        let income = Income::from_new(new);
        let created = income.clone();

        self.mutate(CollectionKey::Incomes, &self.incomes, |incomes| {
            incomes.push(income);
            Ok(Some(()))
        })?;

        debug!(amount = created.amount, currency = %created.currency, "Income added");
        self.notify(StoreEvent::new(
            CollectionKey::Incomes,
            ChangeKind::Created,
            created.id.as_uuid(),
        ));
        Ok(created)
    }

    /// Merge `update` into the income with `id`
    pub fn update_income(
        &self,
        id: IncomeId,
        update: IncomeUpdate,
    ) -> FinanceResult<Option<Income>> {
        let updated = self.mutate(CollectionKey::Incomes, &self.incomes, |incomes| {
            let Some(income) = incomes.iter_mut().find(|i| i.id == id) else {
                self.on_missing(FinanceError::income_not_found(id.to_string()))?;
                return Ok(None);
            };

            let mut updated = income.clone();
            updated.apply(&update);
            updated
                .validate()
                .map_err(|e| FinanceError::Validation(e.to_string()))?;
            *income = updated.clone();
            Ok(Some(updated))
        })?;

        if let Some(income) = &updated {
            self.notify(StoreEvent::new(
                CollectionKey::Incomes,
                ChangeKind::Updated,
                income.id.as_uuid(),
            ));
        }
        Ok(updated)
    }

    pub fn delete_income(&self, id: IncomeId) -> FinanceResult<bool> {
        let removed = self.mutate(CollectionKey::Incomes, &self.incomes, |incomes| {
            let Some(index) = incomes.iter().position(|i| i.id == id) else {
                self.on_missing(FinanceError::income_not_found(id.to_string()))?;
                return Ok(None);
            };
            Ok(Some(incomes.remove(index)))
        })?;

        let Some(income) = removed else {
            return Ok(false);
        };
        self.notify(StoreEvent::new(
            CollectionKey::Incomes,
            ChangeKind::Deleted,
            income.id.as_uuid(),
        ));
        Ok(true)
    }
}
