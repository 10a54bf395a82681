//! Expense list and expense operations

use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Expense, ExpenseId, ExpenseList, ExpenseListId, ExpenseUpdate, NewExpense};
use crate::storage::CollectionKey;

use super::events::{ChangeKind, StoreEvent};
use super::store::{read_lock, FinanceStore};

fn list_name(name: &str) -> FinanceResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FinanceError::Validation(
            "Expense list name cannot be empty".into(),
        ));
    }
    Ok(name.to_string())
}

impl FinanceStore {
    /// All expense lists in creation order
    pub fn expense_lists(&self) -> FinanceResult<Vec<ExpenseList>> {
        Ok(read_lock(&self.expense_lists)?.clone())
    }

    /// Get an expense list by ID
    pub fn expense_list(&self, id: ExpenseListId) -> FinanceResult<Option<ExpenseList>> {
        Ok(read_lock(&self.expense_lists)?
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    /// Create an empty list
    pub fn add_expense_list(&self, name: &str) -> FinanceResult<ExpenseList> {
        let list = ExpenseList::new(list_name(name)?);
        let created = list.clone();

        self.mutate(CollectionKey::ExpenseLists, &self.expense_lists, |lists| {
            lists.push(list);
            Ok(Some(()))
        })?;

        debug!(name = %created.name, "Expense list created");
        self.notify(StoreEvent::new(
            CollectionKey::ExpenseLists,
            ChangeKind::Created,
            created.id.as_uuid(),
        ));
        Ok(created)
    }

    /// Rename a list; its expenses are kept
    pub fn update_expense_list(
        &self,
        id: ExpenseListId,
        name: &str,
    ) -> FinanceResult<Option<ExpenseList>> {
        let name = list_name(name)?;
        let updated = self.mutate(CollectionKey::ExpenseLists, &self.expense_lists, |lists| {
            let Some(list) = lists.iter_mut().find(|l| l.id == id) else {
                self.on_missing(FinanceError::expense_list_not_found(id.to_string()))?;
                return Ok(None);
            };
            list.name = name;
            Ok(Some(list.clone()))
        })?;

        if let Some(list) = &updated {
            self.notify(StoreEvent::new(
                CollectionKey::ExpenseLists,
                ChangeKind::Updated,
                list.id.as_uuid(),
            ));
        }
        Ok(updated)
    }

    /// Delete a list together with every expense in it
    pub fn delete_expense_list(&self, id: ExpenseListId) -> FinanceResult<bool> {
        let removed = self.mutate(CollectionKey::ExpenseLists, &self.expense_lists, |lists| {
            let Some(index) = lists.iter().position(|l| l.id == id) else {
                self.on_missing(FinanceError::expense_list_not_found(id.to_string()))?;
                return Ok(None);
            };
            Ok(Some(lists.remove(index)))
        })?;

        let Some(list) = removed else {
            return Ok(false);
        };
        debug!(name = %list.name, expenses = list.expenses.len(), "Expense list deleted");
        self.notify(StoreEvent::new(
            CollectionKey::ExpenseLists,
            ChangeKind::Deleted,
            list.id.as_uuid(),
        ));
        Ok(true)
    }

    /// Append an expense to a list
    ///
    /// The currency code is not checked against the table.
    pub fn add_expense(
        &self,
        list_id: ExpenseListId,
        new: NewExpense,
    ) -> FinanceResult<Option<Expense>> {
        new.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;
        let expense = Expense::from_new(new);

        let created = self.mutate(CollectionKey::ExpenseLists, &self.expense_lists, |lists| {
            let Some(list) = lists.iter_mut().find(|l| l.id == list_id) else {
                self.on_missing(FinanceError::expense_list_not_found(list_id.to_string()))?;
                return Ok(None);
            };
            list.expenses.push(expense.clone());
            Ok(Some(expense))
        })?;

        if let Some(expense) = &created {
            debug!(amount = expense.amount, currency = %expense.currency, "Expense added");
            self.notify(StoreEvent::new(
                CollectionKey::ExpenseLists,
                ChangeKind::Created,
                expense.id.as_uuid(),
            ));
        }
        Ok(created)
    }

    /// Merge `update` into an expense of a list
    pub fn update_expense(
        &self,
        list_id: ExpenseListId,
        id: ExpenseId,
        update: ExpenseUpdate,
    ) -> FinanceResult<Option<Expense>> {
        let updated = self.mutate(CollectionKey::ExpenseLists, &self.expense_lists, |lists| {
            let Some(expense) = lists
                .iter_mut()
                .find(|l| l.id == list_id)
                .and_then(|l| l.expenses.iter_mut().find(|e| e.id == id))
            else {
                self.on_missing(FinanceError::expense_not_found(id.to_string()))?;
                return Ok(None);
            };

            let mut updated = expense.clone();
            updated.apply(&update);
            updated
                .validate()
                .map_err(|e| FinanceError::Validation(e.to_string()))?;
            *expense = updated.clone();
            Ok(Some(updated))
        })?;

        if let Some(expense) = &updated {
            self.notify(StoreEvent::new(
                CollectionKey::ExpenseLists,
                ChangeKind::Updated,
                expense.id.as_uuid(),
            ));
        }
        Ok(updated)
    }

    /// Remove an expense from a list
    pub fn delete_expense(&self, list_id: ExpenseListId, id: ExpenseId) -> FinanceResult<bool> {
        let removed = self.mutate(CollectionKey::ExpenseLists, &self.expense_lists, |lists| {
            let removed = lists.iter_mut().find(|l| l.id == list_id).and_then(|l| {
                l.expenses
                    .iter()
                    .position(|e| e.id == id)
                    .map(|index| l.expenses.remove(index))
            });
            match removed {
                Some(expense) => Ok(Some(expense)),
                None => {
                    self.on_missing(FinanceError::expense_not_found(id.to_string()))?;
                    Ok(None)
                }
            }
        })?;

        let Some(expense) = removed else {
            return Ok(false);
        };
        self.notify(StoreEvent::new(
            CollectionKey::ExpenseLists,
            ChangeKind::Deleted,
            expense.id.as_uuid(),
        ));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::{MissingIdPolicy, StorePolicy};
    use crate::storage::MemoryBackend;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn store() -> (Arc<MemoryBackend>, FinanceStore) {
        let backend = Arc::new(MemoryBackend::new());
        let store = FinanceStore::open(backend.clone(), StorePolicy::default()).unwrap();
        (backend, store)
    }

    fn strict_store() -> FinanceStore {
        let policy = StorePolicy {
            missing_ids: MissingIdPolicy::Error,
            ..StorePolicy::default()
        };
        FinanceStore::open(Arc::new(MemoryBackend::new()), policy).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_list_name_is_trimmed_and_required() {
        let (_backend, store) = store();
        let list = store.add_expense_list("  Groceries ").unwrap();
        assert_eq!(list.name, "Groceries");
        assert!(list.expenses.is_empty());
        assert!(store.add_expense_list("").unwrap_err().is_validation());
    }

    #[test]
    fn test_rename_keeps_expenses() {
        let (_backend, store) = store();
        let list = store.add_expense_list("Food").unwrap();
        store
            .add_expense(list.id, NewExpense::new("Bread", 3.0, "USD", date(1)))
            .unwrap();

        let renamed = store
            .update_expense_list(list.id, "Groceries")
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Groceries");
        assert_eq!(renamed.expenses.len(), 1);
        assert!(store
            .update_expense_list(list.id, " ")
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_delete_list_drops_its_expenses() {
        let (_backend, store) = store();
        let food = store.add_expense_list("Food").unwrap();
        let travel = store.add_expense_list("Travel").unwrap();
        store
            .add_expense(food.id, NewExpense::new("Bread", 3.0, "USD", date(1)))
            .unwrap();

        assert!(store.delete_expense_list(food.id).unwrap());
        let lists = store.expense_lists().unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].id, travel.id);
        assert_eq!(store.expense_totals(None).unwrap().total, 0.0);
    }

    #[test]
    fn test_expenses_keep_insertion_order() {
        let (_backend, store) = store();
        let list = store.add_expense_list("Food").unwrap();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            store
                .add_expense(list.id, NewExpense::new(*name, 1.0, "USD", date(i as u32 + 1)))
                .unwrap();
        }
        let list = store.expense_list(list.id).unwrap().unwrap();
        let names: Vec<_> = list.expenses.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_expense_validation() {
        let (backend, store) = store();
        let list = store.add_expense_list("Food").unwrap();
        for bad in [
            NewExpense::new("", 1.0, "USD", date(1)),
            NewExpense::new("Bread", 0.0, "USD", date(1)),
            NewExpense::new("Bread", -4.0, "USD", date(1)),
            NewExpense::new("Bread", 1.0, " ", date(1)),
        ] {
            assert!(store.add_expense(list.id, bad).unwrap_err().is_validation());
        }
        assert_eq!(backend.write_count(CollectionKey::ExpenseLists), 1);
    }

    #[test]
    fn test_add_expense_accepts_unknown_code() {
        let (_backend, store) = store();
        let list = store.add_expense_list("Food").unwrap();
        let expense = store
            .add_expense(list.id, NewExpense::new("Tea", 2.0, "gbp", date(1)))
            .unwrap()
            .unwrap();
        assert_eq!(expense.currency, "GBP");
    }

    #[test]
    fn test_update_expense_changes_only_given_fields() {
        let (_backend, store) = store();
        let list = store.add_expense_list("Food").unwrap();
        let expense = store
            .add_expense(list.id, NewExpense::new("Bread", 3.0, "USD", date(1)))
            .unwrap()
            .unwrap();

        let updated = store
            .update_expense(
                list.id,
                expense.id,
                ExpenseUpdate {
                    amount: Some(4.5),
                    date: Some(date(2)),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, expense.id);
        assert_eq!(updated.description, "Bread");
        assert_eq!(updated.amount, 4.5);
        assert_eq!(updated.date, date(2));

        let err = store
            .update_expense(
                list.id,
                expense.id,
                ExpenseUpdate {
                    amount: Some(-1.0),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        let stored = store.expense_list(list.id).unwrap().unwrap();
        assert_eq!(stored.expenses[0].amount, 4.5);
    }

    #[test]
    fn test_expense_in_other_list_is_not_touched() {
        let (_backend, store) = store();
        let food = store.add_expense_list("Food").unwrap();
        let travel = store.add_expense_list("Travel").unwrap();
        let expense = store
            .add_expense(food.id, NewExpense::new("Bread", 3.0, "USD", date(1)))
            .unwrap()
            .unwrap();

        assert!(!store.delete_expense(travel.id, expense.id).unwrap());
        assert_eq!(store.expense_list(food.id).unwrap().unwrap().expenses.len(), 1);
    }

    #[test]
    fn test_missing_targets_are_no_ops_by_default() {
        let (backend, store) = store();
        let list = store.add_expense_list("Food").unwrap();
        let writes = backend.total_writes();

        let orphan = ExpenseListId::new();
        assert!(store
            .add_expense(orphan, NewExpense::new("Bread", 1.0, "USD", date(1)))
            .unwrap()
            .is_none());
        assert!(store.update_expense_list(orphan, "X").unwrap().is_none());
        assert!(!store.delete_expense_list(orphan).unwrap());
        assert!(!store.delete_expense(list.id, ExpenseId::new()).unwrap());
        assert!(store
            .update_expense(list.id, ExpenseId::new(), ExpenseUpdate::default())
            .unwrap()
            .is_none());

        assert_eq!(backend.total_writes(), writes);
    }

    #[test]
    fn test_missing_targets_error_when_configured() {
        let store = strict_store();
        let orphan = ExpenseListId::new();
        assert!(store
            .add_expense(orphan, NewExpense::new("Bread", 1.0, "USD", date(1)))
            .unwrap_err()
            .is_not_found());
        assert!(store.delete_expense_list(orphan).unwrap_err().is_not_found());

        let list = store.add_expense_list("Food").unwrap();
        assert!(store
            .delete_expense(list.id, ExpenseId::new())
            .unwrap_err()
            .is_not_found());
    }
}
