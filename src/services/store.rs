//! The finance store
//!
//! Owns the currency table, expense lists and incomes, persists each collection
//! after every successful mutation, and answers totals queries. Entity-specific
//! operations live in the sibling `currency`, `expense` and `income` modules.
//!
//! Every mutation follows the same path: validate, apply to a staged copy of
//! the collection, persist the staged copy, commit it, notify subscribers. A
//! failure at any step leaves the in-memory collection untouched.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{normalize_code, Currency, ExpenseList, Income, ANCHOR_CODE};
use crate::storage::{CollectionKey, PersistenceBackend};

use super::aggregation::{self, FinanceSummary, ListTotal, Totals};
use super::conversion::{ConversionPolicy, Converter};
use super::events::{Listeners, StoreEvent, SubscriptionId};

/// What a mutation addressed at a missing id does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingIdPolicy {
    /// Silently do nothing
    #[default]
    Ignore,
    /// Fail with `NotFound`
    Error,
}

impl MissingIdPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ignore" => Some(Self::Ignore),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Behavior knobs for a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePolicy {
    pub conversion: ConversionPolicy,
    pub missing_ids: MissingIdPolicy,
    /// Reject a currency whose code is already in the table
    pub unique_codes: bool,
    /// Target currency used when a query names none
    pub default_target: String,
}

impl Default for StorePolicy {
    fn default() -> Self {
        Self {
            conversion: ConversionPolicy::Strict,
            missing_ids: MissingIdPolicy::Ignore,
            unique_codes: true,
            default_target: ANCHOR_CODE.to_string(),
        }
    }
}

/// Which persisted collections a reset clears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    All,
    Currencies,
    ExpenseLists,
    Incomes,
}

impl ResetScope {
    pub fn keys(&self) -> &'static [CollectionKey] {
        match self {
            Self::All => &CollectionKey::ALL,
            Self::Currencies => &[CollectionKey::Currencies],
            Self::ExpenseLists => &[CollectionKey::ExpenseLists],
            Self::Incomes => &[CollectionKey::Incomes],
        }
    }
}

impl FromStr for ResetScope {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "currencies" => Ok(Self::Currencies),
            "expenses" | "expenselists" | "expense-lists" | "lists" => Ok(Self::ExpenseLists),
            "incomes" => Ok(Self::Incomes),
            other => Err(FinanceError::Validation(format!(
                "Unknown reset scope '{}'. Valid scopes: all, currencies, expenses, incomes",
                other
            ))),
        }
    }
}

impl fmt::Display for ResetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all data"),
            Self::Currencies => write!(f, "currencies"),
            Self::ExpenseLists => write!(f, "expense lists"),
            Self::Incomes => write!(f, "incomes"),
        }
    }
}

pub(super) fn read_lock<T>(lock: &RwLock<T>) -> FinanceResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))
}

pub(super) fn write_lock<T>(lock: &RwLock<T>) -> FinanceResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))
}

/// In-memory ledger with write-through persistence
pub struct FinanceStore {
    backend: Arc<dyn PersistenceBackend>,
    policy: StorePolicy,
    pub(super) currencies: RwLock<Vec<Currency>>,
    pub(super) expense_lists: RwLock<Vec<ExpenseList>>,
    pub(super) incomes: RwLock<Vec<Income>>,
    listeners: Listeners,
}

impl FinanceStore {
    /// Create a store holding the built-in defaults; nothing is read yet
    pub fn new(backend: Arc<dyn PersistenceBackend>, policy: StorePolicy) -> Self {
        Self {
            backend,
            policy,
            currencies: RwLock::new(Currency::defaults()),
            expense_lists: RwLock::new(Vec::new()),
            incomes: RwLock::new(Vec::new()),
            listeners: Listeners::default(),
        }
    }

    /// Create a store and load whatever the backend holds
    pub fn open(backend: Arc<dyn PersistenceBackend>, policy: StorePolicy) -> FinanceResult<Self> {
        let store = Self::new(backend, policy);
        store.load()?;
        Ok(store)
    }

    /// Replace in-memory state with the persisted collections
    ///
    /// Missing or unreadable keys fall back to defaults. A currency table
    /// without the anchor gets it back.
    pub fn load(&self) -> FinanceResult<()> {
        let mut currencies = load_collection(
            self.backend.as_ref(),
            CollectionKey::Currencies,
            Currency::defaults,
        )?;
        repair_currencies(&mut currencies);
        let expense_lists: Vec<ExpenseList> =
            load_collection(self.backend.as_ref(), CollectionKey::ExpenseLists, Vec::new)?;
        let incomes: Vec<Income> =
            load_collection(self.backend.as_ref(), CollectionKey::Incomes, Vec::new)?;

        info!(
            currencies = currencies.len(),
            expense_lists = expense_lists.len(),
            incomes = incomes.len(),
            "Ledger loaded"
        );

        *write_lock(&self.currencies)? = currencies;
        *write_lock(&self.expense_lists)? = expense_lists;
        *write_lock(&self.incomes)? = incomes;
        Ok(())
    }

    /// Persist every collection and drop all subscribers
    pub fn dispose(self) -> FinanceResult<()> {
        self.persist(CollectionKey::Currencies, &read_lock(&self.currencies)?)?;
        self.persist(CollectionKey::ExpenseLists, &read_lock(&self.expense_lists)?)?;
        self.persist(CollectionKey::Incomes, &read_lock(&self.incomes)?)?;
        self.listeners.clear();
        debug!("Ledger disposed");
        Ok(())
    }

    pub fn policy(&self) -> &StorePolicy {
        &self.policy
    }

    /// Clear the persisted key(s) of `scope` and restore defaults in memory
    ///
    /// Every key is removed from the backend before any collection is reset,
    /// so a backend failure leaves in-memory state untouched.
    pub fn reset_to_defaults(&self, scope: ResetScope) -> FinanceResult<()> {
        let keys = scope.keys();
        for &key in keys {
            self.backend.remove(key)?;
        }

        for &key in keys {
            match key {
                CollectionKey::Currencies => {
                    *write_lock(&self.currencies)? = Currency::defaults();
                }
                CollectionKey::ExpenseLists => {
                    write_lock(&self.expense_lists)?.clear();
                }
                CollectionKey::Incomes => {
                    write_lock(&self.incomes)?.clear();
                }
            }
        }

        for &key in keys {
            info!(collection = %key, "Collection reset to defaults");
            self.notify(StoreEvent::reset(key));
        }
        Ok(())
    }

    /// Register a listener called after each successful mutation
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(super) fn notify(&self, event: StoreEvent) {
        debug!(collection = %event.collection, kind = ?event.kind, id = ?event.id, "Ledger changed");
        self.listeners.notify(&event);
    }

    /// Apply `f` to a staged copy of a collection, persisting and committing
    /// it when `f` reports a change with `Some`
    pub(super) fn mutate<T, R, F>(
        &self,
        key: CollectionKey,
        lock: &RwLock<Vec<T>>,
        f: F,
    ) -> FinanceResult<Option<R>>
    where
        T: Clone + Serialize,
        F: FnOnce(&mut Vec<T>) -> FinanceResult<Option<R>>,
    {
        let mut guard = write_lock(lock)?;
        let mut staged = guard.clone();

        let outcome = f(&mut staged)?;
        if outcome.is_some() {
            self.persist(key, &staged)?;
            *guard = staged;
        }

        Ok(outcome)
    }

    /// Apply the missing-id policy to a mutation that found nothing to touch
    pub(super) fn on_missing(&self, err: FinanceError) -> FinanceResult<()> {
        match self.policy.missing_ids {
            MissingIdPolicy::Ignore => {
                debug!(reason = %err, "Mutation target missing, ignoring");
                Ok(())
            }
            MissingIdPolicy::Error => Err(err),
        }
    }

    fn persist<T: Serialize>(&self, key: CollectionKey, items: &[T]) -> FinanceResult<()> {
        let json = serde_json::to_string_pretty(items)?;
        self.backend.write(key, &json)
    }

    fn target(&self, target: Option<&str>) -> String {
        match target {
            Some(code) if !code.trim().is_empty() => normalize_code(code),
            _ => self.policy.default_target.clone(),
        }
    }

    /// Convert an amount between two codes using the current rate table
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> FinanceResult<f64> {
        let currencies = read_lock(&self.currencies)?;
        Converter::new(&currencies, self.policy.conversion).convert(amount, from, to)
    }

    /// Totals of every expense across all lists
    pub fn expense_totals(&self, target: Option<&str>) -> FinanceResult<Totals> {
        let target = self.target(target);
        let currencies = read_lock(&self.currencies)?;
        let lists = read_lock(&self.expense_lists)?;
        let converter = Converter::new(&currencies, self.policy.conversion);
        aggregation::totals(aggregation::flatten_expenses(&lists), &converter, &target)
    }

    /// Totals of every income
    pub fn income_totals(&self, target: Option<&str>) -> FinanceResult<Totals> {
        let target = self.target(target);
        let currencies = read_lock(&self.currencies)?;
        let incomes = read_lock(&self.incomes)?;
        let converter = Converter::new(&currencies, self.policy.conversion);
        aggregation::totals(incomes.iter(), &converter, &target)
    }

    /// Income total minus expense total
    pub fn savings(&self, target: Option<&str>) -> FinanceResult<f64> {
        let target = self.target(target);
        let currencies = read_lock(&self.currencies)?;
        let lists = read_lock(&self.expense_lists)?;
        let incomes = read_lock(&self.incomes)?;
        let converter = Converter::new(&currencies, self.policy.conversion);

        let income_totals = aggregation::totals(incomes.iter(), &converter, &target)?;
        let expense_totals =
            aggregation::totals(aggregation::flatten_expenses(&lists), &converter, &target)?;
        Ok(aggregation::savings(&income_totals, &expense_totals))
    }

    /// Totals per expense list
    pub fn list_totals(&self, target: Option<&str>) -> FinanceResult<Vec<ListTotal>> {
        let target = self.target(target);
        let currencies = read_lock(&self.currencies)?;
        let lists = read_lock(&self.expense_lists)?;
        let converter = Converter::new(&currencies, self.policy.conversion);
        aggregation::list_totals(&lists, &converter, &target)
    }

    /// Incomes, expenses, savings and per-list totals in one pass
    pub fn summary(&self, target: Option<&str>) -> FinanceResult<FinanceSummary> {
        let target = self.target(target);
        let currencies = read_lock(&self.currencies)?;
        let lists = read_lock(&self.expense_lists)?;
        let incomes = read_lock(&self.incomes)?;
        let converter = Converter::new(&currencies, self.policy.conversion);
        FinanceSummary::build(&lists, &incomes, &converter, &target)
    }
}

fn load_collection<T, D>(
    backend: &dyn PersistenceBackend,
    key: CollectionKey,
    default: D,
) -> FinanceResult<Vec<T>>
where
    T: DeserializeOwned,
    D: FnOnce() -> Vec<T>,
{
    match backend.read(key)? {
        None => {
            debug!(collection = %key, "Nothing persisted, using defaults");
            Ok(default())
        }
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(collection = %key, error = %e, "Persisted data unreadable, using defaults");
                Ok(default())
            }
        },
    }
}

/// Bring a loaded currency table back within its invariants
///
/// Codes are normalized, entries with an unusable code or rate are dropped,
/// only the first anchor is kept and its rate is pinned to 1. A table without
/// an anchor gets it back at the front.
fn repair_currencies(currencies: &mut Vec<Currency>) {
    let mut anchor_seen = false;
    currencies.retain_mut(|currency| {
        currency.code = normalize_code(&currency.code);

        if currency.is_anchor() {
            if anchor_seen {
                warn!("Duplicate anchor currency in persisted table, dropping");
                return false;
            }
            anchor_seen = true;
            if currency.conversion_rate != 1.0 {
                warn!(rate = currency.conversion_rate, "Anchor currency rate was not 1, restoring");
                currency.conversion_rate = 1.0;
            }
            return true;
        }

        match currency.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(code = %currency.code, error = %e, "Invalid persisted currency, dropping");
                false
            }
        }
    });

    if !anchor_seen {
        warn!("Anchor currency missing from persisted table, restoring");
        currencies.insert(0, Currency::anchor());
    }
}
