//! Service layer for fintrack
//!
//! `FinanceStore` owns the ledger. Its operations are split by entity across
//! the `currency`, `expense` and `income` modules; conversion and totals are
//! pure functions over borrowed data.

pub mod aggregation;
pub mod conversion;
pub mod currency;
pub mod events;
pub mod expense;
pub mod income;
pub mod store;

pub use aggregation::{FinanceSummary, ListTotal, Totals};
pub use conversion::{ConversionPolicy, Converter};
pub use events::{ChangeKind, StoreEvent, SubscriptionId};
pub use store::{FinanceStore, MissingIdPolicy, ResetScope, StorePolicy};
