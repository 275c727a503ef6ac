//! Ledger domain models and the write-through manager.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod manager;
pub mod transaction;

pub use ledger::{SavingsLedger, Theme};
pub use manager::{ImportSummary, LedgerManager};
pub use transaction::Transaction;
