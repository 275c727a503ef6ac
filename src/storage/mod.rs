pub mod json_backend;

use crate::{errors::LedgerError, ledger::SavingsLedger};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends holding the single ledger blob.
pub trait StorageBackend: Send + Sync {
    /// Persists the full ledger snapshot. The write completes before the
    /// mutation that triggered it is considered done.
    fn save(&self, ledger: &SavingsLedger) -> Result<()>;

    /// Returns the persisted snapshot, or `None` when nothing is stored.
    /// Unreadable state is an error; callers discard it and fall back to
    /// defaults.
    fn load(&self) -> Result<Option<SavingsLedger>>;
}

pub use json_backend::JsonStorage;
