use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::csv::{self, ImportResult};
use crate::errors::LedgerError;
use crate::storage::StorageBackend;

use super::ledger::{SavingsLedger, Theme};
use super::transaction::Transaction;

/// Outcome of a CSV import.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped_rows: usize,
    pub vault_total_updated: bool,
    pub goal_updated: bool,
}

/// Facade that coordinates ledger state and write-through persistence.
///
/// Every mutation is persisted before the call returns. A failed write
/// surfaces as [`LedgerError::Persistence`] but never rolls back or clears
/// the in-memory ledger: memory stays the source of truth for the session
/// and the next successful write catches the store up.
pub struct LedgerManager {
    ledger: SavingsLedger,
    storage: Box<dyn StorageBackend>,
}

impl LedgerManager {
    /// Loads the persisted ledger, falling back to defaults when the store
    /// holds nothing, or holds something unreadable.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let ledger = match storage.load() {
            Ok(Some(ledger)) => ledger,
            Ok(None) => SavingsLedger::default(),
            Err(err) => {
                tracing::warn!("discarding unreadable ledger state: {err}");
                SavingsLedger::default()
            }
        };
        Self { ledger, storage }
    }

    pub fn ledger(&self) -> &SavingsLedger {
        &self.ledger
    }

    pub fn current_balance(&self) -> f64 {
        self.ledger.current_balance()
    }

    pub fn progress_percentage(&self) -> f64 {
        self.ledger.progress_percentage()
    }

    pub fn add_transaction(
        &mut self,
        amount: f64,
        quantity: u32,
        note: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Transaction, LedgerError> {
        let txn = self.ledger.add_transaction(amount, quantity, note, date)?;
        tracing::info!(id = %txn.id, amount, quantity, "transaction added");
        self.persist()?;
        Ok(txn)
    }

    /// Convenience wrapper: one unit, no note, dated today.
    pub fn quick_add(&mut self, amount: f64) -> Result<Transaction, LedgerError> {
        let today = Local::now().date_naive();
        let txn = self.ledger.quick_add(amount, today)?;
        tracing::info!(id = %txn.id, amount, "quick-add recorded");
        self.persist()?;
        Ok(txn)
    }

    pub fn edit_transaction(
        &mut self,
        id: Uuid,
        amount: f64,
        quantity: u32,
        note: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Transaction, LedgerError> {
        let txn = self
            .ledger
            .edit_transaction(id, amount, quantity, note, date)?;
        tracing::info!(id = %txn.id, "transaction edited");
        self.persist()?;
        Ok(txn)
    }

    /// Destructive; callers obtain user confirmation before invoking.
    pub fn delete_transaction(&mut self, id: Uuid) -> Result<(), LedgerError> {
        self.ledger.delete_transaction(id)?;
        tracing::info!(%id, "transaction deleted");
        self.persist()
    }

    /// Moves the full balance into the vault and clears the ledger,
    /// returning the transferred amount. Destructive; callers obtain user
    /// confirmation before invoking.
    pub fn empty_into_vault(&mut self) -> Result<f64, LedgerError> {
        let moved = self.ledger.empty_into_vault()?;
        tracing::info!(moved, vault_total = self.ledger.vault_total, "ledger emptied into vault");
        self.persist()?;
        Ok(moved)
    }

    pub fn set_goal(&mut self, goal: f64) -> Result<(), LedgerError> {
        self.ledger.set_goal(goal)?;
        self.persist()
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, LedgerError> {
        self.ledger.toggle_theme();
        self.persist()?;
        Ok(self.ledger.theme)
    }

    /// Serializes the current state to the CSV export format.
    pub fn export_csv(&self) -> String {
        csv::encode(&self.ledger)
    }

    /// Full-replace import: recovered transactions supplant the existing
    /// collection, and the metadata scalars are applied when present. Fails
    /// without touching state when no valid rows were recovered.
    /// Destructive; callers obtain user confirmation before invoking.
    pub fn import_csv(&mut self, text: &str) -> Result<ImportSummary, LedgerError> {
        let ImportResult {
            transactions,
            vault_total,
            goal,
            skipped_rows,
        } = csv::decode(text);
        if transactions.is_empty() {
            return Err(LedgerError::NoValidRows);
        }

        let imported = transactions.len();
        self.ledger.replace_transactions(transactions);
        if let Some(vault_total) = vault_total {
            self.ledger.vault_total = vault_total;
        }
        if let Some(goal) = goal {
            self.ledger.goal = goal;
        }
        tracing::info!(imported, skipped_rows, "csv import replaced the ledger");
        self.persist()?;
        Ok(ImportSummary {
            imported,
            skipped_rows,
            vault_total_updated: vault_total.is_some(),
            goal_updated: goal.is_some(),
        })
    }

    fn persist(&mut self) -> Result<(), LedgerError> {
        self.storage
            .save(&self.ledger)
            .map_err(|err| LedgerError::Persistence(err.to_string()))
    }
}
