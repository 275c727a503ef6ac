use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

use super::transaction::Transaction;

const DEFAULT_GOAL: f64 = 10_000.0;

/// Display preference persisted with the ledger; inert to the money math.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The active savings ledger plus its vault accumulator and goal.
///
/// Invariants: every transaction has `amount > 0` and `quantity >= 1`,
/// `vault_total` never goes negative, and the balance is always the sum of
/// the transaction totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavingsLedger {
    pub transactions: Vec<Transaction>,
    pub vault_total: f64,
    pub goal: f64,
    pub theme: Theme,
}

impl Default for SavingsLedger {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            vault_total: 0.0,
            goal: DEFAULT_GOAL,
            theme: Theme::default(),
        }
    }
}

impl SavingsLedger {
    /// Records a deposit and returns the created record.
    pub fn add_transaction(
        &mut self,
        amount: f64,
        quantity: u32,
        note: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Transaction, LedgerError> {
        validate_deposit(amount, quantity)?;
        let txn = Transaction::new(amount, quantity, note, date);
        self.transactions.push(txn.clone());
        Ok(txn)
    }

    /// Single-unit deposit with no note, dated `today`.
    pub fn quick_add(&mut self, amount: f64, today: NaiveDate) -> Result<Transaction, LedgerError> {
        self.add_transaction(amount, 1, "", today)
    }

    /// Replaces the record in place; the id is preserved.
    pub fn edit_transaction(
        &mut self,
        id: Uuid,
        amount: f64,
        quantity: u32,
        note: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Transaction, LedgerError> {
        validate_deposit(amount, quantity)?;
        let txn = self
            .transactions
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        txn.amount = amount;
        txn.quantity = quantity;
        txn.note = note.into();
        txn.date = date;
        Ok(txn.clone())
    }

    pub fn delete_transaction(&mut self, id: Uuid) -> Result<(), LedgerError> {
        let index = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        self.transactions.remove(index);
        Ok(())
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Sum of all transaction totals. Pure, no side effect.
    pub fn current_balance(&self) -> f64 {
        self.transactions.iter().map(Transaction::total).sum()
    }

    /// Moves the full balance into the vault and clears the ledger.
    ///
    /// The sole path by which money graduates out of the active ledger.
    /// Atomic: the vault increment and the clear happen together or not at
    /// all.
    pub fn empty_into_vault(&mut self) -> Result<f64, LedgerError> {
        let balance = self.current_balance();
        if balance == 0.0 {
            return Err(LedgerError::EmptyLedger);
        }
        self.vault_total += balance;
        self.transactions.clear();
        Ok(balance)
    }

    pub fn set_goal(&mut self, goal: f64) -> Result<(), LedgerError> {
        if !goal.is_finite() || goal <= 0.0 {
            return Err(LedgerError::Validation(
                "goal must be greater than zero".into(),
            ));
        }
        self.goal = goal;
        Ok(())
    }

    /// Progress toward the goal, clamped to `[0, 100]`. Zero when the goal
    /// is unset or nonsensical, never a division by zero.
    pub fn progress_percentage(&self) -> f64 {
        if self.goal <= 0.0 {
            return 0.0;
        }
        (self.current_balance() / self.goal * 100.0).min(100.0)
    }

    /// Rendering contract for the UI layer: newest date first. Equal dates
    /// keep their insertion order.
    pub fn transactions_by_date_desc(&self) -> Vec<&Transaction> {
        let mut view: Vec<&Transaction> = self.transactions.iter().collect();
        view.sort_by(|a, b| b.date.cmp(&a.date));
        view
    }

    /// Import hook: the incoming set replaces the collection wholesale.
    pub fn replace_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }
}

fn validate_deposit(amount: f64, quantity: u32) -> Result<(), LedgerError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::Validation(
            "amount must be greater than zero".into(),
        ));
    }
    if quantity < 1 {
        return Err(LedgerError::Validation("quantity must be at least 1".into()));
    }
    Ok(())
}
