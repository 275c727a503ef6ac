use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("No transaction with id {0}")]
    NotFound(Uuid),
    #[error("The ledger is already empty")]
    EmptyLedger,
    #[error("No valid transaction rows found in CSV input")]
    NoValidRows,
    #[error("Persistence error: {0}")]
    Persistence(String),
}
