use std::path::PathBuf;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use savings_core::{ledger::LedgerManager, storage::JsonStorage};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the
/// test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Registers a fresh temp directory and returns its path.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates an isolated manager backed by a unique directory for each test.
pub fn setup_manager() -> LedgerManager {
    open_at(temp_base())
}

/// Opens a manager over JSON storage rooted at `base`.
pub fn open_at(base: PathBuf) -> LedgerManager {
    let storage = JsonStorage::new(Some(base)).expect("create json storage backend");
    LedgerManager::open(Box::new(storage))
}
