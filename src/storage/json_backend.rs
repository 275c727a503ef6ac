use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::ledger::SavingsLedger;

use super::{Result, StorageBackend};

const STATE_FILE: &str = "savings.json";
const TMP_SUFFIX: &str = "tmp";
const DIR_ENV: &str = "SAVINGS_CORE_DIR";

/// Stores the ledger as one pretty-printed JSON blob under a fixed file
/// name inside the backend's root directory.
#[derive(Clone)]
pub struct JsonStorage {
    state_file: PathBuf,
}

impl JsonStorage {
    /// Creates a backend rooted at `root`, or at the resolved default
    /// location when `root` is `None`.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = resolve_base(root);
        ensure_dir(&base)?;
        Ok(Self {
            state_file: base.join(STATE_FILE),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, ledger: &SavingsLedger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = tmp_path(&self.state_file);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.state_file)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<SavingsLedger>> {
        if !self.state_file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.state_file)?;
        let ledger: SavingsLedger = serde_json::from_str(&data)?;
        Ok(Some(ledger))
    }
}

fn resolve_base(root: Option<PathBuf>) -> PathBuf {
    if let Some(explicit) = root {
        return explicit;
    }
    if let Some(env_root) = std::env::var_os(DIR_ENV) {
        return PathBuf::from(env_root);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("savings_core")
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
