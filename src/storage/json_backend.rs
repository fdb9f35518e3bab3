use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::account::Account;
use crate::domain::transaction::Transaction;
use crate::errors::Result;

const TMP_SUFFIX: &str = "tmp";

/// Full system state as one archival document.
///
/// Unlike the day-precision CSV rows, snapshot timestamps keep their
/// sub-day precision, so a restored system is indistinguishable from
/// the saved one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl LedgerSnapshot {
    pub fn new(accounts: Vec<Account>, transactions: Vec<Transaction>) -> Self {
        Self {
            accounts,
            transactions,
        }
    }
}

/// Saves the snapshot as pretty JSON, replacing `path` atomically: the
/// document is written to a sibling temp file first and renamed over
/// the target, so a failed write never corrupts an existing snapshot.
pub fn save_snapshot(path: &Path, snapshot: &LedgerSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    write_atomic(path, &json)
}

pub fn load_snapshot(path: &Path) -> Result<LedgerSnapshot> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = tmp_path(path);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix_after_extension() {
        let path = Path::new("/data/ledger.json");
        assert_eq!(tmp_path(path), PathBuf::from("/data/ledger.json.tmp"));
        let bare = Path::new("/data/ledger");
        assert_eq!(tmp_path(bare), PathBuf::from("/data/ledger.tmp"));
    }
}
