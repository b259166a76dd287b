use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::state::{LifetimeStats, RunState};

pub const DEFAULT_SAVE_FILE: &str = "game_save.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save file I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file encoding: {0}")]
    Encode(#[from] serde_json::Error),
}

/// On-disk document: a `Current` section for the resumable run and an
/// `Overall` section for the lifetime statistics. `Current` is dropped from
/// the document when the run ends; `Overall` always survives.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SaveDoc {
    #[serde(rename = "Current", default, skip_serializing_if = "Option::is_none")]
    current: Option<RunState>,
    #[serde(rename = "Overall", default)]
    overall: LifetimeStats,
}

/// Single-file save store. One process owns the file; there is no locking.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unparseable file degrades to an empty document; load
    /// never propagates corruption as a hard error.
    fn read_doc(&self) -> SaveDoc {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!(path = %self.path.display(), %err, "save file unparseable, treating as empty");
                SaveDoc::default()
            }),
            Err(_) => SaveDoc::default(),
        }
    }

    fn write_doc(&self, doc: &SaveDoc) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Persist both records, overwriting any previous document.
    pub fn save(&self, run: &RunState, lifetime: &LifetimeStats) -> Result<(), StoreError> {
        let doc = SaveDoc {
            current: Some(run.clone()),
            overall: lifetime.clone(),
        };
        self.write_doc(&doc)?;
        debug!(path = %self.path.display(), "game state saved");
        Ok(())
    }

    /// Read both records back. The run portion is `None` when the file or
    /// its `Current` section is absent; the lifetime portion is whatever is
    /// present, zeroed fields included.
    pub fn load(&self) -> (Option<RunState>, LifetimeStats) {
        let doc = self.read_doc();
        (doc.current, doc.overall)
    }

    /// Whether a saved run exists to offer a "continue" choice for.
    pub fn has_resumable_run(&self) -> bool {
        self.read_doc().current.is_some()
    }

    /// Drop only the `Current` section, keeping lifetime statistics intact.
    /// A missing file is a no-op success.
    pub fn clear_run(&self) -> Result<(), StoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut doc = self.read_doc();
        doc.current = None;
        self.write_doc(&doc)?;
        debug!(path = %self.path.display(), "saved run cleared");
        Ok(())
    }

    /// Delete the whole save file, lifetime statistics included.
    pub fn wipe(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SaveStore {
        SaveStore::new(dir.path().join(DEFAULT_SAVE_FILE))
    }

    fn sample_state() -> (RunState, LifetimeStats) {
        let run = RunState {
            balance: 580,
            spin_count: 4,
            max_balance: 600,
        };
        let lifetime = LifetimeStats {
            total_spins: 42,
            total_money_earned: 1_250,
            highest_spin_count: 17,
            all_time_highest_balance: 900,
            runs_played: 3,
        };
        (run, lifetime)
    }

    #[test]
    fn save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let (run, lifetime) = sample_state();

        store.save(&run, &lifetime).unwrap();
        let (loaded_run, loaded_lifetime) = store.load();
        assert_eq!(loaded_run, Some(run));
        assert_eq!(loaded_lifetime, lifetime);
    }

    #[test]
    fn load_without_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let (run, lifetime) = store.load();
        assert_eq!(run, None);
        assert_eq!(lifetime, LifetimeStats::default());
        assert!(!store.has_resumable_run());
    }

    #[test]
    fn clear_run_keeps_overall_section() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let (run, lifetime) = sample_state();

        store.save(&run, &lifetime).unwrap();
        assert!(store.has_resumable_run());

        store.clear_run().unwrap();
        assert!(!store.has_resumable_run());
        let (loaded_run, loaded_lifetime) = store.load();
        assert_eq!(loaded_run, None);
        assert_eq!(loaded_lifetime, lifetime);

        // the section is gone from the document itself, not just zeroed
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(!raw.contains("Current"));
        assert!(raw.contains("Overall"));
    }

    #[test]
    fn clear_run_without_file_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.clear_run().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn malformed_file_degrades_to_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json at all").unwrap();

        let (run, lifetime) = store.load();
        assert_eq!(run, None);
        assert_eq!(lifetime, LifetimeStats::default());
        assert!(!store.has_resumable_run());
    }

    #[test]
    fn partial_document_fills_missing_fields_with_zero() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"{"Current": {"Money": 40}, "Overall": {"TotalSpins": 7}}"#,
        )
        .unwrap();

        let (run, lifetime) = store.load();
        let run = run.unwrap();
        assert_eq!(run.balance, 40);
        assert_eq!(run.spin_count, 0);
        assert_eq!(lifetime.total_spins, 7);
        assert_eq!(lifetime.runs_played, 0);
    }

    #[test]
    fn on_disk_field_names_are_stable() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let (run, lifetime) = sample_state();
        store.save(&run, &lifetime).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        for key in [
            "Current",
            "Money",
            "Spins",
            "MaxMoney",
            "Overall",
            "TotalSpins",
            "TotalMoneyEarnt",
            "HighestSpin",
            "AllTimeHighestMoney",
            "Runs",
        ] {
            assert!(raw.contains(key), "missing key {key}");
        }
    }

    #[test]
    fn wipe_removes_everything() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let (run, lifetime) = sample_state();
        store.save(&run, &lifetime).unwrap();

        store.wipe().unwrap();
        assert!(!store.path().exists());
        // wiping twice is fine
        store.wipe().unwrap();
    }
}
