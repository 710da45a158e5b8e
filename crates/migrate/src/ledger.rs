//! Execution ledger
//!
//! The ledger records which migrations have run, in execution order, in a
//! document of its own (`migrations.json` by default) so that data and
//! migration history never share a file. It is append-only except for
//! rollback, which pops the last entry.

use larder_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk shape: `{ "executed": [ <name>, ... ] }`
#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerDocument {
    executed: Vec<String>,
}

/// Persisted record of executed migration names
///
/// Entries are unique; order is execution order. The backing file is
/// created eagerly on open so the ledger exists before any query.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    executed: Vec<String>,
}

impl Ledger {
    /// Open the ledger at the given path
    ///
    /// Creates the containing directory if missing. An absent file is
    /// initialized to an empty list and persisted immediately; an
    /// existing file is parsed, and a parse failure is fatal.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let executed = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let document: LedgerDocument =
                serde_json::from_str(&content).map_err(|e| Error::Corrupt {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            document.executed
        } else {
            Vec::new()
        };

        let ledger = Ledger { path, executed };
        if !ledger.path.exists() {
            ledger.persist()?;
        }
        Ok(ledger)
    }

    /// Path of the backing ledger document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Executed migration names, in execution order
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    /// Whether a migration name has been recorded
    pub fn contains(&self, name: &str) -> bool {
        self.executed.iter().any(|n| n == name)
    }

    /// The most recently executed name, if any
    pub fn last(&self) -> Option<&str> {
        self.executed.last().map(String::as_str)
    }

    /// Record a migration as executed and persist the ledger
    ///
    /// Recording a name that is already present leaves the ledger
    /// unchanged; entries stay unique.
    pub fn record(&mut self, name: &str) -> Result<()> {
        if self.contains(name) {
            return Ok(());
        }
        self.executed.push(name.to_string());
        self.persist()
    }

    /// Remove the most recent entry and persist, returning its name
    pub fn remove_last(&mut self) -> Result<Option<String>> {
        let removed = self.executed.pop();
        if removed.is_some() {
            self.persist()?;
        }
        Ok(removed)
    }

    fn persist(&self) -> Result<()> {
        let document = LedgerDocument {
            executed: self.executed.clone(),
        };
        let body = serde_json::to_vec_pretty(&document)
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, body)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_empty_ledger_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("migrations.json");

        let ledger = Ledger::open(&path).unwrap();
        assert!(path.exists(), "ledger file must exist right after open");
        assert!(ledger.executed().is_empty());

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["executed"], serde_json::json!([]));
    }

    #[test]
    fn test_record_appends_in_order() {
        let dir = TempDir::new().unwrap();
        let mut ledger = Ledger::open(dir.path().join("migrations.json")).unwrap();

        ledger.record("A").unwrap();
        ledger.record("B").unwrap();

        assert_eq!(ledger.executed(), &["A".to_string(), "B".to_string()]);
        assert!(ledger.contains("A"));
        assert_eq!(ledger.last(), Some("B"));
    }

    #[test]
    fn test_record_is_unique() {
        let dir = TempDir::new().unwrap();
        let mut ledger = Ledger::open(dir.path().join("migrations.json")).unwrap();

        ledger.record("A").unwrap();
        ledger.record("A").unwrap();

        assert_eq!(ledger.executed().len(), 1);
    }

    #[test]
    fn test_remove_last_pops_in_lifo_order() {
        let dir = TempDir::new().unwrap();
        let mut ledger = Ledger::open(dir.path().join("migrations.json")).unwrap();

        ledger.record("A").unwrap();
        ledger.record("B").unwrap();

        assert_eq!(ledger.remove_last().unwrap(), Some("B".to_string()));
        assert_eq!(ledger.remove_last().unwrap(), Some("A".to_string()));
        assert_eq!(ledger.remove_last().unwrap(), None);
    }

    #[test]
    fn test_reopen_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("migrations.json");

        {
            let mut ledger = Ledger::open(&path).unwrap();
            ledger.record("CreateInitialStructure").unwrap();
            ledger.record("SeedPermissions").unwrap();
        }

        let reopened = Ledger::open(&path).unwrap();
        assert_eq!(
            reopened.executed(),
            &[
                "CreateInitialStructure".to_string(),
                "SeedPermissions".to_string()
            ]
        );
    }

    #[test]
    fn test_malformed_ledger_fails_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("migrations.json");
        std::fs::write(&path, "{\"executed\": oops").unwrap();

        assert!(matches!(Ledger::open(&path), Err(Error::Corrupt { .. })));
    }
}
