//! Store configuration via `larder.toml`
//!
//! A simple config file in the storage root. On first open, a default
//! `larder.toml` is created. To change settings, edit the file and
//! restart.

use larder_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name placed in the storage root directory.
pub const CONFIG_FILE_NAME: &str = "larder.toml";

/// Store configuration loaded from `larder.toml`.
///
/// # Example
///
/// ```toml
/// data_file = "local-storage.json"
/// ledger_file = "migrations.json"
/// pretty = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// File name of the data document, relative to the storage root.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// File name of the migration ledger, relative to the storage root.
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,
    /// Pretty-print the persisted JSON documents.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_data_file() -> String {
    "local-storage.json".to_string()
}

fn default_ledger_file() -> String {
    "migrations.json".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            ledger_file: default_ledger_file(),
            pretty: default_pretty(),
        }
    }
}

impl StoreConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Larder storage configuration
#
# File names are resolved relative to the storage root directory.
data_file = "local-storage.json"
ledger_file = "migrations.json"

# Pretty-print the persisted JSON documents (default: true).
# Disable for slightly smaller files.
pretty = true
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Corrupt`
    /// if it cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&content).map_err(|e| Error::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Load the config from the storage root, creating the root directory
    /// and a default `larder.toml` on first use.
    pub fn load_or_init(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(root)?;
        let path = root.join(CONFIG_FILE_NAME);
        Self::write_default_if_missing(&path)?;
        Self::from_file(&path)
    }

    /// Absolute path of the data document under the given root.
    pub fn data_path(&self, root: &Path) -> PathBuf {
        root.join(&self.data_file)
    }

    /// Absolute path of the migration ledger under the given root.
    pub fn ledger_path(&self, root: &Path) -> PathBuf {
        root.join(&self.ledger_file)
    }
}
