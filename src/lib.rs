//! Larder — embedded JSON-backed key-value store with TTL caching and
//! replayable migrations
//!
//! A single-process store that mirrors an in-memory map to one JSON
//! document on every mutation, layers expiring cache entries over the
//! same key namespace, and evolves its contents through ordered,
//! replayable migrations with an independently persisted execution
//! ledger.
//!
//! # Quick Start
//!
//! ```ignore
//! use larder::{LocalStore, MigrationRunner, seeds};
//!
//! // Open (or create) a store rooted at a directory
//! let store = LocalStore::open(".storage")?;
//!
//! // Plain entries
//! store.set("greeting", &"hello")?;
//! let value: Option<String> = store.get("greeting")?;
//!
//! // Expiring entries share the namespace
//! store.set_with_expiry("session", &"token", 30)?;
//!
//! // Bring the schema up to date
//! let mut runner = MigrationRunner::open(".storage/migrations.json")?;
//! for unit in seeds::all() {
//!     runner.register(unit)?;
//! }
//! runner.run_pending(&store)?;
//! ```

pub use larder_core::{Error, Result, Timestamp};
pub use larder_migrate::{seeds, Ledger, Migration, MigrationRunner};
pub use larder_store::{CacheEntry, LocalStore, StoreConfig, CONFIG_FILE_NAME};
