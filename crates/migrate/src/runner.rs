//! Migration runner
//!
//! Owns the registry of migration units and the execution ledger. The
//! registry is kept stably sorted by version, so execution order is
//! version order regardless of registration order, with ties broken by
//! registration order.

use crate::ledger::Ledger;
use crate::migration::Migration;
use larder_core::{Error, Result};
use larder_store::LocalStore;
use std::path::Path;
use tracing::info;

/// Registry of migration units plus their execution ledger
///
/// Invoked once at boot (or through the CLI); not touched per request.
/// Runs are not transactional across units: partial application is a
/// documented outcome, and a later run picks up where the ledger stops.
pub struct MigrationRunner {
    registry: Vec<Box<dyn Migration>>,
    ledger: Ledger,
}

impl MigrationRunner {
    /// Open a runner whose ledger lives at the given path
    pub fn open<P: AsRef<Path>>(ledger_path: P) -> Result<Self> {
        Ok(Self::with_ledger(Ledger::open(ledger_path)?))
    }

    /// Create a runner over an already opened ledger
    pub fn with_ledger(ledger: Ledger) -> Self {
        MigrationRunner {
            registry: Vec::new(),
            ledger,
        }
    }

    /// The execution ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Register a migration unit
    ///
    /// Keeps the registry sorted ascending by version (stable, so equal
    /// versions stay in registration order).
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateMigration` if a unit with the same name is
    /// already registered.
    pub fn register(&mut self, migration: Box<dyn Migration>) -> Result<()> {
        if self.registry.iter().any(|m| m.name() == migration.name()) {
            return Err(Error::DuplicateMigration(migration.name().to_string()));
        }
        self.registry.push(migration);
        self.registry.sort_by_key(|m| m.version());
        Ok(())
    }

    /// Names of registered units not yet recorded in the ledger, in
    /// execution order
    pub fn pending(&self) -> Vec<&str> {
        self.registry
            .iter()
            .filter(|m| !self.ledger.contains(m.name()))
            .map(|m| m.name())
            .collect()
    }

    /// Run every pending migration, in ascending version order
    ///
    /// Each unit is applied and then recorded in the ledger before the
    /// next one starts. If a unit's `up` fails the run stops immediately:
    /// the failing unit is not recorded, already applied units remain
    /// recorded, and the error surfaces to the caller.
    ///
    /// Returns the number of units applied; zero means there was nothing
    /// pending.
    pub fn run_pending(&mut self, store: &LocalStore) -> Result<usize> {
        let Self { registry, ledger } = self;
        let pending: Vec<&dyn Migration> = registry
            .iter()
            .map(|m| &**m)
            .filter(|m| !ledger.contains(m.name()))
            .collect();

        if pending.is_empty() {
            info!("No pending migrations");
            return Ok(0);
        }

        let mut applied = 0;
        for migration in pending {
            info!(
                name = migration.name(),
                version = migration.version(),
                "Running migration"
            );
            migration.up(store)?;
            ledger.record(migration.name())?;
            applied += 1;
            info!(name = migration.name(), "Migration completed");
        }
        Ok(applied)
    }

    /// Roll back the most recently executed migration
    ///
    /// The target is the last ledger entry (ledger order, not version).
    /// An empty ledger is a no-op returning `Ok(None)`. On success the
    /// entry is removed from the ledger and the name is returned.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnregisteredMigration`, leaving the ledger
    /// untouched, when the last entry has no matching registered unit.
    pub fn rollback(&mut self, store: &LocalStore) -> Result<Option<String>> {
        let Self { registry, ledger } = self;
        let last = match ledger.last() {
            Some(name) => name.to_string(),
            None => {
                info!("No migrations to roll back");
                return Ok(None);
            }
        };

        let migration = registry
            .iter()
            .find(|m| m.name() == last)
            .ok_or_else(|| Error::UnregisteredMigration(last.clone()))?;

        info!(name = migration.name(), "Rolling back migration");
        migration.down(store)?;
        ledger.remove_last()?;
        info!(name = %last, "Rollback completed");
        Ok(Some(last))
    }
}
