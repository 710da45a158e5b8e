//! Migration contract
//!
//! Migrations receive the store through the narrow [`LocalStore`] API
//! rather than an opaque handle, so a unit can only do what the store
//! contract allows.

use larder_core::Result;
use larder_store::LocalStore;

/// A named, versioned pair of forward/reverse procedures
///
/// Units are immutable once registered. Names must be unique across the
/// registry; versions drive execution order (ascending, ties broken by
/// registration order). Later migrations may depend on state written by
/// earlier ones, which is why the runner never executes units
/// concurrently.
pub trait Migration {
    /// Unique name, recorded in the ledger on success
    fn name(&self) -> &str;

    /// Ordering version; lower versions run first
    fn version(&self) -> u32;

    /// Apply the migration
    ///
    /// An error halts the run: this unit is not recorded, previously
    /// applied units stay recorded, and the error propagates.
    fn up(&self, store: &LocalStore) -> Result<()>;

    /// Reverse the migration
    ///
    /// Only ever invoked for the most recently applied unit.
    fn down(&self, store: &LocalStore) -> Result<()>;
}
