//! Seed the empty collection layout

use super::{ARTICLES_KEY, CATEGORIES_KEY, PERMISSIONS_KEY, USERS_KEY};
use crate::migration::Migration;
use larder_core::Result;
use larder_store::LocalStore;
use serde_json::Value;

const COLLECTION_KEYS: [&str; 4] = [PERMISSIONS_KEY, USERS_KEY, ARTICLES_KEY, CATEGORIES_KEY];

/// Creates the four collections as empty lists where absent
///
/// Collections that already exist are left alone, so re-seeding a store
/// that carries data never wipes it.
pub struct CreateInitialStructure;

impl Migration for CreateInitialStructure {
    fn name(&self) -> &str {
        "CreateInitialStructure"
    }

    fn version(&self) -> u32 {
        1
    }

    fn up(&self, store: &LocalStore) -> Result<()> {
        for key in COLLECTION_KEYS {
            if !store.has(key) {
                store.set(key, &Vec::<Value>::new())?;
            }
        }
        Ok(())
    }

    fn down(&self, store: &LocalStore) -> Result<()> {
        for key in COLLECTION_KEYS {
            store.remove(key)?;
        }
        Ok(())
    }
}
