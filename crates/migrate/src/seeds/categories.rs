//! Seed the default article categories

use super::{CategoryRecord, CATEGORIES_KEY};
use crate::migration::Migration;
use chrono::Utc;
use larder_core::Result;
use larder_store::LocalStore;
use uuid::Uuid;

const TECHNOLOGY_CATEGORY_ID: Uuid = Uuid::from_u128(0x20);
const BUSINESS_CATEGORY_ID: Uuid = Uuid::from_u128(0x21);
const GENERAL_CATEGORY_ID: Uuid = Uuid::from_u128(0x22);

/// Writes the three default categories articles are filed under
pub struct SeedCategories;

impl Migration for SeedCategories {
    fn name(&self) -> &str {
        "SeedCategories"
    }

    fn version(&self) -> u32 {
        4
    }

    fn up(&self, store: &LocalStore) -> Result<()> {
        let now = Utc::now();
        let categories = vec![
            CategoryRecord {
                id: TECHNOLOGY_CATEGORY_ID,
                name: "Technology".to_string(),
                description: "Articles on technology, innovation and development".to_string(),
                created_at: now,
                updated_at: now,
            },
            CategoryRecord {
                id: BUSINESS_CATEGORY_ID,
                name: "Business".to_string(),
                description: "Articles on business, entrepreneurship and management".to_string(),
                created_at: now,
                updated_at: now,
            },
            CategoryRecord {
                id: GENERAL_CATEGORY_ID,
                name: "General".to_string(),
                description: "Articles of general interest".to_string(),
                created_at: now,
                updated_at: now,
            },
        ];

        store.set(CATEGORIES_KEY, &categories)
    }

    fn down(&self, store: &LocalStore) -> Result<()> {
        store.set(CATEGORIES_KEY, &Vec::<CategoryRecord>::new())
    }
}
