//! Seed the three built-in permissions

use super::{
    PermissionRecord, ADMIN_PERMISSION, ADMIN_PERMISSION_ID, EDITOR_PERMISSION_ID,
    PERMISSIONS_KEY, READER_PERMISSION_ID,
};
use crate::migration::Migration;
use chrono::Utc;
use larder_core::Result;
use larder_store::LocalStore;

/// Writes the Admin / Editor / Reader permission records
///
/// Ids are fixed so that references written by later migrations (and by
/// other machines running the same seeds) always match.
pub struct SeedPermissions;

impl Migration for SeedPermissions {
    fn name(&self) -> &str {
        "SeedPermissions"
    }

    fn version(&self) -> u32 {
        2
    }

    fn up(&self, store: &LocalStore) -> Result<()> {
        let now = Utc::now();
        let permissions = vec![
            PermissionRecord {
                id: ADMIN_PERMISSION_ID,
                name: ADMIN_PERMISSION.to_string(),
                description: "Full access to manage articles and users".to_string(),
                created_at: now,
                updated_at: now,
            },
            PermissionRecord {
                id: EDITOR_PERMISSION_ID,
                name: "Editor".to_string(),
                description: "Can create and edit articles".to_string(),
                created_at: now,
                updated_at: now,
            },
            PermissionRecord {
                id: READER_PERMISSION_ID,
                name: "Reader".to_string(),
                description: "Can only read articles".to_string(),
                created_at: now,
                updated_at: now,
            },
        ];

        store.set(PERMISSIONS_KEY, &permissions)
    }

    fn down(&self, store: &LocalStore) -> Result<()> {
        store.set(PERMISSIONS_KEY, &Vec::<PermissionRecord>::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> LocalStore {
        LocalStore::open_at(dir.path().join("local-storage.json"), true).unwrap()
    }

    #[test]
    fn test_up_writes_three_named_permissions() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        SeedPermissions.up(&store).unwrap();

        let permissions: Vec<PermissionRecord> =
            store.get(PERMISSIONS_KEY).unwrap().unwrap();
        let names: Vec<&str> = permissions.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Admin", "Editor", "Reader"]);
        assert_eq!(permissions[0].id, ADMIN_PERMISSION_ID);
    }

    #[test]
    fn test_down_resets_to_empty_list() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        SeedPermissions.up(&store).unwrap();
        SeedPermissions.down(&store).unwrap();

        let permissions: Vec<PermissionRecord> =
            store.get(PERMISSIONS_KEY).unwrap().unwrap();
        assert!(permissions.is_empty());
        // The collection itself stays in place
        assert!(store.has(PERMISSIONS_KEY));
    }
}
