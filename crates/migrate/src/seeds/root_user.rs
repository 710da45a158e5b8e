//! Seed the root administrator account

use super::{
    PermissionRecord, UserRecord, ADMIN_PERMISSION, PERMISSIONS_KEY, ROOT_USER_ID, USERS_KEY,
};
use crate::migration::Migration;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use chrono::Utc;
use larder_core::{Error, Result};
use larder_store::LocalStore;
use rand::rngs::OsRng;

/// Email the root account is created (and removed) under
pub const ROOT_EMAIL: &str = "root@larder.dev";

const ROOT_PASSWORD: &str = "admin123";

/// Creates one root user holding the Admin permission
///
/// Requires the Admin permission seeded by `SeedPermissions`; without it
/// the unit refuses to run rather than writing a dangling reference.
/// The password is stored as an argon2 hash.
pub struct SeedRootUser;

impl Migration for SeedRootUser {
    fn name(&self) -> &str {
        "SeedRootUser"
    }

    fn version(&self) -> u32 {
        3
    }

    fn up(&self, store: &LocalStore) -> Result<()> {
        let permissions: Vec<PermissionRecord> =
            store.get(PERMISSIONS_KEY)?.unwrap_or_default();
        let admin = permissions
            .iter()
            .find(|p| p.name == ADMIN_PERMISSION)
            .ok_or_else(|| {
                Error::Precondition(
                    "Admin permission not found; run SeedPermissions first".to_string(),
                )
            })?;

        let salt = SaltString::generate(&mut OsRng);
        let password = Argon2::default()
            .hash_password(ROOT_PASSWORD.as_bytes(), &salt)
            .map_err(|e| Error::InvalidOperation(format!("password hashing failed: {e}")))?
            .to_string();

        let now = Utc::now();
        let root = UserRecord {
            id: ROOT_USER_ID,
            name: "Root Admin".to_string(),
            email: ROOT_EMAIL.to_string(),
            password,
            permission_id: admin.id,
            created_at: now,
            updated_at: now,
        };

        let mut users: Vec<UserRecord> = store.get(USERS_KEY)?.unwrap_or_default();
        users.push(root);
        store.set(USERS_KEY, &users)
    }

    fn down(&self, store: &LocalStore) -> Result<()> {
        let mut users: Vec<UserRecord> = store.get(USERS_KEY)?.unwrap_or_default();
        users.retain(|u| u.email != ROOT_EMAIL);
        store.set(USERS_KEY, &users)
    }
}
