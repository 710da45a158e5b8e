//! Built-in seed migrations
//!
//! The schema the embedding application migrates into the store: four
//! collections (`permissions`, `users`, `articles`, `categories`) seeded
//! with deterministic records so repeated runs on different machines
//! produce the same ids.

mod categories;
mod initial_structure;
mod permissions;
mod root_user;

pub use categories::SeedCategories;
pub use initial_structure::CreateInitialStructure;
pub use permissions::SeedPermissions;
pub use root_user::SeedRootUser;

use crate::migration::Migration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store key of the permissions collection
pub const PERMISSIONS_KEY: &str = "permissions";
/// Store key of the users collection
pub const USERS_KEY: &str = "users";
/// Store key of the articles collection
pub const ARTICLES_KEY: &str = "articles";
/// Store key of the categories collection
pub const CATEGORIES_KEY: &str = "categories";

/// Permission name granting full access
pub const ADMIN_PERMISSION: &str = "Admin";

/// Fixed id of the Admin permission
pub const ADMIN_PERMISSION_ID: Uuid = Uuid::from_u128(0x01);
/// Fixed id of the Editor permission
pub const EDITOR_PERMISSION_ID: Uuid = Uuid::from_u128(0x02);
/// Fixed id of the Reader permission
pub const READER_PERMISSION_ID: Uuid = Uuid::from_u128(0x03);
/// Fixed id of the seeded root user
pub const ROOT_USER_ID: Uuid = Uuid::from_u128(0x10);

/// A permission record as stored in the `permissions` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRecord {
    /// Stable identifier referenced by users
    pub id: Uuid,
    /// Display name (`Admin`, `Editor`, `Reader`)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Creation stamp, RFC 3339
    pub created_at: DateTime<Utc>,
    /// Last-update stamp, RFC 3339
    pub updated_at: DateTime<Utc>,
}

/// A user record as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Stable identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Login email, unique within the collection
    pub email: String,
    /// Argon2 password hash, never the plain password
    pub password: String,
    /// Id of the permission this user holds
    pub permission_id: Uuid,
    /// Creation stamp, RFC 3339
    pub created_at: DateTime<Utc>,
    /// Last-update stamp, RFC 3339
    pub updated_at: DateTime<Utc>,
}

/// A category record as stored in the `categories` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    /// Stable identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Creation stamp, RFC 3339
    pub created_at: DateTime<Utc>,
    /// Last-update stamp, RFC 3339
    pub updated_at: DateTime<Utc>,
}

/// All seed units, ready for registration
pub fn all() -> Vec<Box<dyn Migration>> {
    vec![
        Box::new(CreateInitialStructure),
        Box::new(SeedPermissions),
        Box::new(SeedRootUser),
        Box::new(SeedCategories),
    ]
}
