//! Durable key-value store backed by a single JSON document
//!
//! `LocalStore` keeps a string-keyed map of JSON values in memory and
//! mirrors it synchronously to one file on every mutation. The same key
//! namespace doubles as an expiring cache through the `*_with_expiry`
//! operations, which wrap values with an epoch-millisecond expiry checked
//! lazily on read.
//!
//! One process owns the backing files at a time; there is no file locking.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod store;

pub use cache::CacheEntry;
pub use config::{StoreConfig, CONFIG_FILE_NAME};
pub use store::LocalStore;
