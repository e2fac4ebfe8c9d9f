//! Key-value persistence boundary.
//!
//! # Responsibility
//! - Define the synchronous string-keyed store the dashboard writes through.
//! - Provide in-memory and SQLite-backed implementations.
//! - Decode typed values with per-key fallback to documented defaults.
//!
//! # Invariants
//! - Stored values are JSON text; stores never interpret them.
//! - A value that fails to decode never fails a load.
//! - SQLite schema version is tracked via `PRAGMA user_version`.

pub mod codec;
mod memory;
pub mod migrations;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{open_store, open_store_in_memory, SqliteStore};

/// Well-known persisted keys.
pub mod keys {
    pub const TODOS: &str = "todos";
    pub const NOTES: &str = "notes";
    pub const EVENTS: &str = "events";
    pub const DARK_MODE: &str = "darkMode";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const THEME: &str = "theme";
    pub const FONT_SIZE: &str = "fontSize";
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Transport-level failure raised by a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    #[error("storage quota exceeded writing `{key}`: {needed} bytes needed, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },
    #[error("failed to encode value for `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous string-keyed persistent store supplied by the host.
///
/// Values are JSON documents serialized to text. Implementations must make a
/// successful `set` visible to the next `get` on the same store.
pub trait KeyValueStore {
    /// Returns the raw stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Inserts or replaces the value for `key`.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
