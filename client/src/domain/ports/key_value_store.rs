//! Port for the local key-value store that holds the session slot.
//!
//! The store is synchronous, like browser local storage: a write followed by
//! a read of the same key must observe the written value.

use crate::domain::StorageError;

/// String-keyed, string-valued persistent storage.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` when the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
