//! Process-local key-value store.
//!
//! Used when no storage directory is configured; the session then lasts as
//! long as the process.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::StorageError;
use crate::domain::ports::KeyValueStore;

/// Map-backed [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    slots: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn write_then_read_observes_value() {
        let store = InMemoryKeyValueStore::new();
        store.write("user", "{}").expect("write");
        assert_eq!(store.read("user"), Ok(Some("{}".to_owned())));
    }

    #[rstest]
    fn removing_absent_key_succeeds() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.remove("user"), Ok(()));
        assert_eq!(store.read("user"), Ok(None));
    }
}
