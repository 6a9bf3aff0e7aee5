//! The persisted session slot.
//!
//! Wraps one key of a [`KeyValueStore`] holding at most one serialised
//! [`User`]. Writes go straight to the backend, so a `save` followed by a
//! `load` always observes the saved user.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::KeyValueStore;
use crate::domain::{StorageError, User};

/// Key the session has always been stored under.
pub const DEFAULT_SESSION_KEY: &str = "user";

/// Load, save and clear the single session record.
pub struct SessionStore<K: ?Sized> {
    backend: Arc<K>,
    key: String,
}

impl<K: ?Sized> SessionStore<K> {
    /// Use `backend` with the default key.
    #[must_use]
    pub fn new(backend: Arc<K>) -> Self {
        Self::with_key(backend, DEFAULT_SESSION_KEY)
    }

    /// Use `backend` with a custom key.
    #[must_use]
    pub fn with_key(backend: Arc<K>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Key of the slot.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }
}

impl<K: KeyValueStore + ?Sized> SessionStore<K> {
    /// Read the slot, distinguishing an absent record from a broken one.
    ///
    /// # Errors
    /// [`StorageError::Malformed`] when the record does not parse, or the
    /// backend's read failure.
    pub fn try_load(&self) -> Result<Option<User>, StorageError> {
        let Some(raw) = self.backend.read(&self.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StorageError::malformed(err.to_string()))
    }

    /// Read the slot, treating any failure as "no session".
    ///
    /// A malformed record must never keep the app from starting, so the
    /// error is logged and discarded.
    #[must_use]
    pub fn load(&self) -> Option<User> {
        match self.try_load() {
            Ok(user) => user,
            Err(error) => {
                warn!(key = %self.key, %error, "ignoring unreadable session record");
                None
            }
        }
    }

    /// Overwrite the slot with `user`.
    ///
    /// # Errors
    /// The backend's write failure.
    pub fn save(&self, user: &User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user)
            .map_err(|err| StorageError::write(format!("failed to serialise session: {err}")))?;
        self.backend.write(&self.key, &raw)
    }

    /// Remove the slot. Clearing an empty slot succeeds.
    ///
    /// # Errors
    /// The backend's write failure.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    //! Round-trip and hardening coverage for the session slot.
    use super::*;
    use crate::domain::ports::MockKeyValueStore;
    use crate::domain::{Email, UserId, UserRole};
    use crate::test_support::MemorySlots;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> SessionStore<MemorySlots> {
        SessionStore::new(Arc::new(MemorySlots::default()))
    }

    fn user(id: u64, email: &str) -> User {
        let email = Email::new(email).expect("email");
        let role = UserRole::from_email(&email);
        User::new(UserId::new(id), email, role)
    }

    #[rstest]
    fn empty_slot_loads_nothing(store: SessionStore<MemorySlots>) {
        assert_eq!(store.load(), None);
        assert_eq!(store.try_load(), Ok(None));
    }

    #[rstest]
    fn load_after_save_returns_saved_user(store: SessionStore<MemorySlots>) {
        let saved = user(1, "ada@company.io");
        store.save(&saved).expect("save");
        assert_eq!(store.load(), Some(saved));
    }

    #[rstest]
    fn last_save_wins(store: SessionStore<MemorySlots>) {
        store.save(&user(1, "ada@acme.io")).expect("first save");
        store.save(&user(2, "bob@company.io")).expect("second save");
        assert_eq!(store.load(), Some(user(2, "bob@company.io")));
    }

    #[rstest]
    fn load_after_clear_returns_nothing(store: SessionStore<MemorySlots>) {
        store.save(&user(1, "ada@acme.io")).expect("save");
        store.clear().expect("clear");
        assert_eq!(store.load(), None);
    }

    #[rstest]
    fn clearing_twice_is_fine(store: SessionStore<MemorySlots>) {
        store.clear().expect("first clear");
        store.clear().expect("second clear");
    }

    #[rstest]
    #[case("{not json")]
    #[case("null")]
    #[case(r#"{"id":1,"email":"","type":"candidate"}"#)]
    #[case(r#"{"id":1,"email":"ada@acme.io","type":"admin"}"#)]
    fn malformed_record_is_treated_as_absent(#[case] raw: &str) {
        let slots = Arc::new(MemorySlots::default());
        slots.write(DEFAULT_SESSION_KEY, raw).expect("seed slot");
        let store = SessionStore::new(slots);

        assert!(matches!(
            store.try_load(),
            Err(StorageError::Malformed { .. })
        ));
        assert_eq!(store.load(), None);
    }

    #[rstest]
    fn custom_key_is_used_for_every_operation() {
        let slots = Arc::new(MemorySlots::default());
        let store = SessionStore::with_key(Arc::clone(&slots), "echelon.session");
        store.save(&user(5, "ada@acme.io")).expect("save");

        assert!(slots.read("echelon.session").expect("read").is_some());
        assert!(slots.read(DEFAULT_SESSION_KEY).expect("read").is_none());
        assert_eq!(store.key(), "echelon.session");
    }

    #[rstest]
    fn backend_read_failure_loads_nothing() {
        let mut backend = MockKeyValueStore::new();
        backend
            .expect_read()
            .times(2)
            .returning(|_| Err(StorageError::read("permission denied")));
        let store = SessionStore::new(Arc::new(backend));

        assert_eq!(store.try_load(), Err(StorageError::read("permission denied")));
        assert_eq!(store.load(), None);
    }

    #[rstest]
    fn backend_write_failure_is_reported() {
        let mut backend = MockKeyValueStore::new();
        backend
            .expect_write()
            .times(1)
            .returning(|_, _| Err(StorageError::write("quota exceeded")));
        let store = SessionStore::new(Arc::new(backend));

        let err = store.save(&user(1, "ada@acme.io")).expect_err("write fails");
        assert_eq!(err, StorageError::write("quota exceeded"));
    }
}
