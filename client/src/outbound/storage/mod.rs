//! Key-value storage adapters for the session slot.

mod directory;
mod memory;

pub use self::directory::DirectoryKeyValueStore;
pub use self::memory::InMemoryKeyValueStore;
