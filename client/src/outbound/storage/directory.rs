//! Directory-backed key-value store.
//!
//! Each key is one `<key>.json` file inside a capability-scoped directory.
//! Writes go to a hidden temporary file that is then renamed over the target,
//! so a crash mid-write leaves either the old record or the new one.

use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::domain::StorageError;
use crate::domain::ports::KeyValueStore;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// [`KeyValueStore`] persisting one file per key.
#[derive(Debug)]
pub struct DirectoryKeyValueStore {
    dir: Dir,
}

impl DirectoryKeyValueStore {
    /// Open `path`, creating it and any missing parents.
    ///
    /// # Errors
    /// Returns [`StorageError::Write`] if the directory cannot be created and
    /// [`StorageError::Read`] if it cannot be opened.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|err| {
            StorageError::write(format!("create {}: {err}", path.display()))
        })?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| StorageError::read(format!("open {}: {err}", path.display())))?;
        debug!(path = %path.display(), "opened session storage directory");
        Ok(Self::from_dir(dir))
    }

    /// Wrap an already opened directory handle.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

/// File name for `key`, which must name a single plain file.
fn slot_file(key: &str) -> Result<Utf8PathBuf, io::Error> {
    let file = Utf8PathBuf::from(format!("{key}.json"));
    let mut components = file.components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(_)), None) if !key.is_empty() => Ok(file),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("storage key {key:?} must be a plain file name"),
        )),
    }
}

impl KeyValueStore for DirectoryKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let file = slot_file(key).map_err(|err| StorageError::read(err.to_string()))?;
        match self.dir.read_to_string(&file) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::read(format!("{file}: {err}"))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let file = slot_file(key).map_err(|err| StorageError::write(err.to_string()))?;
        replace_file(&self.dir, &file, value)
            .map_err(|err| StorageError::write(format!("{file}: {err}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let file = slot_file(key).map_err(|err| StorageError::write(err.to_string()))?;
        match self.dir.remove_file(&file) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::write(format!("{file}: {err}"))),
        }
    }
}

/// Write `contents` to a temporary sibling and rename it over `target`.
fn replace_file(dir: &Dir, target: &Utf8Path, contents: &str) -> io::Result<()> {
    let tmp = format!(
        ".{target}.tmp.{}.{}",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    let written = write_synced(dir, &tmp, contents).and_then(|()| rename_over(dir, &tmp, target));
    if written.is_err() && dir.remove_file(&tmp).is_err() {
        debug!(tmp = %tmp, "temporary session file already gone");
    }
    written?;
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        debug!("directory sync unsupported; continuing");
    }
    Ok(())
}

fn write_synced(dir: &Dir, name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn rename_over(dir: &Dir, from: &str, to: &Utf8Path) -> io::Result<()> {
    // Rename refuses to replace an existing file on Windows.
    match dir.remove_file(to) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(from, dir, to)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, from: &str, to: &Utf8Path) -> io::Result<()> {
    dir.rename(from, dir, to)
}
