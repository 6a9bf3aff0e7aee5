//! Client settings loaded via OrthoConfig.
//!
//! Values come from `ECHELON_*` environment variables, a config file, or
//! command-line flags. Every field is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_SESSION_KEY;

/// Settings for the `echelon` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ECHELON")]
pub struct EchelonSettings {
    /// Directory holding the persisted session. In-memory when unset.
    pub storage_dir: Option<PathBuf>,
    /// Key the session record is stored under.
    pub session_key: Option<String>,
    /// Artificial delay applied to every mock collaborator response.
    pub latency_ms: Option<u64>,
    /// Emit JSON log lines instead of human-readable ones.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl EchelonSettings {
    /// Configured storage directory, if sessions should outlive the process.
    #[must_use]
    pub fn storage_dir(&self) -> Option<&Path> {
        self.storage_dir.as_deref()
    }

    /// Session key, falling back to `user`.
    #[must_use]
    pub fn session_key(&self) -> &str {
        self.session_key.as_deref().unwrap_or(DEFAULT_SESSION_KEY)
    }

    /// Mock collaborator latency; zero when unset.
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms.unwrap_or_default())
    }
}
