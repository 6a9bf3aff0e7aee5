//! Company dashboard: recommended candidates.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::lifecycle::Mounted;
use super::{FetchOutcome, LoadState};
use crate::domain::ports::CandidatesQuery;
use crate::domain::{Candidate, FetchError};

/// Point-in-time copy of the presenter state for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySnapshot {
    /// Candidate list progress.
    pub data: LoadState<Vec<Candidate>>,
}

/// Presenter behind the company dashboard.
pub struct CompanyDashboard<Q: ?Sized> {
    query: Arc<Q>,
    slot: Mutex<Mounted<Vec<Candidate>>>,
}

impl<Q: CandidatesQuery + ?Sized> CompanyDashboard<Q> {
    /// Create an unmounted presenter.
    #[must_use]
    pub fn new(query: Arc<Q>) -> Self {
        Self {
            query,
            slot: Mutex::new(Mounted::default()),
        }
    }

    /// Show the dashboard with fresh local state.
    pub fn mount(&self) {
        self.lock().mount();
    }

    /// Hide the dashboard. In-flight fetches will be discarded.
    pub fn unmount(&self) {
        self.lock().unmount();
    }

    /// Whether the dashboard is on screen.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.lock().is_mounted()
    }

    /// Copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> CompanySnapshot {
        CompanySnapshot {
            data: self.lock().data().clone(),
        }
    }

    /// Fetch the recommended candidates.
    ///
    /// # Errors
    /// Returns the [`FetchError`] if the mounted dashboard's fetch failed.
    pub async fn load(&self) -> Result<FetchOutcome, FetchError> {
        let Some(generation) = self.lock().begin() else {
            debug!("company dashboard not mounted; skipping fetch");
            return Ok(FetchOutcome::Discarded);
        };
        let result = self.query.list_candidates().await;
        self.lock().finish(generation, result)
    }

    fn lock(&self) -> MutexGuard<'_, Mounted<Vec<Candidate>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
