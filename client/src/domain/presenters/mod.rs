//! Role-specific dashboard presenters.
//!
//! A presenter is mounted when its dashboard appears and unmounted when it
//! goes away. Mounting resets all local state. Fetches capture the mount
//! generation at dispatch and only apply their results if that generation is
//! still live, so a slow response never lands on a dashboard that has since
//! been left or re-entered.

mod candidate;
mod company;
mod lifecycle;

pub use self::candidate::{CandidateDashboard, CandidateSnapshot, CandidateTab, ChallengeBoard};
pub use self::company::{CompanyDashboard, CompanySnapshot};

use crate::domain::FetchError;

/// Progress of a presenter's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    /// Nothing requested since mount.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The fetch succeeded.
    Loaded(T),
    /// The fetch failed; shown until the next mount.
    Failed(FetchError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> LoadState<T> {
    /// Loaded data, if any.
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            Self::Idle | Self::Loading | Self::Failed(_) => None,
        }
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Results were stored on the presenter.
    Applied,
    /// The presenter was unmounted or remounted meanwhile; results dropped.
    Discarded,
}
