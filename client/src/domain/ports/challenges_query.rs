//! Driven port feeding the candidate dashboard.

use async_trait::async_trait;

use crate::domain::{FetchError, Project, Submission};

/// Challenges on offer and the signed-in candidate's submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChallengesQuery: Send + Sync {
    /// Challenges the candidate can start.
    async fn list_projects(&self) -> Result<Vec<Project>, FetchError>;

    /// Evaluated submissions, newest first.
    async fn list_submissions(&self) -> Result<Vec<Submission>, FetchError>;
}
