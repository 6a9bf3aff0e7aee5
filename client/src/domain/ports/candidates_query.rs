//! Driven port feeding the company dashboard.

use async_trait::async_trait;

use crate::domain::{Candidate, FetchError};

/// Ranked candidates recommended to a company.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidatesQuery: Send + Sync {
    /// Top recommended candidates, best first.
    async fn list_candidates(&self) -> Result<Vec<Candidate>, FetchError>;
}
