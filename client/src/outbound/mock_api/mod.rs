//! In-process stand-in for the remote collaborator.
//!
//! Every login answers with id `1` and a role derived from the email.
//! Registrations get clock-derived ids. Dashboard collections are fixed
//! literals. An optional latency makes overlapping requests reproducible by
//! hand.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::ports::{AuthGateway, CandidatesQuery, ChallengesQuery};
use crate::domain::{
    AuthError, Candidate, FetchError, LoginCredentials, Project, RegisterError, Registration,
    Submission, User, UserId, UserRole,
};

const PROJECTS: &str = include_str!("../../../fixtures/mock_api/projects.json");
const SUBMISSIONS: &str = include_str!("../../../fixtures/mock_api/submissions.json");
const CANDIDATES: &str = include_str!("../../../fixtures/mock_api/candidates.json");

/// Every login resolves to this id.
pub const LOGIN_USER_ID: UserId = UserId::new(1);

/// Mock collaborator implementing every remote port.
pub struct MockApi {
    clock: Arc<dyn Clock + Send + Sync>,
    latency: Duration,
    last_id: Mutex<u64>,
}

impl MockApi {
    /// Respond immediately, deriving registration ids from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            clock,
            latency: Duration::ZERO,
            last_id: Mutex::new(0),
        }
    }

    /// Delay every response by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn respond(&self, operation: &'static str) {
        if !self.latency.is_zero() {
            debug!(operation, latency_ms = self.latency.as_millis(), "delaying mock response");
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Unix milliseconds, bumped past the last id handed out.
    fn next_id(&self) -> UserId {
        let now = u64::try_from(self.clock.utc().timestamp_millis()).unwrap_or_default();
        let mut last = self.last_id();
        let id = now.max(last.saturating_add(1));
        *last = id;
        UserId::new(id)
    }

    fn last_id(&self) -> MutexGuard<'_, u64> {
        self.last_id.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn decode<T: DeserializeOwned>(collection: &str, raw: &str) -> Result<T, FetchError> {
    serde_json::from_str(raw)
        .map_err(|err| FetchError::rejected(format!("malformed {collection} payload: {err}")))
}

#[async_trait]
impl AuthGateway for MockApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, AuthError> {
        self.respond("login").await;
        let email = credentials.email().clone();
        let role = UserRole::from_email(&email);
        Ok(User::new(LOGIN_USER_ID, email, role))
    }

    async fn register(&self, registration: &Registration) -> Result<User, RegisterError> {
        self.respond("register").await;
        Ok(User::new(
            self.next_id(),
            registration.email().clone(),
            registration.role(),
        ))
    }
}

#[async_trait]
impl ChallengesQuery for MockApi {
    async fn list_projects(&self) -> Result<Vec<Project>, FetchError> {
        self.respond("list_projects").await;
        decode("projects", PROJECTS)
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>, FetchError> {
        self.respond("list_submissions").await;
        decode("submissions", SUBMISSIONS)
    }
}

#[async_trait]
impl CandidatesQuery for MockApi {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, FetchError> {
        self.respond("list_candidates").await;
        decode("candidates", CANDIDATES)
    }
}
