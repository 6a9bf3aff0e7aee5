//! Shared test doubles for unit tests.
//!
//! The gated doubles hand out responses only when the test releases them, so
//! overlapping requests can be resolved in a chosen order.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::domain::ports::{AuthGateway, ChallengesQuery, KeyValueStore};
use crate::domain::{
    AuthError, Email, FetchError, LoginCredentials, Project, RegisterError, Registration,
    StorageError, Submission, User, UserId, UserRole,
};

/// Key-value store fake backed by a map.
#[derive(Debug, Default)]
pub struct MemorySlots(Mutex<HashMap<String, String>>);

impl KeyValueStore for MemorySlots {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.0.lock().expect("slots poisoned").get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0
            .lock()
            .expect("slots poisoned")
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.0.lock().expect("slots poisoned").remove(key);
        Ok(())
    }
}

/// Build a user whose role follows the email, as the mock collaborator does.
pub fn user(id: u64, email: &str) -> User {
    let email = Email::new(email).expect("valid email");
    let role = UserRole::from_email(&email);
    User::new(UserId::new(id), email, role)
}

type LoginReply = oneshot::Receiver<Result<User, AuthError>>;

/// Auth gateway whose login responses are released by the test.
///
/// Each `login` call takes the next queued receiver in call order.
/// Registration resolves immediately with the requested account.
#[derive(Default)]
pub struct GatedGateway {
    replies: Mutex<VecDeque<LoginReply>>,
}

impl GatedGateway {
    /// Queue a reply slot and return the sender that resolves it.
    pub fn queue_login(&self) -> oneshot::Sender<Result<User, AuthError>> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().expect("replies poisoned").push_back(rx);
        tx
    }
}

#[async_trait]
impl AuthGateway for GatedGateway {
    async fn login(&self, _credentials: &LoginCredentials) -> Result<User, AuthError> {
        let reply = self
            .replies
            .lock()
            .expect("replies poisoned")
            .pop_front()
            .expect("login reply queued");
        reply
            .await
            .unwrap_or_else(|_| Err(AuthError::rejected("reply dropped")))
    }

    async fn register(&self, registration: &Registration) -> Result<User, RegisterError> {
        Ok(User::new(
            UserId::new(42),
            registration.email().clone(),
            registration.role(),
        ))
    }
}

/// Challenges query whose project list is released by the test.
pub struct GatedChallenges {
    projects: Mutex<Option<oneshot::Receiver<Vec<Project>>>>,
    submissions: Vec<Submission>,
}

impl GatedChallenges {
    /// Gate the project list; submissions resolve immediately.
    pub fn new(submissions: Vec<Submission>) -> (Self, oneshot::Sender<Vec<Project>>) {
        let (tx, rx) = oneshot::channel();
        let query = Self {
            projects: Mutex::new(Some(rx)),
            submissions,
        };
        (query, tx)
    }
}

#[async_trait]
impl ChallengesQuery for GatedChallenges {
    async fn list_projects(&self) -> Result<Vec<Project>, FetchError> {
        let gate = self.projects.lock().expect("gate poisoned").take();
        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| FetchError::unavailable("gate dropped")),
            None => Ok(Vec::new()),
        }
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>, FetchError> {
        Ok(self.submissions.clone())
    }
}

/// A small project list.
pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "Build a Microservices Architecture".to_owned(),
            description: "Service discovery and an API gateway.".to_owned(),
            time_limit: 120,
            difficulty: "Expert".to_owned(),
            tags: vec!["Microservices".to_owned(), "Docker".to_owned()],
            estimated_score: 95,
            completions: 234,
        },
        Project {
            id: 3,
            title: "ML-Powered Recommendation Engine".to_owned(),
            description: "Collaborative filtering.".to_owned(),
            time_limit: 90,
            difficulty: "Advanced".to_owned(),
            tags: vec!["Python".to_owned(), "ML".to_owned()],
            estimated_score: 92,
            completions: 156,
        },
    ]
}

/// Submissions scored 94 and 87.
pub fn submissions() -> Vec<Submission> {
    [(1, "Real-time Trading Dashboard", 15, 94), (2, "Build a Microservices Architecture", 12, 87)]
        .into_iter()
        .map(|(id, title, day, score)| Submission {
            id,
            project_title: title.to_owned(),
            submitted_at: chrono::NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date"),
            score,
            status: "evaluated".to_owned(),
            rank: "12th percentile".to_owned(),
            feedback: "Solid work".to_owned(),
        })
        .collect()
}
