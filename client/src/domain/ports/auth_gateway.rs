//! Driven port for the remote auth collaborator.
//!
//! Implementations only talk to the collaborator. Persisting the returned
//! user is the router's job, so a late response can be dropped before it
//! touches the session slot.

use async_trait::async_trait;

use crate::domain::{AuthError, LoginCredentials, RegisterError, Registration, User};

/// Remote login and account creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for the signed-in user.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, AuthError>;

    /// Create an account and return it as the signed-in user.
    async fn register(&self, registration: &Registration) -> Result<User, RegisterError>;
}
