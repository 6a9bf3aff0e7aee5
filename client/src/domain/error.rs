//! Domain-level error types.
//!
//! None of these are fatal: every failure leaves the current view untouched
//! so the user can simply try again. Adapters map their own failures into
//! the storage and fetch variants instead of leaking I/O types.

use thiserror::Error;

/// Login failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email or password was missing.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The auth collaborator refused the request.
    #[error("login rejected: {message}")]
    Rejected {
        /// Reason given by the collaborator.
        message: String,
    },
}

impl AuthError {
    /// Helper for collaborator refusals.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// No usable email was supplied.
    #[error("an email address is required to register")]
    MissingEmail,
    /// The auth collaborator refused the request.
    #[error("registration rejected: {message}")]
    Rejected {
        /// Reason given by the collaborator.
        message: String,
    },
}

impl RegisterError {
    /// Helper for collaborator refusals.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Errors raised by the session slot and its key-value backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The persisted record is not a valid user.
    #[error("persisted session is malformed: {message}")]
    Malformed {
        /// Why the record could not be decoded.
        message: String,
    },
    /// The backend could not be read.
    #[error("session storage read failed: {message}")]
    Read {
        /// Backend failure detail.
        message: String,
    },
    /// The backend could not be written or cleared.
    #[error("session storage write failed: {message}")]
    Write {
        /// Backend failure detail.
        message: String,
    },
}

impl StorageError {
    /// Helper for unparsable records.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Helper for read failures.
    #[must_use]
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Helper for write failures.
    #[must_use]
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}

/// Errors surfaced by dashboard data collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The collaborator could not be reached.
    #[error("data source unavailable: {message}")]
    Unavailable {
        /// Transport failure detail.
        message: String,
    },
    /// The collaborator answered with something unusable.
    #[error("data source rejected the request: {message}")]
    Rejected {
        /// What was wrong with the answer.
        message: String,
    },
}

impl FetchError {
    /// Helper for unreachable collaborators.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Helper for rejected or unusable responses.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Failures of router operations that change who is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Login failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Registration failed.
    #[error(transparent)]
    Register(#[from] RegisterError),
    /// The session slot could not be written.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Sign-in was requested outside the signed-out views.
    #[error("sign-in is only available while signed out")]
    NotSignedOut,
}
