//! Session user model.
//!
//! A [`User`] is the only record that survives a reload. Its serialised form
//! is the persisted session slot: `{"id": 1, "email": "...", "type": "..."}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Account type was not one of `candidate` or `company`.
    #[error("unknown account type `{value}`; expected candidate or company")]
    UnknownRole {
        /// The rejected input.
        value: String,
    },
}

/// Stable numeric user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address as entered by the user.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed.
/// - The trimmed value is non-empty.
///
/// No further syntax checks are applied; the form field is the only gate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    ///
    /// # Examples
    /// ```
    /// use echelon::domain::Email;
    ///
    /// let email = Email::new("  ada@acme.io ").unwrap();
    /// assert_eq!(email.as_str(), "ada@acme.io");
    /// assert!(Email::new("   ").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.len() == email.len() {
            return Ok(Self(email));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Account type; selects which dashboard an authenticated user sees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Takes challenges and collects scores.
    #[default]
    Candidate,
    /// Browses ranked candidates.
    Company,
}

impl UserRole {
    /// Role implied by an email address at login.
    ///
    /// Addresses containing `company` sign in as companies; everything else
    /// is a candidate. This is a placeholder until accounts carry their role
    /// server-side, and it is not an authorisation check.
    ///
    /// # Examples
    /// ```
    /// use echelon::domain::{Email, UserRole};
    ///
    /// let hiring = Email::new("alice@company.io").unwrap();
    /// assert_eq!(UserRole::from_email(&hiring), UserRole::Company);
    /// let dev = Email::new("alice@acme.io").unwrap();
    /// assert_eq!(UserRole::from_email(&dev), UserRole::Candidate);
    /// ```
    #[must_use]
    pub fn from_email(email: &Email) -> Self {
        if email.as_str().contains("company") {
            Self::Company
        } else {
            Self::Candidate
        }
    }

    /// Wire tag used in the persisted record.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "candidate" => Ok(Self::Candidate),
            "company" => Ok(Self::Company),
            _ => Err(UserValidationError::UnknownRole {
                value: value.to_owned(),
            }),
        }
    }
}

/// Authenticated user, immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: Email,
    #[serde(rename = "type")]
    role: UserRole,
}

impl User {
    /// Assemble a user from validated parts.
    #[must_use]
    pub const fn new(id: UserId, email: Email, role: UserRole) -> Self {
        Self { id, email, role }
    }

    /// Identifier assigned by the auth collaborator.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Email the user signed in with.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Account type.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }
}

#[cfg(test)]
mod tests;
