//! Authentication inputs: login credentials and registration requests.
//!
//! Form fields are validated here so the router never hands blank values to
//! the auth collaborator.

use zeroize::Zeroizing;

use super::error::{AuthError, RegisterError};
use super::user::{Email, UserRole, UserValidationError};

/// Domain error returned when login form values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl From<LoginValidationError> for AuthError {
    fn from(_: LoginValidationError) -> Self {
        Self::InvalidCredentials
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim; it is wiped on drop.
///
/// # Examples
/// ```
/// use echelon::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada@acme.io", "pw").unwrap();
/// assert_eq!(creds.email().as_str(), "ada@acme.io");
/// assert!(LoginCredentials::try_from_parts("", "pw").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let address = Email::new(email).map_err(|_| LoginValidationError::EmptyEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: address,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email the user typed.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Password the user typed.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated account creation request.
///
/// The role defaults to [`UserRole::Candidate`] when the form omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: Email,
    role: UserRole,
}

impl Registration {
    /// Build a registration from optional form inputs.
    ///
    /// # Examples
    /// ```
    /// use echelon::domain::{Registration, UserRole};
    ///
    /// let reg = Registration::try_from_parts(Some("ada@acme.io"), None).unwrap();
    /// assert_eq!(reg.role(), UserRole::Candidate);
    /// ```
    pub fn try_from_parts(
        email: Option<&str>,
        role: Option<UserRole>,
    ) -> Result<Self, RegisterError> {
        let address = email
            .map(Email::new)
            .transpose()
            .map_err(|err: UserValidationError| {
                tracing::debug!(error = %err, "registration email rejected");
                RegisterError::MissingEmail
            })?
            .ok_or(RegisterError::MissingEmail)?;
        Ok(Self {
            email: address,
            role: role.unwrap_or_default(),
        })
    }

    /// Email for the new account.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Requested account type.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "x", LoginValidationError::EmptyEmail)]
    #[case("   ", "x", LoginValidationError::EmptyEmail)]
    #[case("x", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
        assert_eq!(AuthError::from(err), AuthError::InvalidCredentials);
    }

    #[rstest]
    #[case("  ada@acme.io  ", " spaced pw ")]
    #[case("ada@company.io", "correct horse battery staple")]
    fn valid_credentials_trim_email_only(#[case] email: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email().as_str(), email.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("  "))]
    fn registration_requires_email(#[case] email: Option<&str>) {
        let err = Registration::try_from_parts(email, Some(UserRole::Company))
            .expect_err("missing email");
        assert_eq!(err, RegisterError::MissingEmail);
    }

    #[rstest]
    #[case(None, UserRole::Candidate)]
    #[case(Some(UserRole::Candidate), UserRole::Candidate)]
    #[case(Some(UserRole::Company), UserRole::Company)]
    fn registration_role_defaults_to_candidate(
        #[case] role: Option<UserRole>,
        #[case] expected: UserRole,
    ) {
        let reg = Registration::try_from_parts(Some("ada@acme.io"), role).expect("valid");
        assert_eq!(reg.role(), expected);
        assert_eq!(reg.email().as_str(), "ada@acme.io");
    }
}
