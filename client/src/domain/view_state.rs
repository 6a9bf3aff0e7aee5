//! Top-level view state machine and its rendering rule.
//!
//! [`ViewState::apply`] is the whole transition table. It is pure so the
//! router can keep side effects (persistence, logging) outside of it.

use super::user::{Email, User, UserRole};

/// Which unauthenticated surface is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPrompt {
    /// `false` shows the landing page, `true` shows a form.
    pub show_auth_forms: bool,
    /// Login form when `true`, registration form when `false`.
    pub show_login: bool,
}

impl Default for AuthPrompt {
    fn default() -> Self {
        Self {
            show_auth_forms: false,
            show_login: true,
        }
    }
}

/// State of the whole application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Before the persisted session has been read. Visited once.
    #[default]
    Loading,
    /// Nobody is signed in.
    Unauthenticated(AuthPrompt),
    /// A user is signed in.
    Authenticated(User),
}

/// In-page navigation a user can request without talking to a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// "Get started" on the landing page.
    GetStarted,
    /// "Back to home" from the forms.
    Back,
    /// Flip between the login and registration forms.
    SwitchForm,
}

/// Every input the state machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Startup finished reading the session slot.
    SessionRestored(Option<User>),
    /// A navigation control was used.
    Navigate(Navigation),
    /// Login or registration succeeded.
    SignedIn(User),
    /// The user logged out.
    LoggedOut,
}

impl ViewState {
    /// Apply one event, returning the next state.
    ///
    /// Events that make no sense in the current state leave it unchanged.
    ///
    /// # Examples
    /// ```
    /// use echelon::domain::{AuthPrompt, Navigation, ViewEvent, ViewState};
    ///
    /// let state = ViewState::Loading
    ///     .apply(ViewEvent::SessionRestored(None))
    ///     .apply(ViewEvent::Navigate(Navigation::GetStarted));
    /// assert_eq!(
    ///     state,
    ///     ViewState::Unauthenticated(AuthPrompt { show_auth_forms: true, show_login: true })
    /// );
    /// ```
    #[must_use]
    pub fn apply(self, event: ViewEvent) -> Self {
        match (self, event) {
            (Self::Loading, ViewEvent::SessionRestored(Some(user))) => Self::Authenticated(user),
            (Self::Loading, ViewEvent::SessionRestored(None)) => {
                Self::Unauthenticated(AuthPrompt::default())
            }
            (Self::Unauthenticated(prompt), ViewEvent::Navigate(navigation)) => {
                Self::Unauthenticated(prompt.navigate(navigation))
            }
            (Self::Unauthenticated(_) | Self::Authenticated(_), ViewEvent::SignedIn(user)) => {
                Self::Authenticated(user)
            }
            (_, ViewEvent::LoggedOut) => Self::Unauthenticated(AuthPrompt::default()),
            (state, _) => state,
        }
    }

    /// Whether startup restore is still pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Loading | Self::Unauthenticated(_) => None,
        }
    }
}

impl AuthPrompt {
    const fn navigate(self, navigation: Navigation) -> Self {
        match navigation {
            Navigation::GetStarted => Self {
                show_auth_forms: true,
                ..self
            },
            Navigation::Back => Self {
                show_auth_forms: false,
                ..self
            },
            Navigation::SwitchForm if self.show_auth_forms => Self {
                show_login: !self.show_login,
                ..self
            },
            Navigation::SwitchForm => self,
        }
    }
}

/// Dashboard flavour selected by the user's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardKind {
    /// Challenges and submissions.
    Candidate,
    /// Candidate leaderboard.
    Company,
}

impl From<UserRole> for DashboardKind {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Candidate => Self::Candidate,
            UserRole::Company => Self::Company,
        }
    }
}

/// Navigation bar shown above every dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationBar {
    /// Email of the signed-in user.
    pub email: Email,
}

/// What should be on screen for a given [`ViewState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Spinner shown until the session is restored.
    Loading,
    /// Marketing page with the "get started" entry point.
    Landing,
    /// Email and password form.
    LoginForm,
    /// Email and role form.
    RegisterForm,
    /// A signed-in user's workspace.
    Dashboard {
        /// Bar naming the signed-in user.
        navigation: NavigationBar,
        /// Which dashboard the role selects.
        kind: DashboardKind,
    },
}

impl Screen {
    /// Rendering rule: authenticated users get their role's dashboard,
    /// everyone else the landing or auth surfaces.
    #[must_use]
    pub fn for_view(view: &ViewState) -> Self {
        match view {
            ViewState::Loading => Self::Loading,
            ViewState::Unauthenticated(AuthPrompt {
                show_auth_forms: false,
                ..
            }) => Self::Landing,
            ViewState::Unauthenticated(AuthPrompt {
                show_login: true, ..
            }) => Self::LoginForm,
            ViewState::Unauthenticated(_) => Self::RegisterForm,
            ViewState::Authenticated(user) => Self::Dashboard {
                navigation: NavigationBar {
                    email: user.email().clone(),
                },
                kind: user.role().into(),
            },
        }
    }
}
