//! View router: owns the current [`ViewState`] and the session write-through.
//!
//! Login and registration suspend while the auth collaborator answers, and
//! the UI stays live in the meantime. Every login, registration and logout
//! therefore takes a ticket when it starts. A completion is applied only if
//! its ticket is newer than the last one applied, so the final view always
//! reflects the most recently started successful operation and a late
//! response can never resurrect a session the user already left.
//!
//! A sign-in can only start from a signed-out view. Switching users always
//! goes through a logout first.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::domain::ports::{AuthGateway, KeyValueStore};
use crate::domain::{
    AuthError, LoginCredentials, Navigation, Registration, Screen, SessionError, SessionStore,
    StorageError, User, UserRole, ViewEvent, ViewState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Ticket(u64);

#[derive(Debug, Default)]
struct RouterState {
    view: ViewState,
    issued: u64,
    applied: u64,
}

impl RouterState {
    fn transition(&mut self, event: ViewEvent) {
        let current = std::mem::take(&mut self.view);
        self.view = current.apply(event);
    }
}

/// Drives the application between loading, signed-out and signed-in views.
pub struct ViewRouter<K: ?Sized, G: ?Sized> {
    sessions: SessionStore<K>,
    gateway: Arc<G>,
    state: Mutex<RouterState>,
}

impl<K, G> ViewRouter<K, G>
where
    K: KeyValueStore + ?Sized,
    G: AuthGateway + ?Sized,
{
    /// Create a router in the [`ViewState::Loading`] state.
    #[must_use]
    pub fn new(sessions: SessionStore<K>, gateway: Arc<G>) -> Self {
        Self {
            sessions,
            gateway,
            state: Mutex::new(RouterState::default()),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.lock().view.clone()
    }

    /// What the current state renders as.
    #[must_use]
    pub fn screen(&self) -> Screen {
        Screen::for_view(&self.lock().view)
    }

    /// Leave [`ViewState::Loading`] using whatever the session slot holds.
    ///
    /// Only the first call has an effect; `Loading` is never re-entered.
    pub fn restore(&self) -> ViewState {
        let mut state = self.lock();
        if !state.view.is_loading() {
            debug!("session already restored");
            return state.view.clone();
        }
        let user = self.sessions.load();
        match &user {
            Some(user) => info!(user_id = %user.id(), role = %user.role(), "session restored"),
            None => debug!("no persisted session"),
        }
        state.transition(ViewEvent::SessionRestored(user));
        state.view.clone()
    }

    /// Apply an in-page navigation request.
    pub fn navigate(&self, navigation: Navigation) -> ViewState {
        let mut state = self.lock();
        let before = state.view.clone();
        state.transition(ViewEvent::Navigate(navigation));
        if state.view == before {
            debug!(?navigation, "navigation ignored in current view");
        }
        state.view.clone()
    }

    /// Sign in with the login form values.
    ///
    /// Blank fields fail with [`AuthError::InvalidCredentials`] before the
    /// collaborator is contacted. Any failure leaves the view unchanged.
    ///
    /// # Errors
    /// [`SessionError::NotSignedOut`] unless the view is unauthenticated,
    /// validation and collaborator failures, or a failed write-through.
    pub async fn login(&self, email: &str, password: &str) -> Result<ViewState, SessionError> {
        let credentials =
            LoginCredentials::try_from_parts(email, password).map_err(AuthError::from)?;
        let ticket = self.issue()?;
        let user = self.gateway.login(&credentials).await?;
        self.complete(ticket, user)
    }

    /// Create an account with the registration form values.
    ///
    /// # Errors
    /// [`SessionError::NotSignedOut`] unless the view is unauthenticated,
    /// [`crate::domain::RegisterError::MissingEmail`] without an email, or a
    /// collaborator or storage failure.
    pub async fn register(
        &self,
        email: Option<&str>,
        role: Option<UserRole>,
    ) -> Result<ViewState, SessionError> {
        let registration = Registration::try_from_parts(email, role)?;
        let ticket = self.issue()?;
        let user = self.gateway.register(&registration).await?;
        self.complete(ticket, user)
    }

    /// Clear the session and return to the landing page.
    ///
    /// Works from any state. If the slot cannot be cleared the view is left
    /// as it was so the persisted record and the view never disagree.
    ///
    /// # Errors
    /// The backend failure from clearing the slot.
    pub fn logout(&self) -> Result<ViewState, StorageError> {
        let mut state = self.lock();
        self.sessions.clear()?;
        state.issued += 1;
        state.applied = state.issued;
        if let Some(user) = state.view.user() {
            info!(user_id = %user.id(), "logged out");
        }
        state.transition(ViewEvent::LoggedOut);
        Ok(state.view.clone())
    }

    fn issue(&self) -> Result<Ticket, SessionError> {
        let mut state = self.lock();
        if !matches!(state.view, ViewState::Unauthenticated(_)) {
            debug!("sign-in refused outside signed-out views");
            return Err(SessionError::NotSignedOut);
        }
        state.issued += 1;
        Ok(Ticket(state.issued))
    }

    fn complete(&self, ticket: Ticket, user: User) -> Result<ViewState, SessionError> {
        let mut state = self.lock();
        if ticket <= Ticket(state.applied) {
            debug!(
                ticket = ticket.0,
                applied = state.applied,
                "discarding superseded sign-in"
            );
            return Ok(state.view.clone());
        }
        self.sessions.save(&user)?;
        state.applied = ticket.0;
        info!(user_id = %user.id(), role = %user.role(), "signed in");
        state.transition(ViewEvent::SignedIn(user));
        Ok(state.view.clone())
    }

    fn lock(&self) -> MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
