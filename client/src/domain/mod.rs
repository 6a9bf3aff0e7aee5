//! Domain primitives, ports and services of the Echelon client.
//!
//! Purpose: hold the session/view state machine and everything it reasons
//! about, free of storage, runtime and terminal concerns. Adapters plug in
//! through the traits in [`ports`].
//!
//! Public surface:
//! - `User`, `Email`, `UserRole`: the signed-in identity and its persisted form.
//! - `SessionStore`: load, save and clear of the single session record.
//! - `ViewState`, `Screen`: the top-level state and what it renders as.
//! - `ViewRouter`: applies navigation and auth outcomes to the view.
//! - `CandidateDashboard`, `CompanyDashboard`: role-specific presenters.

pub mod auth;
pub mod error;
pub mod listings;
pub mod ports;
pub mod presenters;
pub mod session_store;
pub mod user;
pub mod view_router;
pub mod view_state;

pub use self::auth::{LoginCredentials, LoginValidationError, Registration};
pub use self::error::{AuthError, FetchError, RegisterError, SessionError, StorageError};
pub use self::listings::{
    average_score, parse_submission_date, Candidate, Difficulty, Project, Submission,
};
pub use self::presenters::{
    CandidateDashboard, CandidateSnapshot, CandidateTab, ChallengeBoard, CompanyDashboard,
    CompanySnapshot, FetchOutcome, LoadState,
};
pub use self::session_store::{SessionStore, DEFAULT_SESSION_KEY};
pub use self::user::{Email, User, UserId, UserRole, UserValidationError};
pub use self::view_router::ViewRouter;
pub use self::view_state::{
    AuthPrompt, DashboardKind, Navigation, NavigationBar, Screen, ViewEvent, ViewState,
};
