//! Line-oriented terminal front end.
//!
//! The shell stands in for the browser: it reads one command per line,
//! feeds it to the view router or the active presenter, and prints the
//! resulting screen. Auth calls and dashboard fetches run concurrently with
//! input handling, so a second command can be typed while a slow login is
//! still outstanding; the router and presenters decide which result sticks.

mod command;
mod render;

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::LocalBoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

pub use self::command::{Command, CommandError, HELP};

use crate::domain::ports::{AuthGateway, CandidatesQuery, ChallengesQuery, KeyValueStore};
use crate::domain::{
    CandidateDashboard, CompanyDashboard, DashboardKind, FetchError, FetchOutcome, Navigation,
    SessionError, SessionStore, User, ViewRouter, ViewState,
};

/// Notice shown when login fails for any reason.
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
/// Notice shown when registration fails for any reason.
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

type Pending<'a> = FuturesUnordered<LocalBoxFuture<'a, Completion>>;

enum Completion {
    SignIn {
        result: Result<ViewState, SessionError>,
        failure: &'static str,
    },
    Loaded {
        dashboard: DashboardKind,
        result: Result<FetchOutcome, FetchError>,
    },
}

enum Reply {
    /// Print notices, then the current screen.
    Show(Vec<String>),
    /// Print a line without re-rendering.
    Note(String),
    /// Nothing to print yet.
    Silent,
    /// Stop reading input.
    Quit,
}

/// Terminal session over a router and both presenters.
pub struct Shell {
    router: ViewRouter<dyn KeyValueStore, dyn AuthGateway>,
    candidate: CandidateDashboard<dyn ChallengesQuery>,
    company: CompanyDashboard<dyn CandidatesQuery>,
    active: Mutex<Option<User>>,
}

impl Shell {
    /// Assemble a shell from already built components.
    #[must_use]
    pub fn new(
        router: ViewRouter<dyn KeyValueStore, dyn AuthGateway>,
        candidate: CandidateDashboard<dyn ChallengesQuery>,
        company: CompanyDashboard<dyn CandidatesQuery>,
    ) -> Self {
        Self {
            router,
            candidate,
            company,
            active: Mutex::new(None),
        }
    }

    /// Wire every collaborator port to the same remote adapter.
    #[must_use]
    pub fn with_collaborator<A>(sessions: SessionStore<dyn KeyValueStore>, remote: Arc<A>) -> Self
    where
        A: AuthGateway + ChallengesQuery + CandidatesQuery + 'static,
    {
        let auth: Arc<dyn AuthGateway> = remote.clone();
        let challenges: Arc<dyn ChallengesQuery> = remote.clone();
        let candidates: Arc<dyn CandidatesQuery> = remote;
        Self::new(
            ViewRouter::new(sessions, auth),
            CandidateDashboard::new(challenges),
            CompanyDashboard::new(candidates),
        )
    }

    /// Current top-level state.
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.router.view()
    }

    /// Restore the session, then process `input` until it ends or `quit`.
    ///
    /// Output for every command is written to `out`. Operations still in
    /// flight when input ends are awaited and reported before returning.
    ///
    /// # Errors
    /// Propagates I/O failures from reading `input` or writing `out`.
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut pending = Pending::new();
        self.router.restore();
        let reply = self.sync_dashboards(&mut pending);
        self.emit(reply, out)?;

        let mut lines = input.lines();
        loop {
            tokio::select! {
                biased;
                Some(completion) = pending.next() => {
                    let reply = self.complete(completion, &mut pending);
                    self.emit(reply, out)?;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let reply = self.handle_line(&line, &mut pending);
                    if matches!(reply, Reply::Quit) {
                        return Ok(());
                    }
                    self.emit(reply, out)?;
                }
            }
        }

        while let Some(completion) = pending.next().await {
            let reply = self.complete(completion, &mut pending);
            self.emit(reply, out)?;
        }
        Ok(())
    }

    fn handle_line<'a>(&'a self, line: &str, pending: &mut Pending<'a>) -> Reply {
        match line.parse::<Command>() {
            Ok(command) => self.dispatch(command, pending),
            Err(CommandError::Empty) => Reply::Silent,
            Err(error) => {
                debug!(%error, "unparsable input");
                Reply::Note(format!("! {error}"))
            }
        }
    }

    fn dispatch<'a>(&'a self, command: Command, pending: &mut Pending<'a>) -> Reply {
        match command {
            Command::Start => self.navigate(Navigation::GetStarted),
            Command::Back => self.navigate(Navigation::Back),
            Command::Switch => self.navigate(Navigation::SwitchForm),
            Command::Login { email, password } => {
                pending.push(Box::pin(async move {
                    Completion::SignIn {
                        result: self.router.login(&email, &password).await,
                        failure: LOGIN_FAILED,
                    }
                }));
                Reply::Silent
            }
            Command::Register { email, role } => {
                pending.push(Box::pin(async move {
                    Completion::SignIn {
                        result: self.router.register(email.as_deref(), role).await,
                        failure: REGISTER_FAILED,
                    }
                }));
                Reply::Silent
            }
            Command::Logout => match self.router.logout() {
                Ok(_) => self.sync_dashboards(pending),
                Err(error) => {
                    warn!(%error, "logout failed");
                    Reply::Show(vec![error.to_string()])
                }
            },
            Command::Tab(tab) => {
                if !self.candidate.is_mounted() {
                    return Reply::Note(
                        "! tabs are only available on the candidate dashboard".to_owned(),
                    );
                }
                self.candidate.select_tab(tab);
                Reply::Show(Vec::new())
            }
            Command::Challenge(id) => match self.candidate.start_challenge(id) {
                Some(notice) => Reply::Show(vec![notice]),
                None => Reply::Note(format!("! project {id} is not on your dashboard")),
            },
            Command::Help => Reply::Note(HELP.to_owned()),
            Command::Quit => Reply::Quit,
        }
    }

    fn navigate(&self, navigation: Navigation) -> Reply {
        self.router.navigate(navigation);
        Reply::Show(Vec::new())
    }

    fn complete<'a>(&'a self, completion: Completion, pending: &mut Pending<'a>) -> Reply {
        match completion {
            Completion::SignIn { result: Ok(_), .. } => self.sync_dashboards(pending),
            Completion::SignIn {
                result: Err(error @ SessionError::NotSignedOut),
                ..
            } => {
                debug!(%error, "sign-in ignored");
                Reply::Note(format!("! {error}"))
            }
            Completion::SignIn {
                result: Err(error),
                failure,
            } => {
                warn!(%error, "sign-in failed");
                Reply::Show(vec![failure.to_owned()])
            }
            Completion::Loaded {
                result: Ok(FetchOutcome::Applied),
                ..
            } => Reply::Show(Vec::new()),
            Completion::Loaded {
                dashboard,
                result: Ok(FetchOutcome::Discarded),
            } => {
                debug!(?dashboard, "dashboard fetch discarded");
                Reply::Silent
            }
            Completion::Loaded {
                dashboard,
                result: Err(error),
            } => {
                warn!(?dashboard, %error, "dashboard fetch failed");
                Reply::Show(vec![error.to_string()])
            }
        }
    }

    /// Mount the dashboard for whoever is signed in now.
    ///
    /// When a fetch is queued the screen is rendered once it lands rather
    /// than twice.
    fn sync_dashboards<'a>(&'a self, pending: &mut Pending<'a>) -> Reply {
        let current = self.router.view().user().cloned();
        let mut active = self.active();
        if *active == current {
            return Reply::Show(Vec::new());
        }
        if let Some(previous) = active.take() {
            match DashboardKind::from(previous.role()) {
                DashboardKind::Candidate => self.candidate.unmount(),
                DashboardKind::Company => self.company.unmount(),
            }
        }
        let Some(user) = current else {
            return Reply::Show(Vec::new());
        };
        let dashboard = DashboardKind::from(user.role());
        *active = Some(user);
        drop(active);
        match dashboard {
            DashboardKind::Candidate => {
                self.candidate.mount();
                pending.push(Box::pin(async move {
                    Completion::Loaded {
                        dashboard,
                        result: self.candidate.load().await,
                    }
                }));
            }
            DashboardKind::Company => {
                self.company.mount();
                pending.push(Box::pin(async move {
                    Completion::Loaded {
                        dashboard,
                        result: self.company.load().await,
                    }
                }));
            }
        }
        Reply::Silent
    }

    fn emit<W: Write>(&self, reply: Reply, out: &mut W) -> io::Result<()> {
        match reply {
            Reply::Show(notices) => {
                for notice in notices {
                    writeln!(out, "! {notice}")?;
                }
                let screen = render::screen(
                    &self.router.screen(),
                    &self.candidate.snapshot(),
                    &self.company.snapshot(),
                );
                writeln!(out, "{screen}")?;
                writeln!(out)?;
            }
            Reply::Note(line) => writeln!(out, "{line}")?,
            Reply::Silent | Reply::Quit => return Ok(()),
        }
        out.flush()
    }

    fn active(&self) -> MutexGuard<'_, Option<User>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
