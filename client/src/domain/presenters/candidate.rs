//! Candidate dashboard: available challenges and past submissions.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::try_join;
use tracing::{debug, info};

use super::lifecycle::Mounted;
use super::{FetchOutcome, LoadState};
use crate::domain::ports::ChallengesQuery;
use crate::domain::{average_score, FetchError, Project, Submission};

/// Tabs on the candidate dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CandidateTab {
    /// Available challenges.
    #[default]
    Projects,
    /// Evaluated attempts.
    Submissions,
}

/// Everything the candidate dashboard fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeBoard {
    /// Challenges on offer.
    pub projects: Vec<Project>,
    /// The candidate's evaluated attempts.
    pub submissions: Vec<Submission>,
}

impl ChallengeBoard {
    /// Rounded mean of the submission scores.
    #[must_use]
    pub fn average_score(&self) -> u32 {
        average_score(&self.submissions)
    }

    /// Number of evaluated submissions.
    #[must_use]
    pub fn challenges_completed(&self) -> usize {
        self.submissions.len()
    }

    /// Project with `id`, if on offer.
    #[must_use]
    pub fn project(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }
}

/// Point-in-time copy of the presenter state for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSnapshot {
    /// Selected tab.
    pub tab: CandidateTab,
    /// Challenge and submission progress.
    pub data: LoadState<ChallengeBoard>,
}

#[derive(Debug, Default)]
struct CandidateState {
    slot: Mounted<ChallengeBoard>,
    tab: CandidateTab,
}

/// Presenter behind the candidate dashboard.
pub struct CandidateDashboard<Q: ?Sized> {
    query: Arc<Q>,
    state: Mutex<CandidateState>,
}

impl<Q: ChallengesQuery + ?Sized> CandidateDashboard<Q> {
    /// Create an unmounted presenter.
    #[must_use]
    pub fn new(query: Arc<Q>) -> Self {
        Self {
            query,
            state: Mutex::new(CandidateState::default()),
        }
    }

    /// Show the dashboard with fresh local state.
    pub fn mount(&self) {
        let mut state = self.lock();
        state.slot.mount();
        state.tab = CandidateTab::default();
    }

    /// Hide the dashboard. In-flight fetches will be discarded.
    pub fn unmount(&self) {
        self.lock().slot.unmount();
    }

    /// Whether the dashboard is on screen.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.lock().slot.is_mounted()
    }

    /// Switch tabs. Ignored while unmounted.
    pub fn select_tab(&self, tab: CandidateTab) {
        let mut state = self.lock();
        if state.slot.is_mounted() {
            state.tab = tab;
        }
    }

    /// Copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> CandidateSnapshot {
        let state = self.lock();
        CandidateSnapshot {
            tab: state.tab,
            data: state.slot.data().clone(),
        }
    }

    /// Fetch projects and submissions concurrently.
    ///
    /// # Errors
    /// Returns the first [`FetchError`] when the presenter is still showing
    /// the generation that asked for the data.
    pub async fn load(&self) -> Result<FetchOutcome, FetchError> {
        let Some(generation) = self.lock().slot.begin() else {
            debug!("candidate dashboard not mounted; skipping fetch");
            return Ok(FetchOutcome::Discarded);
        };
        let result = try_join(self.query.list_projects(), self.query.list_submissions())
            .await
            .map(|(projects, submissions)| ChallengeBoard {
                projects,
                submissions,
            });
        self.lock().slot.finish(generation, result)
    }

    /// Notice shown when a candidate starts a listed challenge.
    ///
    /// `None` unless the project is on the currently loaded board.
    #[must_use]
    pub fn start_challenge(&self, id: u64) -> Option<String> {
        let state = self.lock();
        let project = state.slot.data().loaded()?.project(id)?;
        info!(project_id = project.id, "challenge started");
        Some(format!(
            "Starting project {id}. In a real app, this would navigate to the coding environment."
        ))
    }

    fn lock(&self) -> MutexGuard<'_, CandidateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    //! Mount lifecycle and fetch ordering for the candidate presenter.
    use super::*;
    use crate::domain::ports::MockChallengesQuery;
    use crate::test_support::{projects, submissions, GatedChallenges};
    use rstest::rstest;

    fn stubbed() -> CandidateDashboard<MockChallengesQuery> {
        let mut query = MockChallengesQuery::new();
        query.expect_list_projects().returning(|| Ok(projects()));
        query
            .expect_list_submissions()
            .returning(|| Ok(submissions()));
        CandidateDashboard::new(Arc::new(query))
    }

    #[rstest]
    #[tokio::test]
    async fn load_fills_board_and_stats() {
        let dashboard = stubbed();
        dashboard.mount();

        assert_eq!(dashboard.load().await, Ok(FetchOutcome::Applied));

        let snapshot = dashboard.snapshot();
        let board = snapshot.data.loaded().expect("loaded");
        assert_eq!(board.average_score(), 91);
        assert_eq!(board.challenges_completed(), 2);
        assert_eq!(board.projects.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_fetch_is_kept_as_failed_state() {
        let mut query = MockChallengesQuery::new();
        query
            .expect_list_projects()
            .returning(|| Err(FetchError::unavailable("offline")));
        query
            .expect_list_submissions()
            .returning(|| Ok(Vec::new()));
        let dashboard = CandidateDashboard::new(Arc::new(query));
        dashboard.mount();

        let err = dashboard.load().await.expect_err("fetch fails");

        assert_eq!(err, FetchError::unavailable("offline"));
        assert_eq!(dashboard.snapshot().data, LoadState::Failed(err));
    }

    #[rstest]
    #[tokio::test]
    async fn load_while_unmounted_does_not_fetch() {
        let mut query = MockChallengesQuery::new();
        query.expect_list_projects().never();
        query.expect_list_submissions().never();
        let dashboard = CandidateDashboard::new(Arc::new(query));

        assert_eq!(dashboard.load().await, Ok(FetchOutcome::Discarded));
    }

    #[rstest]
    #[tokio::test]
    async fn result_arriving_after_unmount_is_discarded() {
        let (query, release) = GatedChallenges::new(submissions());
        let dashboard = CandidateDashboard::new(Arc::new(query));
        dashboard.mount();
        let pending = dashboard.load();
        tokio::pin!(pending);
        assert!(futures::poll!(&mut pending).is_pending());
        assert_eq!(dashboard.snapshot().data, LoadState::Loading);

        dashboard.unmount();
        release.send(projects()).expect("release projects");

        assert_eq!(pending.await, Ok(FetchOutcome::Discarded));
        assert_eq!(dashboard.snapshot().data, LoadState::Loading);
    }

    #[rstest]
    #[tokio::test]
    async fn result_arriving_after_remount_is_discarded() {
        let (query, release) = GatedChallenges::new(submissions());
        let dashboard = CandidateDashboard::new(Arc::new(query));
        dashboard.mount();
        let pending = dashboard.load();
        tokio::pin!(pending);
        assert!(futures::poll!(&mut pending).is_pending());

        dashboard.unmount();
        dashboard.mount();
        release.send(projects()).expect("release projects");

        assert_eq!(pending.await, Ok(FetchOutcome::Discarded));
        assert_eq!(dashboard.snapshot().data, LoadState::Idle);
    }

    #[rstest]
    fn remount_resets_selected_tab() {
        let dashboard = stubbed();
        dashboard.mount();
        dashboard.select_tab(CandidateTab::Submissions);
        assert_eq!(dashboard.snapshot().tab, CandidateTab::Submissions);

        dashboard.unmount();
        dashboard.mount();

        assert_eq!(dashboard.snapshot().tab, CandidateTab::Projects);
    }

    #[rstest]
    fn tab_selection_is_ignored_while_unmounted() {
        let dashboard = stubbed();
        dashboard.select_tab(CandidateTab::Submissions);
        assert_eq!(dashboard.snapshot().tab, CandidateTab::Projects);
    }

    #[rstest]
    #[case(1, true)]
    #[case(3, true)]
    #[case(2, false)]
    #[tokio::test]
    async fn starting_a_challenge_needs_a_listed_project(#[case] id: u64, #[case] listed: bool) {
        let dashboard = stubbed();
        dashboard.mount();
        assert_eq!(dashboard.start_challenge(id), None);
        dashboard.load().await.expect("load");

        let notice = dashboard.start_challenge(id);

        assert_eq!(notice.is_some(), listed);
        if let Some(text) = notice {
            assert!(text.starts_with(&format!("Starting project {id}.")));
        }
    }
}
